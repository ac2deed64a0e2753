//! Rule-based page scoring.
//!
//! Each dimension is scored on its own and the deltas are summed. The best
//! case of every rule adds up to exactly 100.

use serde::Serialize;

use crate::extractor::PageSignals;

const TITLE_MIN_CHARS: usize = 30;
const TITLE_MAX_CHARS: usize = 65;
const META_GOOD_CHARS: usize = 120;
const IMAGE_POINTS: f64 = 15.0;
const MIN_INTERNAL_LINKS: usize = 3;
const WELL_LINKED_TOTAL: usize = 10;
const SUBSTANTIAL_WORDS: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorStatus {
    Good,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingFactor {
    pub name: String,
    pub status: FactorStatus,
    pub description: String,
}

impl RankingFactor {
    fn new(name: &str, status: FactorStatus, description: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status,
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCard {
    pub ranking_factors: Vec<RankingFactor>,
    pub score: u32,
    pub wins: Vec<String>,
    pub recommendations: Vec<String>,
}

pub const WIN_TITLE: &str = "Title length is optimal for search result display.";
pub const WIN_SINGLE_H1: &str = "Exactly one H1 heading gives the page a clear structure.";
pub const WIN_META: &str = "Robust meta description gives search engines a strong snippet.";
pub const WIN_IMAGES: &str = "All images have ALT text, so they are accessible and indexable.";
pub const WIN_CONNECTED_AND_SUBSTANTIAL: &str =
    "High connectivity and sufficient content volume for search engines to understand the page.";
pub const WIN_CONNECTED: &str = "High connectivity: the page links generously to related content.";
pub const WIN_SUBSTANTIAL: &str = "Sufficient content volume for search engines to understand the page.";

pub const REC_ADD_H1: &str = "Add a single, descriptive H1 heading that states the page's main topic.";
pub const REC_LENGTHEN_META: &str =
    "Lengthen the meta description to 150-160 characters so search engines show a complete snippet.";
pub const REC_ALT_TEXT: &str =
    "Add ALT descriptive tags to all images to improve accessibility and image search rankings.";
pub const REC_INTERNAL_LINKS: &str =
    "Improve internal linking to help search engines crawl and index your site better.";

/// Score `signals`. Pure: equal inputs always give equal cards.
pub fn score(signals: &PageSignals) -> ScoreCard {
    let mut card = ScoreCard::default();
    score_title(signals, &mut card);
    score_h1(signals, &mut card);
    score_meta(signals, &mut card);
    score_images(signals, &mut card);
    score_links_and_volume(signals, &mut card);
    card
}

fn score_title(signals: &PageSignals, card: &mut ScoreCard) {
    let len = signals.title.chars().count();
    let factor = match len {
        0 => RankingFactor::new(
            "Title Missing",
            FactorStatus::Critical,
            "No title found. Search engines will invent one from the page content.",
        ),
        TITLE_MIN_CHARS..=TITLE_MAX_CHARS => {
            card.score += 25;
            card.wins.push(WIN_TITLE.to_string());
            RankingFactor::new(
                "Title Length",
                FactorStatus::Good,
                "Optimal title length for SERP display.",
            )
        }
        _ => {
            card.score += 10;
            RankingFactor::new(
                "Title Optimization",
                FactorStatus::Warning,
                format!(
                    "Current length: {len} characters. Ideal is {TITLE_MIN_CHARS}-{TITLE_MAX_CHARS} characters."
                ),
            )
        }
    };
    card.ranking_factors.push(factor);
}

fn score_h1(signals: &PageSignals, card: &mut ScoreCard) {
    let factor = match signals.h1s.len() {
        0 => {
            card.recommendations.push(REC_ADD_H1.to_string());
            RankingFactor::new(
                "H1 Missing",
                FactorStatus::Critical,
                "No H1 tag found. This is a vital SEO factor.",
            )
        }
        1 => {
            card.score += 20;
            card.wins.push(WIN_SINGLE_H1.to_string());
            RankingFactor::new(
                "H1 Header",
                FactorStatus::Good,
                "Exactly one H1 tag found. Perfect for structure.",
            )
        }
        count => {
            card.score += 5;
            RankingFactor::new(
                "Multiple H1s",
                FactorStatus::Warning,
                format!("{count} H1 tags found. Try to have only one main heading."),
            )
        }
    };
    card.ranking_factors.push(factor);
}

fn score_meta(signals: &PageSignals, card: &mut ScoreCard) {
    let len = signals.meta_description.chars().count();
    let factor = match len {
        0 => {
            card.recommendations.push(REC_LENGTHEN_META.to_string());
            RankingFactor::new(
                "Meta Tag Missing",
                FactorStatus::Critical,
                "No meta description found. Search engines will auto-generate one.",
            )
        }
        1..=META_GOOD_CHARS => {
            card.score += 5;
            card.recommendations.push(REC_LENGTHEN_META.to_string());
            RankingFactor::new(
                "Meta Length",
                FactorStatus::Warning,
                format!("Meta description is {len} characters. Aim for 150-160 characters."),
            )
        }
        _ => {
            card.score += 20;
            card.wins.push(WIN_META.to_string());
            RankingFactor::new(
                "Meta Description",
                FactorStatus::Good,
                "Detailed description found.",
            )
        }
    };
    card.ranking_factors.push(factor);
}

fn score_images(signals: &PageSignals, card: &mut ScoreCard) {
    let images = signals.images;
    let factor = if images.total == 0 {
        card.score += 15;
        RankingFactor::new(
            "Image Alt Tags",
            FactorStatus::Good,
            "No images found, so no ALT text is missing.",
        )
    } else if images.without_alt == 0 {
        card.score += 15;
        card.wins.push(WIN_IMAGES.to_string());
        RankingFactor::new(
            "Image Alt Tags",
            FactorStatus::Good,
            "All images have ALT attributes.",
        )
    } else {
        let described = (images.total - images.without_alt) as f64 / images.total as f64;
        card.score += (described * IMAGE_POINTS).round() as u32;
        card.recommendations.push(REC_ALT_TEXT.to_string());
        RankingFactor::new(
            "Image ALTs",
            FactorStatus::Warning,
            format!(
                "{} of {} images are missing ALT text.",
                images.without_alt, images.total
            ),
        )
    };
    card.ranking_factors.push(factor);
}

/// Links and word count add score without a ranking factor of their own.
/// When both earn a win they share one entry.
fn score_links_and_volume(signals: &PageSignals, card: &mut ScoreCard) {
    let links = signals.links;
    if links.internal < MIN_INTERNAL_LINKS {
        card.recommendations.push(REC_INTERNAL_LINKS.to_string());
    }

    let connected = links.total > WELL_LINKED_TOTAL;
    card.score += if connected { 10 } else { 5 };

    let substantial = signals.word_count() > SUBSTANTIAL_WORDS;
    card.score += if substantial { 10 } else { 5 };

    let win = match (connected, substantial) {
        (true, true) => Some(WIN_CONNECTED_AND_SUBSTANTIAL),
        (true, false) => Some(WIN_CONNECTED),
        (false, true) => Some(WIN_SUBSTANTIAL),
        (false, false) => None,
    };
    if let Some(win) = win {
        card.wins.push(win.to_string());
    }
}
