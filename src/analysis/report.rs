use serde::Serialize;

use crate::analysis::keywords::{Keyword, KeywordResult};
use crate::analysis::scoring::{RankingFactor, ScoreCard};
use crate::extractor::PageSignals;

/// Counts shown next to the recommendations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSummary {
    pub total_words: usize,
    pub internal_links: usize,
    pub external_links: usize,
    pub h2_count: usize,
}

impl TechnicalSummary {
    pub fn from_signals(signals: &PageSignals) -> Self {
        Self {
            total_words: signals.word_count(),
            internal_links: signals.links.internal,
            external_links: signals.links.external,
            h2_count: signals.h2s.len(),
        }
    }
}

/// The analysis result, independent of how it is displayed. Field order is
/// the serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub ranking_factors: Vec<RankingFactor>,
    pub score: u32,
    pub wins: Vec<String>,
    pub recommendations: Vec<String>,
    pub keywords: Vec<Keyword>,
    pub high_impact_keywords: Vec<String>,
    pub summary: TechnicalSummary,
}

/// Combine scoring and keyword output. No analysis happens here; the
/// summary starts zeroed until [`Report::with_summary`] fills it.
pub fn assemble(
    ranking_factors: Vec<RankingFactor>,
    keyword_result: KeywordResult,
    score: u32,
    wins: Vec<String>,
    recommendations: Vec<String>,
) -> Report {
    Report {
        ranking_factors,
        score,
        wins,
        recommendations,
        keywords: keyword_result.keywords,
        high_impact_keywords: keyword_result.high_impact_keywords,
        summary: TechnicalSummary::default(),
    }
}

pub fn assemble_card(card: ScoreCard, keyword_result: KeywordResult) -> Report {
    assemble(
        card.ranking_factors,
        keyword_result,
        card.score,
        card.wins,
        card.recommendations,
    )
}

impl Report {
    pub fn with_summary(mut self, summary: TechnicalSummary) -> Self {
        self.summary = summary;
        self
    }
}
