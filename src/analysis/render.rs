//! Plain-text rendering of a [`Report`] for terminals.

use std::fmt;

use crate::analysis::report::Report;
use crate::analysis::scoring::FactorStatus;
use crate::extractor::PageSignals;

/// How many keywords the text view lists.
const LISTED_KEYWORDS: usize = 20;

fn status_label(status: FactorStatus) -> &'static str {
    match status {
        FactorStatus::Good => "GOOD",
        FactorStatus::Warning => "WARN",
        FactorStatus::Critical => "CRIT",
    }
}

pub fn render_text(signals: &PageSignals, report: &Report) -> String {
    TextReport { signals, report }.to_string()
}

/// Terminal view of one analysis.
pub struct TextReport<'a> {
    pub signals: &'a PageSignals,
    pub report: &'a Report,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { signals, report } = *self;
        writeln!(out, "{}", signals.url)?;
        let title = if signals.title.is_empty() {
            "(no title)"
        } else {
            signals.title.as_str()
        };
        writeln!(out, "{title}")?;
        writeln!(out, "Score: {}", report.score)?;

        writeln!(out, "\nRanking analysis")?;
        for factor in &report.ranking_factors {
            writeln!(
                out,
                "  [{}] {}: {}",
                status_label(factor.status),
                factor.name,
                factor.description
            )?;
        }

        if !report.wins.is_empty() {
            writeln!(out, "\nWins")?;
            for win in &report.wins {
                writeln!(out, "  + {win}")?;
            }
        }

        writeln!(out, "\nTargeted improvements")?;
        if report.recommendations.is_empty() {
            writeln!(
                out,
                "  This page already follows the major SEO practices. Focus on quality backlinks and fresh content."
            )?;
        }
        for recommendation in &report.recommendations {
            writeln!(out, "  - {recommendation}")?;
        }

        writeln!(out, "\nHigh-impact keywords")?;
        if report.high_impact_keywords.is_empty() {
            writeln!(out, "  none detected")?;
        } else {
            writeln!(out, "  {}", report.high_impact_keywords.join(", "))?;
        }

        writeln!(out, "\nTop keywords")?;
        for keyword in report.keywords.iter().take(LISTED_KEYWORDS) {
            writeln!(out, "  {:<24} {}", keyword.word, keyword.count)?;
        }

        let summary = report.summary;
        writeln!(out, "\nTechnical summary")?;
        writeln!(out, "  Total words     {}", summary.total_words)?;
        writeln!(out, "  Internal links  {}", summary.internal_links)?;
        writeln!(out, "  External links  {}", summary.external_links)?;
        writeln!(out, "  H2 headers      {}", summary.h2_count)?;
        Ok(())
    }
}
