pub mod keywords;
pub mod render;
pub mod report;
pub mod scoring;

pub use keywords::{Keyword, KeywordResult};
pub use report::{Report, TechnicalSummary};
pub use scoring::{FactorStatus, RankingFactor, ScoreCard};

use tracing::debug;

use crate::extractor::PageSignals;

/// Run every analysis stage over `signals`. Pure and synchronous.
pub fn analyze(signals: &PageSignals) -> Report {
    let card = scoring::score(signals);
    let keyword_result = keywords::analyze(&signals.content);
    debug!(
        score = card.score,
        factors = card.ranking_factors.len(),
        keywords = keyword_result.keywords.len(),
        "page analyzed"
    );
    report::assemble_card(card, keyword_result).with_summary(TechnicalSummary::from_signals(signals))
}
