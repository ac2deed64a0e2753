//! Single-page SEO analysis: fetch a page with a fallback ladder, extract its
//! structural signals, and score them against a fixed rule table.
//!
//! ```no_run
//! # async fn run() -> Result<(), pagescore::fetcher::FetchError> {
//! let fetcher = pagescore::fetcher::Fetcher::new(Default::default())?;
//! let signals = fetcher.fetch("example.com").await?;
//! let report = pagescore::analysis::analyze(&signals);
//! println!("{} scored {}", signals.url, report.score);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod analyze;
pub mod app_state;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod middleware;
pub mod router;
