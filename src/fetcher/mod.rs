pub mod agents;
pub mod challenge;
pub mod client;
pub mod errors;
pub mod ladder;
pub mod pipeline;
pub mod types;

pub use agents::UserAgents;
pub use client::{HttpTransport, Transport};
pub use errors::{FetchError, FetchErrorKind};
pub use ladder::{Attempt, Ladder, LadderState};
pub use types::{AgentProfile, Charset, RawPage};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::FetchConfig;
use crate::extractor::{self, PageSignals};

/// Prepend `https://` to input that carries no scheme.
pub fn normalize_input(raw_url: &str) -> String {
    let trimmed = raw_url.trim();
    if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// A leading `scheme://`; a `://` later in the path or query does not count.
fn has_scheme(input: &str) -> bool {
    input.split_once("://").is_some_and(|(scheme, _)| {
        scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

pub fn normalize_url(raw_url: &str) -> Result<Url, FetchError> {
    if raw_url.trim().is_empty() {
        return Err(FetchError::Unknown("Please enter a URL to analyze.".to_string()));
    }

    let normalized = normalize_input(raw_url);
    let url = Url::parse(&normalized)
        .map_err(|_| FetchError::Unknown(format!("'{}' is not a valid URL.", raw_url.trim())))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(FetchError::Unknown(
            "Only http and https web pages can be analyzed.".to_string(),
        ));
    }
    Ok(url)
}

/// Resolves user input to [`PageSignals`], walking the fallback ladder.
///
/// Holds no per-call state; one `Fetcher` can serve concurrent calls.
#[derive(Clone)]
pub struct Fetcher {
    transport: Arc<dyn Transport>,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(config)?)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn fetch(&self, raw_url: &str) -> Result<PageSignals, FetchError> {
        self.fetch_with_cancel(raw_url, &CancellationToken::new())
            .await
    }

    pub async fn fetch_with_cancel(
        &self,
        raw_url: &str,
        cancel: &CancellationToken,
    ) -> Result<PageSignals, FetchError> {
        let agents = UserAgents::pick(&mut rand::thread_rng());
        self.fetch_with_agents(raw_url, agents, cancel).await
    }

    /// Like [`Fetcher::fetch_with_cancel`] with the user agents fixed by the
    /// caller, e.g. drawn from a seeded RNG.
    #[instrument(skip_all, fields(url = %raw_url.trim()))]
    pub async fn fetch_with_agents(
        &self,
        raw_url: &str,
        agents: UserAgents,
        cancel: &CancellationToken,
    ) -> Result<PageSignals, FetchError> {
        let url = normalize_url(raw_url)?;
        let mut ladder = Ladder::new(url);

        while let Some(attempt) = ladder.next_attempt() {
            let from = ladder.state();
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("fetch cancelled");
                    ladder.cancel();
                    break;
                }
                outcome = self.attempt(&attempt, &agents) => outcome,
            };

            if let Err(err) = &outcome {
                warn!(state = ?from, url = %attempt.url, kind = ?err.kind(), "attempt failed");
            }
            ladder.record(outcome);
            info!(from = ?from, to = ?ladder.state(), attempts = ladder.attempts(), "ladder step");
        }

        ladder.finish()
    }

    async fn attempt(
        &self,
        attempt: &Attempt,
        agents: &UserAgents,
    ) -> Result<PageSignals, FetchError> {
        let user_agent = agents.for_profile(attempt.profile);
        debug!(url = %attempt.url, profile = ?attempt.profile, "attempting fetch");

        let page = self.transport.get(&attempt.url, user_agent).await?;
        if challenge::is_challenge_page(&page.body) {
            return Err(FetchError::Blocked);
        }
        Ok(extractor::extract(&page.body, &page.url_final))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_domain_gets_https() {
        assert_eq!(normalize_input("example.com"), "https://example.com");
        assert_eq!(normalize_input("  example.com/path \n"), "https://example.com/path");
    }

    #[test]
    fn url_in_query_is_not_a_scheme() {
        assert_eq!(
            normalize_input("example.com/go?to=https://other.org"),
            "https://example.com/go?to=https://other.org"
        );
        assert_eq!(
            normalize_url("example.com/go?to=https://other.org")
                .unwrap()
                .host_str(),
            Some("example.com")
        );
    }

    #[test]
    fn existing_scheme_is_kept() {
        assert_eq!(normalize_input("http://example.com"), "http://example.com");
        assert_eq!(normalize_input("https://example.com"), "https://example.com");
    }

    #[test]
    fn normalize_url_rejects_unusable_input() {
        assert_eq!(
            normalize_url("example.com").unwrap().as_str(),
            "https://example.com/"
        );
        assert!(matches!(normalize_url("   "), Err(FetchError::Unknown(_))));
        assert!(matches!(normalize_url("ftp://example.com"), Err(FetchError::Unknown(_))));
        assert!(matches!(normalize_url("exa mple.com"), Err(FetchError::Unknown(_))));
    }
}
