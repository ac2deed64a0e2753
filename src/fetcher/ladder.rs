//! The fallback policy for one fetch call, as a state machine.
//!
//! The ladder never touches the network: the driver asks it for the next
//! [`Attempt`], performs it, and feeds the outcome back with
//! [`Ladder::record`]. Attempts are therefore strictly sequential and the
//! policy can be exercised with synthetic outcomes.

use url::{Host, Url};

use crate::extractor::PageSignals;
use crate::fetcher::errors::FetchError;
use crate::fetcher::types::AgentProfile;

/// Hard ceiling on network attempts per fetch call.
pub const MAX_ATTEMPTS: u8 = 3;

/// Content shorter than this, on a page without a title, is a weak result.
pub const WEAK_CONTENT_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LadderState {
    Primary,
    HostFallback,
    UaFallback,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub url: Url,
    pub profile: AgentProfile,
}

#[derive(Debug)]
pub struct Ladder {
    state: LadderState,
    url: Url,
    attempts: u8,
    kept: Option<PageSignals>,
    error: Option<FetchError>,
}

pub fn is_weak(signals: &PageSignals) -> bool {
    signals.title.is_empty() && signals.content_chars() < WEAK_CONTENT_CHARS
}

/// `www.` variant of an apex hostname (`example.com`, `example.co.uk`).
/// Subdomains, `www.` hosts, IP addresses and single-label hosts get none.
pub fn www_variant(url: &Url) -> Option<Url> {
    let Some(Host::Domain(host)) = url.host() else {
        return None;
    };
    if host.starts_with("www.") {
        return None;
    }

    let labels = host.split('.').count();
    let apex = labels == 2 || (labels == 3 && host.ends_with(".co.uk"));
    if !apex {
        return None;
    }

    let mut www = url.clone();
    www.set_host(Some(&format!("www.{host}"))).ok()?;
    Some(www)
}

impl Ladder {
    pub fn new(url: Url) -> Self {
        Self {
            state: LadderState::Primary,
            url,
            attempts: 0,
            kept: None,
            error: None,
        }
    }

    pub fn state(&self) -> LadderState {
        self.state
    }

    pub fn attempts(&self) -> u8 {
        self.attempts
    }

    /// The attempt to perform next, or `None` once the ladder is settled.
    pub fn next_attempt(&self) -> Option<Attempt> {
        if self.attempts >= MAX_ATTEMPTS {
            return None;
        }
        let profile = match self.state {
            LadderState::Primary | LadderState::HostFallback => AgentProfile::Desktop,
            LadderState::UaFallback => AgentProfile::Mobile,
            LadderState::Succeeded | LadderState::Failed => return None,
        };
        Some(Attempt {
            url: self.url.clone(),
            profile,
        })
    }

    /// Feed back the outcome of the attempt returned by
    /// [`Ladder::next_attempt`].
    pub fn record(&mut self, outcome: Result<PageSignals, FetchError>) {
        self.attempts += 1;
        self.state = match (self.state, outcome) {
            (LadderState::Primary | LadderState::HostFallback, Ok(signals)) => {
                let weak = is_weak(&signals);
                self.kept = Some(signals);
                if weak {
                    LadderState::UaFallback
                } else {
                    LadderState::Succeeded
                }
            }
            (_, Err(FetchError::Blocked)) if self.kept.is_none() => {
                self.error = Some(FetchError::Blocked);
                LadderState::Failed
            }
            (LadderState::Primary, Err(err)) => match www_variant(&self.url) {
                Some(www) if err.is_resolution_failure() => {
                    self.url = www;
                    self.error = Some(err);
                    LadderState::HostFallback
                }
                _ => {
                    self.error = Some(err);
                    LadderState::Failed
                }
            },
            // The primary failure is the one worth reporting.
            (LadderState::HostFallback, Err(_)) => LadderState::Failed,
            (LadderState::UaFallback, Ok(candidate)) => {
                let replace = self
                    .kept
                    .as_ref()
                    .is_none_or(|kept| prefer_candidate(kept, &candidate));
                if replace {
                    self.kept = Some(candidate);
                }
                LadderState::Succeeded
            }
            // A weak page is still a page.
            (LadderState::UaFallback, Err(_)) => LadderState::Succeeded,
            (settled @ (LadderState::Succeeded | LadderState::Failed), _) => settled,
        };
    }

    /// Abandon the ladder; no further attempts are offered.
    pub fn cancel(&mut self) {
        self.kept = None;
        self.error = Some(FetchError::Cancelled);
        self.state = LadderState::Failed;
    }

    pub fn finish(self) -> Result<PageSignals, FetchError> {
        match (self.state, self.kept, self.error) {
            (LadderState::Succeeded, Some(signals), _) => Ok(signals),
            (_, _, Some(err)) => Err(err),
            (_, Some(signals), None) => Ok(signals),
            (_, None, None) => Err(FetchError::Unknown(
                "No attempt was made to fetch the page.".to_string(),
            )),
        }
    }
}

fn prefer_candidate(kept: &PageSignals, candidate: &PageSignals) -> bool {
    !candidate.title.is_empty() || candidate.content_chars() > kept.content_chars()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn page(at: &str, title: &str, content: &str) -> PageSignals {
        let mut signals = PageSignals::empty(url(at));
        signals.title = title.to_string();
        signals.content = content.to_string();
        signals
    }

    fn strong(at: &str) -> PageSignals {
        page(at, "A proper title", "content")
    }

    fn weak(at: &str, content: &str) -> PageSignals {
        page(at, "", content)
    }

    #[test]
    fn apex_detection() {
        assert_eq!(
            www_variant(&url("https://example.com/a?b=c")).unwrap().as_str(),
            "https://www.example.com/a?b=c"
        );
        assert!(www_variant(&url("https://example.co.uk/")).is_some());
        assert!(www_variant(&url("https://www.example.com/")).is_none());
        assert!(www_variant(&url("https://blog.example.com/")).is_none());
        assert!(www_variant(&url("http://127.0.0.1:8080/")).is_none());
        assert!(www_variant(&url("http://localhost/")).is_none());
    }

    #[test]
    fn weak_result_predicate() {
        assert!(is_weak(&weak("https://e.com/", "tiny")));
        assert!(!is_weak(&weak("https://e.com/", &"x".repeat(WEAK_CONTENT_CHARS))));
        assert!(!is_weak(&page("https://e.com/", "Title", "")));
    }

    #[test]
    fn strong_primary_succeeds_in_one_attempt() {
        let mut ladder = Ladder::new(url("https://example.com/"));
        let attempt = ladder.next_attempt().unwrap();
        assert_eq!(attempt.profile, AgentProfile::Desktop);

        ladder.record(Ok(strong("https://example.com/")));
        assert_eq!(ladder.state(), LadderState::Succeeded);
        assert!(ladder.next_attempt().is_none());
        assert_eq!(ladder.attempts(), 1);
        assert_eq!(ladder.finish().unwrap().title, "A proper title");
    }

    #[test]
    fn forbidden_fails_without_fallback() {
        let mut ladder = Ladder::new(url("https://example.com/"));
        ladder.record(Err(FetchError::Forbidden));
        assert_eq!(ladder.state(), LadderState::Failed);
        assert!(ladder.next_attempt().is_none());
        assert_eq!(ladder.finish().unwrap_err(), FetchError::Forbidden);
    }

    #[test]
    fn blocked_fails_immediately() {
        let mut ladder = Ladder::new(url("https://example.com/"));
        ladder.record(Err(FetchError::Blocked));
        assert_eq!(ladder.state(), LadderState::Failed);
        assert_eq!(ladder.finish().unwrap_err(), FetchError::Blocked);
    }

    #[test]
    fn apex_dns_failure_retries_www_once() {
        let mut ladder = Ladder::new(url("https://example.com/page"));
        ladder.record(Err(FetchError::DomainNotFound));
        assert_eq!(ladder.state(), LadderState::HostFallback);

        let attempt = ladder.next_attempt().unwrap();
        assert_eq!(attempt.url.as_str(), "https://www.example.com/page");
        assert_eq!(attempt.profile, AgentProfile::Desktop);

        ladder.record(Ok(strong("https://www.example.com/page")));
        assert_eq!(ladder.state(), LadderState::Succeeded);
        assert_eq!(ladder.finish().unwrap().url.host_str(), Some("www.example.com"));
    }

    #[test]
    fn failed_host_fallback_returns_original_error() {
        let mut ladder = Ladder::new(url("https://example.com/"));
        ladder.record(Err(FetchError::DomainNotFound));
        ladder.record(Err(FetchError::Timeout));
        assert_eq!(ladder.state(), LadderState::Failed);
        assert_eq!(ladder.attempts(), 2);
        assert_eq!(ladder.finish().unwrap_err(), FetchError::DomainNotFound);
    }

    #[test]
    fn dns_failure_on_subdomain_is_final() {
        let mut ladder = Ladder::new(url("https://blog.example.com/"));
        ladder.record(Err(FetchError::DomainNotFound));
        assert_eq!(ladder.state(), LadderState::Failed);
    }

    #[test]
    fn timeout_on_apex_is_final() {
        let mut ladder = Ladder::new(url("https://example.com/"));
        ladder.record(Err(FetchError::Timeout));
        assert_eq!(ladder.state(), LadderState::Failed);
        assert_eq!(ladder.finish().unwrap_err(), FetchError::Timeout);
    }

    #[test]
    fn weak_primary_tries_mobile_and_keeps_better_result() {
        let mut ladder = Ladder::new(url("https://example.com/"));
        ladder.record(Ok(weak("https://example.com/", "Loading")));
        assert_eq!(ladder.state(), LadderState::UaFallback);
        assert_eq!(ladder.next_attempt().unwrap().profile, AgentProfile::Mobile);

        ladder.record(Ok(page("https://example.com/", "Mobile title", "")));
        assert_eq!(ladder.state(), LadderState::Succeeded);
        assert_eq!(ladder.finish().unwrap().title, "Mobile title");
    }

    #[test]
    fn weak_primary_keeps_primary_when_mobile_is_no_better() {
        let mut ladder = Ladder::new(url("https://example.com/"));
        ladder.record(Ok(weak("https://example.com/", "some words here")));
        ladder.record(Ok(weak("https://example.com/", "fewer")));
        assert_eq!(ladder.finish().unwrap().content, "some words here");

        let mut ladder = Ladder::new(url("https://example.com/"));
        ladder.record(Ok(weak("https://example.com/", "same")));
        ladder.record(Ok(weak("https://example.com/", "SAME")));
        // equal length is not strictly more
        assert_eq!(ladder.finish().unwrap().content, "same");
    }

    #[test]
    fn failed_mobile_attempt_keeps_weak_primary() {
        let mut ladder = Ladder::new(url("https://example.com/"));
        ladder.record(Ok(weak("https://example.com/", "tiny")));
        ladder.record(Err(FetchError::Blocked));
        assert_eq!(ladder.state(), LadderState::Succeeded);
        assert_eq!(ladder.finish().unwrap().content, "tiny");
    }

    #[test]
    fn full_ladder_uses_three_attempts_at_most() {
        let mut ladder = Ladder::new(url("https://example.com/"));
        ladder.record(Err(FetchError::DomainNotFound));
        ladder.record(Ok(weak("https://www.example.com/", "tiny")));
        let attempt = ladder.next_attempt().unwrap();
        assert_eq!(attempt.url.host_str(), Some("www.example.com"));
        assert_eq!(attempt.profile, AgentProfile::Mobile);

        ladder.record(Ok(weak("https://www.example.com/", "a bit longer")));
        assert_eq!(ladder.attempts(), MAX_ATTEMPTS);
        assert!(ladder.next_attempt().is_none());
        assert_eq!(ladder.finish().unwrap().content, "a bit longer");
    }

    #[test]
    fn cancel_discards_partial_results() {
        let mut ladder = Ladder::new(url("https://example.com/"));
        ladder.record(Ok(weak("https://example.com/", "tiny")));
        ladder.cancel();
        assert!(ladder.next_attempt().is_none());
        assert_eq!(ladder.finish().unwrap_err(), FetchError::Cancelled);
    }
}
