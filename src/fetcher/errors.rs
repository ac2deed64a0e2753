use std::error::Error as _;

use serde::Serialize;
use thiserror::Error;

/// Classified acquisition failure. The `Display` output is safe to show to
/// end users: it never includes transport internals.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request timed out. The site might be slow or blocking us.")]
    Timeout,

    #[error("Domain not found. Please check the URL spelling.")]
    DomainNotFound,

    #[error("Access forbidden. This site might be blocking automated crawlers.")]
    Forbidden,

    #[error("Too many requests. The site is rate limiting us, please try again later.")]
    RateLimited,

    #[error("The site answered with a bot-protection challenge instead of the page.")]
    Blocked,

    #[error("Network error reaching {url}. Please ensure the URL is correct and public.")]
    Network { url: String },

    #[error("The analysis was cancelled before it completed.")]
    Cancelled,

    #[error("{0}")]
    Unknown(String),
}

/// Category of a [`FetchError`], for callers that branch on the failure mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FetchErrorKind {
    Timeout,
    DomainNotFound,
    Forbidden,
    RateLimited,
    Blocked,
    NetworkError,
    Cancelled,
    Unknown,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Timeout => FetchErrorKind::Timeout,
            Self::DomainNotFound => FetchErrorKind::DomainNotFound,
            Self::Forbidden => FetchErrorKind::Forbidden,
            Self::RateLimited => FetchErrorKind::RateLimited,
            Self::Blocked => FetchErrorKind::Blocked,
            Self::Network { .. } => FetchErrorKind::NetworkError,
            Self::Cancelled => FetchErrorKind::Cancelled,
            Self::Unknown(_) => FetchErrorKind::Unknown,
        }
    }

    /// Whether the failure can be caused by an apex hostname that only
    /// resolves with a `www.` prefix.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(self, Self::DomainNotFound)
    }

    pub fn from_status(status: reqwest::StatusCode) -> Self {
        match status.as_u16() {
            403 => Self::Forbidden,
            429 => Self::RateLimited,
            404 => Self::Unknown("Page not found (404).".to_string()),
            code => Self::Unknown(format!("Unexpected HTTP status {code}.")),
        }
    }

    pub fn from_reqwest_error(err: &reqwest::Error, url: &str) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::from_status(status)
        } else if is_dns_failure(err) {
            Self::DomainNotFound
        } else if err.is_connect() || err.is_request() || err.is_redirect() || err.is_body() {
            Self::Network {
                url: url.to_string(),
            }
        } else {
            Self::Unknown("The page could not be retrieved.".to_string())
        }
    }
}

/// reqwest does not expose resolver failures as their own category, so the
/// source chain is inspected for the resolver's wording.
fn is_dns_failure(err: &reqwest::Error) -> bool {
    const DNS_MARKERS: [&str; 5] = [
        "dns error",
        "failed to lookup address",
        "name or service not known",
        "no such host",
        "nodename nor servname",
    ];

    let mut source = err.source();
    while let Some(cause) = source {
        let message = cause.to_string().to_lowercase();
        if DNS_MARKERS.iter().any(|marker| message.contains(marker)) {
            return true;
        }
        source = cause.source();
    }
    false
}
