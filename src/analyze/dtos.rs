use serde::{Deserialize, Serialize};

use crate::analysis::Report;
use crate::extractor::PageSignals;
use crate::fetcher::{FetchError, FetchErrorKind, normalize_url};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

impl AnalyzeRequest {
    /// Rejects input that could never be fetched: blank, oversized, not a
    /// URL, or not http(s).
    pub fn validate(&self) -> Result<(), String> {
        if self.url.len() > 2048 {
            return Err("URL too long".to_string());
        }
        normalize_url(&self.url)
            .map(|_| ())
            .map_err(|err| err.to_string())
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub data: PageSignals,
    pub report: Report,
}

impl AnalyzeResponse {
    pub fn new(data: PageSignals, report: Report) -> Self {
        Self {
            success: true,
            data,
            report,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FetchErrorKind>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            kind: None,
        }
    }
}

impl From<&FetchError> for ErrorResponse {
    fn from(err: &FetchError) -> Self {
        Self {
            success: false,
            error: err.to_string(),
            kind: Some(err.kind()),
        }
    }
}
