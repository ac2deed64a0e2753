use serde::{Deserialize, Serialize};
use url::Url;

/// Upper bound, in characters, on [`PageSignals::content`].
pub const CONTENT_CAP: usize = 40_000;

/// Everything the analysis stages know about a fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSignals {
    pub title: String,
    pub meta_description: String,
    /// Cleaned body text, at most [`CONTENT_CAP`] characters.
    pub content: String,
    pub h1s: Vec<String>,
    pub h2s: Vec<String>,
    pub images: ImageStats,
    pub links: LinkStats,
    /// Final URL after scheme normalization, host fallback and redirects.
    pub url: Url,
}

impl PageSignals {
    /// An empty record for `url`, used when markup yields nothing.
    pub fn empty(url: Url) -> Self {
        Self {
            title: String::new(),
            meta_description: String::new(),
            content: String::new(),
            h1s: Vec::new(),
            h2s: Vec::new(),
            images: ImageStats::default(),
            links: LinkStats::default(),
            url,
        }
    }

    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    pub fn content_chars(&self) -> usize {
        self.content.chars().count()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStats {
    pub total: usize,
    pub with_alt: usize,
    pub without_alt: usize,
}

impl ImageStats {
    pub fn new(total: usize, with_alt: usize) -> Self {
        let with_alt = with_alt.min(total);
        Self {
            total,
            with_alt,
            without_alt: total - with_alt,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStats {
    pub total: usize,
    pub internal: usize,
    pub external: usize,
}

impl LinkStats {
    pub fn new(total: usize, internal: usize) -> Self {
        Self {
            total,
            internal,
            external: total.saturating_sub(internal),
        }
    }
}

/// Collapse every whitespace run (newlines included) into one space.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut `text` after `max_chars` characters, ignoring word boundaries.
pub fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((byte_idx, _)) = text.char_indices().nth(max_chars) {
        text.truncate(byte_idx);
    }
    text
}
