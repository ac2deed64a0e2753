use crate::extractor::document::{DocumentQuery, HtmlDocument};
use crate::extractor::model::{CONTENT_CAP, normalize_whitespace, truncate_chars};

/// Elements whose text is chrome or code rather than page content.
const NON_CONTENT_TAGS: [&str; 13] = [
    "script", "style", "nav", "footer", "header", "svg", "canvas", "iframe", "frame", "object",
    "embed", "noscript", "link",
];

/// Where the body text is taken from, most specific first.
const BODY_CANDIDATES: [&str; 4] = ["main", "article", "#content", "body"];

pub fn clean(markup: &str) -> String {
    clean_document(&HtmlDocument::parse(markup))
}

/// Whitespace-normalized body text, capped at [`CONTENT_CAP`] characters.
///
/// A candidate that exists but holds no text after cleaning is skipped in
/// favour of the next one.
pub fn clean_document(doc: &impl DocumentQuery) -> String {
    BODY_CANDIDATES
        .into_iter()
        .filter_map(|candidate| doc.text_without(candidate, &NON_CONTENT_TAGS))
        .map(|text| normalize_whitespace(&text))
        .find(|text| !text.is_empty())
        .map(|text| truncate_chars(text, CONTENT_CAP))
        .unwrap_or_default()
}
