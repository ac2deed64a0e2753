use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// At most this many keywords are reported.
pub const MAX_KEYWORDS: usize = 50;

/// Keywords seen more often than this are high impact.
pub const HIGH_IMPACT_THRESHOLD: usize = 5;

/// Tokens this short or shorter are ignored.
const MIN_TOKEN_CHARS: usize = 3;

pub const STOP_WORDS: [&str; 40] = [
    "this", "that", "with", "from", "your", "their", "about", "more", "when", "have", "will",
    "been", "were", "they", "them", "then", "than", "what", "which", "where", "while", "there",
    "these", "those", "into", "also", "just", "some", "such", "only", "over", "each", "other",
    "would", "could", "should", "because", "after", "before", "very",
];

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("non-word regex is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Keyword {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordResult {
    /// Most frequent first; ties keep first-occurrence order.
    pub keywords: Vec<Keyword>,
    /// Words of `keywords` with a count above [`HIGH_IMPACT_THRESHOLD`].
    pub high_impact_keywords: Vec<String>,
}

/// Lowercased, punctuation-free tokens that survive the length and
/// stop-word filters, in text order.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_WORD
        .replace_all(&lowered, "")
        .split_whitespace()
        .filter(|token| token.chars().count() > MIN_TOKEN_CHARS && !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

pub fn analyze(text: &str) -> KeywordResult {
    // token -> (count, first position)
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, token) in tokenize(text).into_iter().enumerate() {
        counts.entry(token).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(MAX_KEYWORDS);

    let keywords: Vec<Keyword> = ranked
        .into_iter()
        .map(|(word, count, _)| Keyword { word, count })
        .collect();
    let high_impact_keywords = keywords
        .iter()
        .filter(|keyword| keyword.count > HIGH_IMPACT_THRESHOLD)
        .map(|keyword| keyword.word.clone())
        .collect();

    KeywordResult {
        keywords,
        high_impact_keywords,
    }
}
