use crate::fetcher::{
    errors::FetchError,
    types::{Charset, RawPage},
};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static CHARSET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).expect("charset regex is valid")
});

static META_CHARSET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#)
        .expect("meta charset regex is valid")
});

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#)
        .expect("http-equiv regex is valid")
});

/// Only markup is analyzable; a missing header is assumed to be HTML.
pub fn check_content_type(content_type: Option<&str>) -> Result<(), FetchError> {
    match content_type {
        None => Ok(()),
        Some(ct) if ct.contains("text/html") || ct.contains("application/xhtml") => Ok(()),
        Some(ct) => Err(FetchError::Unknown(format!("Unsupported content type: {ct}"))),
    }
}

pub fn process_response(url_final: Url, body_bytes: &[u8], content_type: &str) -> RawPage {
    let charset = detect_charset(content_type, body_bytes);
    RawPage {
        url_final,
        body: decode_to_utf8(body_bytes, charset),
    }
}

fn charset_from(regex: &Regex, haystack: &str) -> Option<Charset> {
    Charset::for_label(regex.captures(haystack)?.get(1)?.as_str())
}

fn detect_charset(content_type: &str, body_bytes: &[u8]) -> Charset {
    // 1. Content-Type header
    if let Some(charset) = charset_from(&CHARSET_REGEX, content_type) {
        return charset;
    }

    // 2. <meta charset> or http-equiv in the first 4KB
    let search_bytes = &body_bytes[..body_bytes.len().min(4096)];
    let search_str = String::from_utf8_lossy(search_bytes);

    if let Some(charset) = charset_from(&META_CHARSET_REGEX, &search_str)
        .or_else(|| charset_from(&META_HTTP_EQUIV_REGEX, &search_str))
    {
        return charset;
    }

    // 3. Heuristic detection
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(search_bytes, body_bytes.len() <= 4096);
    Charset::from(detector.guess(None, true))
}

/// Malformed sequences become U+FFFD; analysis tolerates them.
fn decode_to_utf8(body_bytes: &[u8], charset: Charset) -> String {
    let (decoded, _encoding, _had_errors) = charset.encoding().decode(body_bytes);
    decoded.into_owned()
}
