use std::fs;
use url::Url;

use crate::extractor::{CONTENT_CAP, extract};

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

#[test]
fn test_extract_article() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/article.html")
        .expect("Failed to read test fixture");

    let signals = extract(&html, &url("https://example.com/article"));

    assert_eq!(signals.title, "Sample Article - News Site");
    assert_eq!(
        signals.meta_description,
        "A short walk through how the sample newsroom writes, edits and publishes its articles."
    );
    assert_eq!(signals.h1s, vec!["Sample Article"]);
    assert_eq!(signals.h2s, vec!["Background", "What happens next"]);
    assert_eq!(signals.images.total, 3);
    assert_eq!(signals.images.with_alt, 2);
    assert_eq!(signals.images.without_alt, 1);
    assert_eq!(signals.links.total, 6);
    assert_eq!(signals.links.internal, 4);
    assert_eq!(signals.links.external, 2);

    assert!(signals.content.starts_with("Sample Article"));
    assert!(signals.content.contains("first paragraph"));
    assert!(signals.content.contains("second paragraph"));
    assert!(!signals.content.contains("analytics"));
    assert!(!signals.content.contains("Subscribe"));
    assert!(!signals.content.contains("All rights reserved"));
    assert!(!signals.content.contains('\n'));
}

#[test]
fn test_extract_blog_post() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/blog.html")
        .expect("Failed to read test fixture");

    let signals = extract(&html, &url("https://blog.example.com/post"));

    // No <title>, so og:title wins
    assert_eq!(signals.title, "How to Build Better Software");
    assert_eq!(signals.meta_description, "Practical principles for building software that lasts.");
    assert_eq!(signals.h1s.len(), 2);
    assert!(signals.content.contains("Building better software"));
    assert!(signals.content.contains("Key Principles"));
    assert!(!signals.content.contains("Related posts"));
    assert_eq!(signals.images.total, 0);
}

#[test]
fn test_minimal_page() {
    let html = "<!DOCTYPE html><html><head></head><body></body></html>";
    let signals = extract(html, &url("https://example.com/"));

    assert_eq!(signals.title, "");
    assert_eq!(signals.meta_description, "");
    assert_eq!(signals.content, "");
    assert!(signals.h1s.is_empty());
    assert_eq!(signals.images.total, 0);
    assert_eq!(signals.links.total, 0);
    assert_eq!(signals.url.as_str(), "https://example.com/");
}

#[test]
fn test_malformed_html() {
    let html = "<html><head><title>Broken</title><body><p>Unclosed tags<div>More content<img alt='x'><a href='/x'>link";
    let signals = extract(html, &url("https://example.com/broken"));

    assert_eq!(signals.title, "Broken");
    assert!(signals.content.contains("Unclosed tags"));
    assert!(signals.content.contains("More content"));
    assert_eq!(signals.images.with_alt, 1);
    assert_eq!(signals.links.internal, 1);
}

#[test]
fn test_huge_page_is_capped() {
    let html = format!(
        "<html><body><main>{}</main></body></html>",
        "<p>lorem ipsum dolor sit amet</p>\n".repeat(5_000)
    );
    let signals = extract(&html, &url("https://example.com/long"));
    assert_eq!(signals.content.chars().count(), CONTENT_CAP);
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_invariants(
            html in ".*",
            path in "[a-z/]{0,12}",
        ) {
            let page = url(&format!("https://example.com/{path}"));
            let signals = extract(&html, &page);
            prop_assert_eq!(signals.images.with_alt + signals.images.without_alt, signals.images.total);
            prop_assert_eq!(
                signals.links.external,
                signals.links.total.saturating_sub(signals.links.internal)
            );
            prop_assert!(signals.content.chars().count() <= CONTENT_CAP);
            prop_assert!(signals.h1s.iter().all(|h| !h.is_empty() && h.trim() == h));
        }

        #[test]
        fn test_extract_tagged_markup(
            images in prop::collection::vec(prop::option::of("[ a-z]{0,6}"), 0..8),
            hrefs in prop::collection::vec("(/|#|https://other.org/|https://example.com/)[a-z]{0,5}", 0..12),
        ) {
            let mut html = String::from("<html><body>");
            for alt in &images {
                match alt {
                    Some(alt) => html.push_str(&format!(r#"<img src="i.png" alt="{alt}">"#)),
                    None => html.push_str(r#"<img src="i.png">"#),
                }
            }
            for href in &hrefs {
                html.push_str(&format!(r#"<a href="{href}">x</a>"#));
            }
            html.push_str("</body></html>");

            let signals = extract(&html, &url("https://example.com/"));
            let expected_with_alt = images
                .iter()
                .filter(|alt| alt.as_deref().is_some_and(|a| !a.trim().is_empty()))
                .count();
            prop_assert_eq!(signals.images.total, images.len());
            prop_assert_eq!(signals.images.with_alt, expected_with_alt);
            prop_assert_eq!(signals.links.total, hrefs.len());
            let expected_external = hrefs.iter().filter(|h| h.starts_with("https://other.org/")).count();
            prop_assert_eq!(signals.links.external, expected_external);
        }
    }
}
