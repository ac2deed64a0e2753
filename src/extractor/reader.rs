use url::Url;

use crate::extractor::document::DocumentQuery;
use crate::extractor::model::{ImageStats, LinkStats};

/// `<title>`, then `og:title`, then the first H1.
pub fn read_title(doc: &impl DocumentQuery) -> String {
    doc.first_text("head > title")
        .or_else(|| doc.first_attribute(r#"meta[property="og:title"]"#, "content"))
        .or_else(|| doc.first_text("h1"))
        .unwrap_or_default()
}

pub fn read_meta_description(doc: &impl DocumentQuery) -> String {
    [
        r#"meta[name="description"]"#,
        r#"meta[property="og:description"]"#,
        r#"meta[name="twitter:description"]"#,
    ]
    .into_iter()
    .find_map(|selector| doc.first_attribute(selector, "content"))
    .unwrap_or_default()
}

/// Non-empty heading texts in document order.
pub fn read_headings(doc: &impl DocumentQuery, tag: &str) -> Vec<String> {
    doc.texts(tag)
        .into_iter()
        .filter(|text| !text.is_empty())
        .collect()
}

pub fn read_images(doc: &impl DocumentQuery) -> ImageStats {
    let alts = doc.attributes("img", "alt");
    let with_alt = alts
        .iter()
        .filter(|alt| alt.as_deref().is_some_and(|alt| !alt.trim().is_empty()))
        .count();
    ImageStats::new(alts.len(), with_alt)
}

pub fn read_links(doc: &impl DocumentQuery, page_url: &Url) -> LinkStats {
    let hrefs = doc.attributes("a", "href");
    let internal = hrefs
        .iter()
        .filter(|href| {
            href.as_deref()
                .is_some_and(|href| is_internal_link(href.trim(), page_url))
        })
        .count();
    LinkStats::new(hrefs.len(), internal)
}

/// Same host once resolved against the page, or a raw href starting with
/// `/`, `./` or `#`. The prefix rule also covers protocol-relative `//host`.
fn is_internal_link(href: &str, page_url: &Url) -> bool {
    if href.starts_with('/') || href.starts_with("./") || href.starts_with('#') {
        return true;
    }

    match (page_url.join(href), page_url.host_str()) {
        (Ok(resolved), Some(page_host)) => resolved
            .host_str()
            .is_some_and(|host| host.eq_ignore_ascii_case(page_host)),
        _ => false,
    }
}
