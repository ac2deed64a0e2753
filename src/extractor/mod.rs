pub mod cleaner;
pub mod document;
pub mod model;
pub mod reader;

#[cfg(test)]
mod tests;

pub use document::{DocumentQuery, HtmlDocument};
pub use model::{CONTENT_CAP, ImageStats, LinkStats, PageSignals};

use url::Url;

/// Build the signal record for `markup` served from `final_url`.
///
/// Never fails: anything missing from the markup degrades to an empty
/// string or a zero count.
pub fn extract(markup: &str, final_url: &Url) -> PageSignals {
    let doc = HtmlDocument::parse(markup);
    extract_document(&doc, final_url)
}

pub fn extract_document(doc: &impl DocumentQuery, final_url: &Url) -> PageSignals {
    PageSignals {
        title: reader::read_title(doc),
        meta_description: reader::read_meta_description(doc),
        content: cleaner::clean_document(doc),
        h1s: reader::read_headings(doc, "h1"),
        h2s: reader::read_headings(doc, "h2"),
        images: reader::read_images(doc),
        links: reader::read_links(doc, final_url),
        url: final_url.clone(),
    }
}
