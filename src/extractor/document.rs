//! Document queries used by the reader and the cleaner.
//!
//! Extraction logic only talks to [`DocumentQuery`], so the HTML parser
//! behind it can be swapped without touching the extraction rules.

use scraper::{ElementRef, Html, Node, Selector};

/// Read-only queries over a parsed document. Selectors use CSS syntax
/// (`h1`, `meta[property="og:title"]`, `#content`); an unparseable selector
/// matches nothing.
pub trait DocumentQuery {
    /// Trimmed text of every matching element, in document order.
    fn texts(&self, selector: &str) -> Vec<String>;

    /// The `attr` value of every matching element, `None` where the element
    /// lacks the attribute.
    fn attributes(&self, selector: &str, attr: &str) -> Vec<Option<String>>;

    /// Raw text of the first matching element that is not nested in an
    /// `excluded` tag, leaving out text inside `excluded` descendants.
    fn text_without(&self, selector: &str, excluded: &[&str]) -> Option<String>;

    /// First non-blank `attr` value among matching elements, trimmed.
    fn first_attribute(&self, selector: &str, attr: &str) -> Option<String> {
        self.attributes(selector, attr)
            .into_iter()
            .flatten()
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
    }

    /// First non-blank text among matching elements.
    fn first_text(&self, selector: &str) -> Option<String> {
        self.texts(selector).into_iter().find(|text| !text.is_empty())
    }
}

/// [`DocumentQuery`] over a `scraper` DOM.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// html5ever recovers from any malformed input, so parsing cannot fail.
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    fn select<'a>(&'a self, selector: &str) -> Vec<ElementRef<'a>> {
        match Selector::parse(selector) {
            Ok(selector) => self.html.select(&selector).collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Elements that break the text flow; inline elements such as `a` or `em` do not.
const BLOCK_TAGS: [&str; 33] = [
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

fn is_block(node: &Node) -> bool {
    node.as_element()
        .is_some_and(|element| BLOCK_TAGS.contains(&element.name()))
}

fn is_excluded(node: &Node, excluded: &[&str]) -> bool {
    node.as_element()
        .is_some_and(|element| excluded.contains(&element.name()))
}

impl DocumentQuery for HtmlDocument {
    fn texts(&self, selector: &str) -> Vec<String> {
        self.select(selector)
            .into_iter()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .collect()
    }

    fn attributes(&self, selector: &str, attr: &str) -> Vec<Option<String>> {
        self.select(selector)
            .into_iter()
            .map(|element| element.value().attr(attr).map(str::to_string))
            .collect()
    }

    fn text_without(&self, selector: &str, excluded: &[&str]) -> Option<String> {
        let root = self
            .select(selector)
            .into_iter()
            .find(|element| !element.ancestors().any(|a| is_excluded(a.value(), excluded)))?;

        let mut text = String::new();
        let mut boundary = false;
        let mut last_block = None;
        for node in root.descendants() {
            let chunk = match node.value() {
                Node::Text(chunk) => chunk,
                other => {
                    boundary |= is_block(other);
                    continue;
                }
            };
            let hidden = node
                .ancestors()
                .take_while(|ancestor| ancestor.id() != root.id())
                .any(|ancestor| is_excluded(ancestor.value(), excluded));
            if hidden {
                continue;
            }

            // Text under a different block than the previous run starts a new word.
            let block = node
                .ancestors()
                .find(|ancestor| ancestor.id() == root.id() || is_block(ancestor.value()))
                .map(|ancestor| ancestor.id());
            boundary |= last_block.is_some_and(|last| Some(last) != block);
            if boundary && !text.is_empty() && !text.ends_with(char::is_whitespace) {
                text.push(' ');
            }
            boundary = false;
            last_block = block;
            text.push_str(chunk);
        }
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head>
        <title> Sample </title>
        <meta name="description" content="  ">
        <meta property="og:description" content="From OG">
        </head><body>
        <h1>  One </h1><h1></h1>
        <main><p>Visible</p><script>var hidden = 1;</script><nav>Menu</nav></main>
        </body></html>"#;

    #[test]
    fn texts_are_trimmed_and_ordered() {
        let doc = HtmlDocument::parse(PAGE);
        assert_eq!(doc.texts("h1"), vec!["One".to_string(), String::new()]);
        assert_eq!(doc.first_text("head > title").as_deref(), Some("Sample"));
    }

    #[test]
    fn blank_attributes_are_skipped() {
        let doc = HtmlDocument::parse(PAGE);
        assert_eq!(doc.first_attribute(r#"meta[name="description"]"#, "content"), None);
        assert_eq!(
            doc.first_attribute(r#"meta[property="og:description"]"#, "content")
                .as_deref(),
            Some("From OG")
        );
    }

    #[test]
    fn excluded_descendants_are_left_out() {
        let doc = HtmlDocument::parse(PAGE);
        let text = doc.text_without("main", &["script", "nav"]).unwrap();
        assert!(text.contains("Visible"));
        assert!(!text.contains("hidden"));
        assert!(!text.contains("Menu"));
    }

    #[test]
    fn inline_markup_does_not_split_words() {
        let doc = HtmlDocument::parse(
            "<body><p>Read the <a href='/g'>guide</a>, the <b>docs</b>. Opti<em>mix</em> rocks</p></body>",
        );
        assert_eq!(
            doc.text_without("body", &[]).as_deref(),
            Some("Read the guide, the docs. Optimix rocks")
        );
    }

    #[test]
    fn block_edges_separate_words() {
        let doc = HtmlDocument::parse(
            "<body><div><p>First</p>after<ul><li>one</li><li>two</li></ul>line<br>break</div></body>",
        );
        assert_eq!(
            doc.text_without("body", &[]).as_deref(),
            Some("First after one two line break")
        );
    }

    #[test]
    fn roots_inside_excluded_elements_are_ignored() {
        let doc = HtmlDocument::parse("<body><header><main>Chrome</main></header><p>Body</p></body>");
        assert_eq!(doc.text_without("main", &["header"]), None);
    }

    #[test]
    fn invalid_selector_matches_nothing() {
        let doc = HtmlDocument::parse(PAGE);
        assert!(doc.texts("h1[").is_empty());
        assert_eq!(doc.text_without("::nope", &[]), None);
    }
}
