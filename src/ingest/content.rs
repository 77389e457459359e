//! Article body extraction
//!
//! Walks the content region of an article page and turns it into plain text,
//! one paragraph per block element, paragraphs separated by a blank line.

use crate::ingest::error::IngestError;
use crate::listing::resolve_url;
use scraper::{ElementRef, Html, Node, Selector};

/// Body used when the content region cannot be found
pub const CONTENT_NOT_FOUND: &str = "Content not found";

const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption", "figure",
    "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p",
    "section", "table", "tr", "ul",
];

const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "svg", "button"];

/// What was read from an article page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleContent {
    /// Plain-text body, `None` when the region was missing or empty
    pub body: Option<String>,

    /// `og:image` of the page, resolved against the page URL
    pub og_image: Option<String>,
}

/// Reads article pages with a fixed content selector
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    content: Selector,
    og_image: Selector,
}

impl ContentExtractor {
    /// Create an extractor for the given content region selector
    pub fn new(content_selector: &str) -> Result<Self, IngestError> {
        let content = Selector::parse(content_selector).map_err(|e| IngestError::Selector {
            selector: content_selector.to_string(),
            message: e.to_string(),
        })?;
        let og_image = Selector::parse("meta[property='og:image']").map_err(|e| {
            IngestError::Selector {
                selector: "meta[property='og:image']".to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(Self { content, og_image })
    }

    /// Extract the body text and header image of a page
    pub fn read(&self, page_url: &str, html: &str) -> ArticleContent {
        let document = Html::parse_document(html);

        let body = document
            .select(&self.content)
            .next()
            .map(element_text)
            .filter(|text| !text.is_empty());

        let og_image = document
            .select(&self.og_image)
            .next()
            .and_then(|element| element.value().attr("content"))
            .and_then(|src| resolve_url(page_url, src.trim()));

        ArticleContent { body, og_image }
    }
}

#[derive(Default)]
struct TextCollector {
    paragraphs: Vec<String>,
    current: String,
}

impl TextCollector {
    fn flush(&mut self) {
        let paragraph = self
            .current
            .split('\n')
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        if !paragraph.is_empty() {
            self.paragraphs.push(paragraph);
        }
        self.current.clear();
    }

    fn push_preformatted(&mut self, element: ElementRef) {
        self.flush();
        let text: String = element.text().collect();
        let text = text.trim_matches('\n').trim_end();
        if !text.is_empty() {
            self.paragraphs.push(text.to_string());
        }
    }

    fn walk(&mut self, element: ElementRef) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => {
                    // Newlines in source HTML are just whitespace
                    self.current.push_str(&text.replace('\n', " "));
                }
                Node::Element(el) => {
                    let Some(child_ref) = ElementRef::wrap(child) else {
                        continue;
                    };
                    let name = el.name();
                    if SKIPPED_ELEMENTS.contains(&name) {
                        continue;
                    }
                    if name == "br" {
                        self.current.push('\n');
                    } else if name == "pre" {
                        self.push_preformatted(child_ref);
                    } else if BLOCK_ELEMENTS.contains(&name) {
                        self.flush();
                        self.walk(child_ref);
                        self.flush();
                    } else {
                        self.walk(child_ref);
                    }
                }
                _ => {}
            }
        }
    }
}

/// Plain text of an element, paragraphs separated by blank lines
pub fn element_text(element: ElementRef) -> String {
    let mut collector = TextCollector::default();
    collector.walk(element);
    collector.flush();
    collector.paragraphs.join("\n\n")
}
