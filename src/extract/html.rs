//! Page extraction on top of `scraper`
//!
//! Locates the article body of a leaf page and feeds its descendant elements
//! to the section builder. The body is the second element child of the first
//! `div.content`; the first child holds navigation chrome.

use crate::extract::builder::{NodeKind, SectionTreeBuilder, TaggedNode};
use crate::extract::tree::Document;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Errors raised while preparing extraction
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

/// Text of an element with every whitespace run collapsed to one space
fn collapsed_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

impl<'a> TaggedNode for ElementRef<'a> {
    fn kind(&self) -> NodeKind {
        NodeKind::from_tag(self.value().name())
    }

    fn text(&self) -> String {
        collapsed_text(self)
    }

    fn is_nested_in_block(&self) -> bool {
        self.ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| NodeKind::from_tag(ancestor.value().name()).is_block())
    }

    fn item_texts(&self) -> Vec<String> {
        self.children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name() == "li")
            .map(|item| collapsed_text(&item))
            .collect()
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Converts leaf-page markup into a [`Document`]
#[derive(Debug, Clone)]
pub struct PageExtractor {
    title: Selector,
    content: Selector,
    pubdate: Selector,
}

impl PageExtractor {
    /// Creates an extractor reading the publication date from `pubdate_selector`
    pub fn new(pubdate_selector: &str) -> Result<Self, ExtractError> {
        Ok(Self {
            title: parse_selector("h1")?,
            content: parse_selector("div.content")?,
            pubdate: parse_selector(pubdate_selector)?,
        })
    }

    /// Extracts the document from raw page markup
    ///
    /// A page without a usable content root still yields its title, with no
    /// sections.
    pub fn extract(&self, html: &str) -> Document {
        let page = Html::parse_document(html);

        let title = page
            .select(&self.title)
            .next()
            .map(|h1| collapsed_text(&h1))
            .filter(|s| !s.is_empty());

        let pubdate = page
            .select(&self.pubdate)
            .next()
            .map(|el| collapsed_text(&el))
            .filter(|s| !s.is_empty());

        let mut builder = SectionTreeBuilder::new(title);

        if let Some(root) = self.content_root(&page) {
            for node in root.descendants().filter_map(ElementRef::wrap) {
                if node.id() != root.id() {
                    builder.push(&node);
                }
            }
        }

        if builder.discarded() > 0 {
            tracing::debug!(
                "Dropped {} content block(s) preceding the first heading",
                builder.discarded()
            );
        }

        Document {
            pubdate,
            ..builder.finish()
        }
    }

    fn content_root<'a>(&self, page: &'a Html) -> Option<ElementRef<'a>> {
        page.select(&self.content)
            .next()?
            .children()
            .filter_map(ElementRef::wrap)
            .nth(1)
    }
}
