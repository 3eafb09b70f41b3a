//! Content extraction for leaf pages
//!
//! This module contains:
//! - The document tree types (`Document`, `Section`, `ContentBlock`)
//! - The stack-based section tree builder
//! - The `scraper` adapter that locates the article body of a page

mod builder;
mod html;
mod tree;

pub use builder::{build_document, MarkupNode, NodeKind, SectionTreeBuilder, TaggedNode};
pub use html::{ExtractError, PageExtractor};
pub use tree::{ContentBlock, Document, Section};
