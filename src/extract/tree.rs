//! Document tree produced by the section builder
//!
//! The tree is a strict forest in document order: a [`Document`] owns its
//! top-level [`Section`]s, each section owns its content blocks and nested
//! subsections.

use serde::{Deserialize, Serialize};

/// One harvested page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Page title (first `h1`), if the page had one
    pub title: Option<String>,

    /// Publication date text, if the page carried one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pubdate: Option<String>,

    /// Top-level sections (level 2 unless the page skips levels)
    pub sections: Vec<Section>,
}

impl Document {
    /// Returns true when no section was extracted
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of sections at every depth
    pub fn section_count(&self) -> usize {
        self.sections.iter().map(Section::section_count).sum()
    }
}

/// A heading-anchored part of the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub level: u8,
    pub content: Vec<ContentBlock>,
    pub subsections: Vec<Section>,
}

impl Section {
    pub fn new(heading: impl Into<String>, level: u8) -> Self {
        Self {
            heading: heading.into(),
            level,
            content: Vec::new(),
            subsections: Vec::new(),
        }
    }

    /// This section plus all of its descendants
    pub fn section_count(&self) -> usize {
        1 + self
            .subsections
            .iter()
            .map(Section::section_count)
            .sum::<usize>()
    }
}

/// An ordered unit of body content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Paragraph { text: String },
    List { ordered: bool, items: Vec<String> },
}

impl ContentBlock {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph { text: text.into() }
    }

    pub fn list(ordered: bool, items: Vec<String>) -> Self {
        Self::List { ordered, items }
    }
}
