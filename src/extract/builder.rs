//! Section tree builder
//!
//! Turns the flat, depth-first stream of elements under a page's content
//! root into a nested [`Document`]. The builder keeps an explicit stack of
//! open sections; a heading closes every open section at the same or a
//! deeper level before opening its own, and block content always lands in
//! the innermost open section.

use crate::extract::tree::{ContentBlock, Document, Section};

/// Smallest and largest heading levels that open a section
const MIN_LEVEL: u8 = 2;
const MAX_LEVEL: u8 = 4;

/// Kind of a markup node as seen by the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Heading(u8),
    Paragraph,
    OrderedList,
    UnorderedList,
    ListItem,
    Other,
}

impl NodeKind {
    /// Maps an (already lower-cased) element name to its kind
    pub fn from_tag(name: &str) -> Self {
        match name {
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "p" => Self::Paragraph,
            "ol" => Self::OrderedList,
            "ul" => Self::UnorderedList,
            "li" => Self::ListItem,
            _ => Self::Other,
        }
    }

    /// Block nodes become content blocks; nested blocks are skipped
    pub fn is_block(self) -> bool {
        matches!(self, Self::Paragraph | Self::OrderedList | Self::UnorderedList)
    }
}

/// A node of the parsed page, in document order
///
/// Implemented for live `scraper` elements and for owned fixtures, so the
/// builder never depends on a particular parser.
pub trait TaggedNode {
    fn kind(&self) -> NodeKind;

    /// Whitespace-normalized text of the node and its descendants
    fn text(&self) -> String;

    /// True when any enclosing element is itself a block node
    fn is_nested_in_block(&self) -> bool;

    /// Text of each direct `li` child, in order
    fn item_texts(&self) -> Vec<String>;
}

impl<N: TaggedNode + ?Sized> TaggedNode for &N {
    fn kind(&self) -> NodeKind {
        (**self).kind()
    }

    fn text(&self) -> String {
        (**self).text()
    }

    fn is_nested_in_block(&self) -> bool {
        (**self).is_nested_in_block()
    }

    fn item_texts(&self) -> Vec<String> {
        (**self).item_texts()
    }
}

/// Incremental builder for one [`Document`]
#[derive(Debug, Default)]
pub struct SectionTreeBuilder {
    title: Option<String>,
    sections: Vec<Section>,
    open: Vec<Section>,
    discarded: usize,
}

impl SectionTreeBuilder {
    pub fn new(title: Option<String>) -> Self {
        Self {
            title,
            ..Self::default()
        }
    }

    /// Feeds the next node of the stream
    pub fn push<N: TaggedNode>(&mut self, node: &N) {
        match node.kind() {
            NodeKind::Heading(level) if (MIN_LEVEL..=MAX_LEVEL).contains(&level) => {
                self.open_section(node.text(), level);
            }
            kind if kind.is_block() && !node.is_nested_in_block() => {
                if let Some(block) = content_block(kind, node) {
                    self.attach(block);
                }
            }
            _ => {}
        }
    }

    /// Number of content blocks dropped because no heading had opened yet
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Closes every open section and returns the finished tree
    pub fn finish(mut self) -> Document {
        while !self.open.is_empty() {
            self.close_innermost();
        }

        Document {
            title: self.title,
            pubdate: None,
            sections: self.sections,
        }
    }

    fn open_section(&mut self, heading: String, level: u8) {
        while self.open.last().is_some_and(|s| s.level >= level) {
            self.close_innermost();
        }
        self.open.push(Section::new(heading, level));
    }

    fn close_innermost(&mut self) {
        if let Some(closed) = self.open.pop() {
            match self.open.last_mut() {
                Some(parent) => parent.subsections.push(closed),
                None => self.sections.push(closed),
            }
        }
    }

    fn attach(&mut self, block: ContentBlock) {
        match self.open.last_mut() {
            Some(section) => section.content.push(block),
            // The document root holds no content of its own
            None => self.discarded += 1,
        }
    }
}

fn content_block<N: TaggedNode>(kind: NodeKind, node: &N) -> Option<ContentBlock> {
    match kind {
        NodeKind::Paragraph => {
            let text = node.text();
            (!text.is_empty()).then(|| ContentBlock::paragraph(text))
        }
        NodeKind::OrderedList | NodeKind::UnorderedList => {
            let items = node.item_texts();
            (!items.is_empty()).then(|| ContentBlock::list(kind == NodeKind::OrderedList, items))
        }
        _ => None,
    }
}

/// Builds a [`Document`] from a node stream
///
/// Pure and deterministic: the same stream and title always yield the same
/// tree.
///
/// # Example
///
/// ```
/// use medref_harvest::extract::{build_document, MarkupNode};
///
/// let nodes = vec![
///     MarkupNode::heading(2, "Overview"),
///     MarkupNode::paragraph("Intro text"),
/// ];
/// let document = build_document(&nodes, Some("Demo".to_string()));
/// assert_eq!(document.sections[0].heading, "Overview");
/// ```
pub fn build_document<I>(nodes: I, title: Option<String>) -> Document
where
    I: IntoIterator,
    I::Item: TaggedNode,
{
    let mut builder = SectionTreeBuilder::new(title);
    for node in nodes {
        builder.push(&node);
    }
    builder.finish()
}

/// Owned node, used to feed the builder without a parsed page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupNode {
    pub kind: NodeKind,
    pub text: String,
    pub nested_in_block: bool,
    pub items: Vec<String>,
}

impl MarkupNode {
    pub fn new(kind: NodeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            nested_in_block: false,
            items: Vec::new(),
        }
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::new(NodeKind::Heading(level), text)
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Paragraph, text)
    }

    pub fn list<S: Into<String>>(ordered: bool, items: impl IntoIterator<Item = S>) -> Self {
        let kind = if ordered {
            NodeKind::OrderedList
        } else {
            NodeKind::UnorderedList
        };
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        Self {
            text: items.join(" "),
            items,
            ..Self::new(kind, "")
        }
    }

    /// Marks the node as enclosed by another block node
    pub fn nested(mut self) -> Self {
        self.nested_in_block = true;
        self
    }
}

impl TaggedNode for MarkupNode {
    fn kind(&self) -> NodeKind {
        self.kind
    }

    fn text(&self) -> String {
        self.text.trim().to_string()
    }

    fn is_nested_in_block(&self) -> bool {
        self.nested_in_block
    }

    fn item_texts(&self) -> Vec<String> {
        self.items.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_levels_nest(sections: &[Section], parent_level: u8) {
        for section in sections {
            assert!(section.level >= MIN_LEVEL);
            assert!(
                section.level > parent_level,
                "{} (level {}) nested under level {}",
                section.heading,
                section.level,
                parent_level
            );
            assert_levels_nest(&section.subsections, section.level);
        }
    }

    #[test]
    fn test_overview_detail_outlook() {
        let nodes = vec![
            MarkupNode::heading(2, "Overview"),
            MarkupNode::paragraph("Intro text"),
            MarkupNode::heading(3, "Detail"),
            MarkupNode::paragraph("More text"),
            MarkupNode::heading(2, "Outlook"),
        ];

        let document = build_document(&nodes, Some("Demo".to_string()));

        let mut overview = Section::new("Overview", 2);
        overview.content.push(ContentBlock::paragraph("Intro text"));
        let mut detail = Section::new("Detail", 3);
        detail.content.push(ContentBlock::paragraph("More text"));
        overview.subsections.push(detail);

        let expected = Document {
            title: Some("Demo".to_string()),
            pubdate: None,
            sections: vec![overview, Section::new("Outlook", 2)],
        };
        assert_eq!(document, expected);
    }

    #[test]
    fn test_unordered_list_under_heading() {
        let nodes = vec![
            MarkupNode::heading(2, "Symptoms"),
            MarkupNode::list(false, ["Fever", "Fatigue"]),
        ];

        let document = build_document(&nodes, None);

        assert_eq!(document.sections.len(), 1);
        assert_eq!(
            document.sections[0].content,
            vec![ContentBlock::list(
                false,
                vec!["Fever".to_string(), "Fatigue".to_string()]
            )]
        );
    }

    #[test]
    fn test_ordered_list_and_paragraph_keep_relative_order() {
        let nodes = vec![
            MarkupNode::heading(2, "Treatment"),
            MarkupNode::paragraph("Steps:"),
            MarkupNode::list(true, ["Rest", "Fluids"]),
            MarkupNode::paragraph("See a doctor if it persists."),
        ];

        let document = build_document(&nodes, None);
        let content = &document.sections[0].content;

        assert_eq!(content.len(), 3);
        assert!(matches!(content[0], ContentBlock::Paragraph { .. }));
        assert!(matches!(content[1], ContentBlock::List { ordered: true, .. }));
        assert!(matches!(content[2], ContentBlock::Paragraph { .. }));
    }

    #[test]
    fn test_same_level_headings_are_siblings() {
        let nodes = vec![
            MarkupNode::heading(2, "Causes"),
            MarkupNode::heading(3, "Risk factors"),
            MarkupNode::heading(3, "Risk factors"),
            MarkupNode::heading(4, "Age"),
            MarkupNode::heading(3, "Complications"),
        ];

        let document = build_document(&nodes, None);
        let causes = &document.sections[0];

        assert_eq!(document.sections.len(), 1);
        assert_eq!(causes.subsections.len(), 3);
        // Identical headings are not merged
        assert_eq!(causes.subsections[0].heading, "Risk factors");
        assert_eq!(causes.subsections[1].heading, "Risk factors");
        assert_eq!(causes.subsections[1].subsections[0].heading, "Age");
        assert_eq!(causes.subsections[2].heading, "Complications");
    }

    #[test]
    fn test_skipped_level_nests_under_nearest_shallower() {
        let nodes = vec![
            MarkupNode::heading(2, "Diagnosis"),
            MarkupNode::heading(4, "Blood tests"),
            MarkupNode::heading(3, "Imaging"),
        ];

        let document = build_document(&nodes, None);
        let diagnosis = &document.sections[0];

        assert_eq!(diagnosis.subsections.len(), 2);
        assert_eq!(diagnosis.subsections[0].level, 4);
        assert_eq!(diagnosis.subsections[1].level, 3);
        assert_levels_nest(&document.sections, 1);
    }

    #[test]
    fn test_deeper_heading_first_becomes_top_level() {
        let nodes = vec![
            MarkupNode::heading(3, "Orphan"),
            MarkupNode::heading(2, "Overview"),
        ];

        let document = build_document(&nodes, None);

        assert_eq!(document.sections.len(), 2);
        assert_eq!(document.sections[0].level, 3);
        assert_levels_nest(&document.sections, 1);
    }

    #[test]
    fn test_nesting_invariant_on_mixed_stream() {
        let levels = [2, 4, 3, 4, 4, 2, 3, 2, 4, 4, 3, 3, 2];
        let nodes: Vec<MarkupNode> = levels
            .iter()
            .enumerate()
            .map(|(i, level)| MarkupNode::heading(*level, format!("h{}", i)))
            .collect();

        let document = build_document(&nodes, None);

        assert_levels_nest(&document.sections, 1);
        assert_eq!(document.section_count(), levels.len());
    }

    #[test]
    fn test_build_is_deterministic() {
        let nodes = vec![
            MarkupNode::heading(2, "Overview"),
            MarkupNode::paragraph("Intro"),
            MarkupNode::list(true, ["a", "b"]),
            MarkupNode::heading(3, "Detail"),
            MarkupNode::heading(2, "Outlook"),
        ];

        let first = build_document(&nodes, Some("Demo".to_string()));
        let second = build_document(&nodes, Some("Demo".to_string()));

        assert_eq!(first, second);
    }

    #[test]
    fn test_content_before_first_heading_is_discarded() {
        let nodes = vec![
            MarkupNode::paragraph("Preamble"),
            MarkupNode::heading(2, "Overview"),
            MarkupNode::paragraph("Body"),
        ];

        let mut builder = SectionTreeBuilder::new(None);
        for node in &nodes {
            builder.push(node);
        }
        assert_eq!(builder.discarded(), 1);

        let document = builder.finish();
        assert_eq!(
            document.sections[0].content,
            vec![ContentBlock::paragraph("Body")]
        );
    }

    #[test]
    fn test_page_without_headings_has_no_sections() {
        let nodes = vec![
            MarkupNode::paragraph("Just text"),
            MarkupNode::list(false, ["loose"]),
        ];

        let document = build_document(&nodes, Some("Title".to_string()));

        assert!(document.is_empty());
        assert_eq!(document.title.as_deref(), Some("Title"));
    }

    #[test]
    fn test_empty_blocks_are_skipped() {
        let nodes = vec![
            MarkupNode::heading(2, "Overview"),
            MarkupNode::paragraph("   "),
            MarkupNode::list(false, Vec::<String>::new()),
        ];

        let document = build_document(&nodes, None);

        assert!(document.sections[0].content.is_empty());
    }

    #[test]
    fn test_nested_blocks_are_skipped() {
        let nodes = vec![
            MarkupNode::heading(2, "Prevention"),
            MarkupNode::list(false, ["Wash hands", "Vaccinate"]),
            MarkupNode::new(NodeKind::ListItem, "Wash hands"),
            MarkupNode::paragraph("Wash hands").nested(),
            MarkupNode::list(false, ["inner"]).nested(),
        ];

        let document = build_document(&nodes, None);

        assert_eq!(document.sections[0].content.len(), 1);
    }

    #[test]
    fn test_out_of_range_headings_are_ignored() {
        let nodes = vec![
            MarkupNode::heading(1, "Page title"),
            MarkupNode::heading(2, "Overview"),
            MarkupNode::heading(5, "Too deep"),
            MarkupNode::paragraph("Body"),
        ];

        let document = build_document(&nodes, None);

        assert_eq!(document.section_count(), 1);
        assert_eq!(
            document.sections[0].content,
            vec![ContentBlock::paragraph("Body")]
        );
    }

    #[test]
    fn test_node_kind_from_tag() {
        assert_eq!(NodeKind::from_tag("h2"), NodeKind::Heading(2));
        assert_eq!(NodeKind::from_tag("h4"), NodeKind::Heading(4));
        assert_eq!(NodeKind::from_tag("h1"), NodeKind::Other);
        assert_eq!(NodeKind::from_tag("ol"), NodeKind::OrderedList);
        assert_eq!(NodeKind::from_tag("div"), NodeKind::Other);
        assert!(NodeKind::from_tag("p").is_block());
        assert!(!NodeKind::from_tag("li").is_block());
    }
}
