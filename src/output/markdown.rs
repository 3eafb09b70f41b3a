//! Markdown rendering of harvested documents
//!
//! The title becomes a level-1 heading. Top-level sections render at depth 2
//! and each nesting step adds one, whatever the source heading level was.

use crate::extract::{ContentBlock, Document, Section};
use crate::output::traits::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Heading depth of top-level sections
const TOP_SECTION_DEPTH: usize = 2;

/// Writes the markdown rendering of `document` to `output_path`
pub fn write_markdown(document: &Document, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown(document);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a document as markdown
///
/// # Example
///
/// ```
/// use medref_harvest::extract::{ContentBlock, Document, Section};
/// use medref_harvest::output::format_markdown;
///
/// let mut overview = Section::new("Overview", 2);
/// overview.content.push(ContentBlock::paragraph("Intro text"));
/// let document = Document {
///     title: Some("Demo".to_string()),
///     pubdate: None,
///     sections: vec![overview],
/// };
///
/// assert_eq!(format_markdown(&document), "# Demo\n\n## Overview\n\nIntro text\n");
/// ```
pub fn format_markdown(document: &Document) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(title) = &document.title {
        lines.push(format!("# {}\n", title));
    }

    for section in &document.sections {
        push_section(&mut lines, section, TOP_SECTION_DEPTH);
    }

    lines.join("\n")
}

fn push_section(lines: &mut Vec<String>, section: &Section, depth: usize) {
    if !section.heading.is_empty() {
        lines.push(format!("{} {}\n", "#".repeat(depth), section.heading));
    }

    for block in &section.content {
        match block {
            ContentBlock::Paragraph { text } => lines.push(format!("{}\n", text)),
            ContentBlock::List { ordered, items } => {
                for (idx, item) in items.iter().enumerate() {
                    if *ordered {
                        lines.push(format!("{}. {}", idx + 1, item));
                    } else {
                        lines.push(format!("- {}", item));
                    }
                }
                // Blank line after a list
                lines.push(String::new());
            }
        }
    }

    for subsection in &section.subsections {
        push_section(lines, subsection, depth + 1);
    }
}
