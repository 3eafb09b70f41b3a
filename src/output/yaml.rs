//! YAML export of harvested documents

use crate::extract::Document;
use crate::output::traits::OutputResult;
use std::fs;
use std::path::Path;

pub fn format_yaml(document: &Document) -> OutputResult<String> {
    Ok(serde_yaml::to_string(document)?)
}

/// Writes the YAML rendering of `document` to `output_path`
pub fn write_yaml(document: &Document, output_path: &Path) -> OutputResult<()> {
    fs::write(output_path, format_yaml(document)?)?;
    Ok(())
}
