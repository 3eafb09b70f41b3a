//! Output handler traits and types
//!
//! This module defines the trait interface for document sinks and the
//! error type shared by every exporter.

use crate::crawler::DiseaseLink;
use crate::extract::Document;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to serialize YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Receives every document that was extracted with content
pub trait DocumentSink {
    /// Persists one document
    ///
    /// # Arguments
    ///
    /// * `link` - The link the document was harvested from
    /// * `document` - The extracted document (at least one section)
    ///
    /// # Returns
    ///
    /// The slug the artifacts were stored under
    fn save(&mut self, link: &DiseaseLink, document: &Document) -> OutputResult<String>;
}

impl<T: DocumentSink + ?Sized> DocumentSink for Box<T> {
    fn save(&mut self, link: &DiseaseLink, document: &Document) -> OutputResult<String> {
        (**self).save(link, document)
    }
}
