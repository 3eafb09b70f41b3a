//! Output module for exporting harvested documents and run reports
//!
//! This module handles:
//! - Rendering documents as markdown and YAML
//! - Writing per-item artifact files
//! - Persisting the crawl report

mod files;
mod markdown;
mod report;
mod traits;
mod yaml;

pub use files::FileExporter;
pub use markdown::{format_markdown, write_markdown};
pub use report::{read_report, write_report, CrawlReport};
pub use traits::{DocumentSink, OutputError, OutputResult};
pub use yaml::{format_yaml, write_yaml};
