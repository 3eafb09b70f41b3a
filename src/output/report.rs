//! Crawl report persistence
//!
//! One JSON object per run, rewritten after every item so an interrupted
//! process still leaves accurate progress on disk.

use crate::output::traits::OutputResult;
use crate::state::CrawlProgress;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Persisted summary of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlReport {
    /// Local time the report was written, `YYYY-mm-dd HH:MM:SS`
    pub timestamp: String,

    pub start_from: usize,

    pub progress: CrawlProgress,
}

impl CrawlReport {
    /// Creates a report stamped with the current local time
    pub fn new(start_from: usize, progress: CrawlProgress) -> Self {
        Self {
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            start_from,
            progress,
        }
    }

    /// Index a follow-up run should start from to skip attempted items
    pub fn resume_index(&self) -> usize {
        self.start_from + self.progress.attempted()
    }
}

/// Writes the report as pretty-printed JSON
///
/// The file is replaced atomically; readers never see a half-written report.
pub fn write_report(path: &Path, report: &CrawlReport) -> OutputResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(report)?;
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, json)?;
    fs::rename(&staging, path)?;

    Ok(())
}

/// Reads a report written by a previous run
pub fn read_report(path: &Path) -> OutputResult<CrawlReport> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
