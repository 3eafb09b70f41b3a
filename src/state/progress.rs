use crate::crawler::DiseaseLink;
use serde::{Deserialize, Serialize};

/// Running tally of one harvest run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlProgress {
    /// Number of targets selected for this run
    pub total: usize,

    pub successful: usize,

    pub failed: usize,

    /// Failed targets in the order they were attempted
    pub failed_list: Vec<DiseaseLink>,
}

impl CrawlProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record_success(&mut self) {
        self.successful += 1;
    }

    pub fn record_failure(&mut self, link: &DiseaseLink) {
        self.failed += 1;
        self.failed_list.push(link.clone());
    }

    /// Number of targets that reached a terminal state
    pub fn attempted(&self) -> usize {
        self.successful + self.failed
    }

    /// Targets never attempted (non-zero only after cancellation)
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.attempted())
    }
}
