//! Crawler module for page discovery and harvesting
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry logic
//! - Index page parsing and link discovery
//! - Overall harvest coordination

mod coordinator;
mod discovery;
mod fetcher;
mod parser;

pub use coordinator::{run_crawl, Coordinator, CrawlOptions};
pub use discovery::{dedupe_links, DiseaseLink, LinkDiscoverer};
pub use fetcher::{
    build_http_client, FetchError, HttpSource, PageSource, RetryingFetcher, TransportError,
};
pub use parser::{is_leaf_href, parse_index_page};

use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Waits out the politeness delay
///
/// Returns `false` when `cancel` fired before the delay elapsed.
pub(crate) async fn polite_pause(delay: Duration, cancel: &CancellationToken) -> bool {
    if delay.is_zero() {
        return !cancel.is_cancelled();
    }

    tokio::select! {
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}
