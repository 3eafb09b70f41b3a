//! Harvest coordinator - main crawl orchestration logic
//!
//! This module contains the main harvest loop, which:
//! - Discovers leaf links once from the index pages
//! - Selects the requested window of links
//! - Fetches, extracts and saves each page in order
//! - Rewrites the crawl report after every item
//! - Stops at the next item boundary once cancelled

use crate::config::{validate, Config, SiteConfig};
use crate::crawler::discovery::{DiseaseLink, LinkDiscoverer};
use crate::crawler::fetcher::{HttpSource, PageSource, RetryingFetcher};
use crate::crawler::polite_pause;
use crate::extract::PageExtractor;
use crate::output::{write_report, CrawlReport, DocumentSink, FileExporter};
use crate::state::{CrawlProgress, ItemState};
use crate::url::printable_url;
use crate::HarvestError;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Number of failed items listed in the end-of-run summary
const SUMMARY_FAILURES: usize = 10;

/// Which discovered links to harvest, and how slowly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOptions {
    /// Index of the first discovered link to harvest
    pub start_from: usize,

    /// Maximum number of links to harvest; `None` means all remaining
    pub limit: Option<usize>,

    /// Politeness delay after every request
    pub delay: Duration,
}

impl CrawlOptions {
    /// Returns the window `[start_from, start_from + limit)` clamped to `links`
    pub fn select<'a, T>(&self, links: &'a [T]) -> &'a [T] {
        let start = self.start_from.min(links.len());
        let end = match self.limit {
            Some(limit) => start.saturating_add(limit).min(links.len()),
            None => links.len(),
        };
        &links[start..end]
    }
}

/// Main harvest coordinator
pub struct Coordinator<S, K> {
    fetcher: RetryingFetcher<S>,
    extractor: PageExtractor,
    sink: K,
    site: SiteConfig,
    report_path: PathBuf,
}

impl Coordinator<HttpSource, FileExporter> {
    /// Creates a coordinator that fetches over HTTP and writes files
    ///
    /// The output directories are created here.
    pub fn from_config(config: &Config) -> Result<Self, HarvestError> {
        validate(config)?;

        let source = HttpSource::from_config(&config.crawler)?;
        let fetcher = RetryingFetcher::new(
            source,
            config.crawler.max_retries,
            config.crawler.delay(),
        );
        let sink = FileExporter::create(&config.output.directory, &config.site.leaf_namespace)?;

        Coordinator::new(fetcher, sink, config.site.clone(), config.output.report_path())
    }
}

impl<S: PageSource, K: DocumentSink> Coordinator<S, K> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Retrying fetcher used for index and leaf pages
    /// * `sink` - Receives every document with content
    /// * `site` - Addressing of the harvested site
    /// * `report_path` - Where the crawl report is written
    pub fn new(
        fetcher: RetryingFetcher<S>,
        sink: K,
        site: SiteConfig,
        report_path: impl Into<PathBuf>,
    ) -> Result<Self, HarvestError> {
        let extractor = PageExtractor::new(&site.pubdate_selector)?;

        Ok(Self {
            fetcher,
            extractor,
            sink,
            site,
            report_path: report_path.into(),
        })
    }

    pub fn fetcher(&self) -> &RetryingFetcher<S> {
        &self.fetcher
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn report_path(&self) -> &Path {
        &self.report_path
    }

    /// Runs one harvest
    ///
    /// Items are processed strictly in order, one at a time. A failing item
    /// is recorded and never aborts the run. The report is rewritten after
    /// every item and once more at the end.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlProgress)` - Final counters, also when cancelled
    /// * `Err(HarvestError)` - Setup failed or the final report could not be written
    pub async fn run(
        &mut self,
        options: &CrawlOptions,
        cancel: &CancellationToken,
    ) -> Result<CrawlProgress, HarvestError> {
        let links = LinkDiscoverer::new(&self.fetcher, &self.site, options.delay)?
            .discover(self.site.keys(), cancel)
            .await;

        let targets = options.select(&links);
        let mut progress = CrawlProgress::new(targets.len());
        let last_position = options.start_from + targets.len();

        tracing::info!(
            "Starting harvest of {} page(s) (links {}..{} of {})",
            targets.len(),
            options.start_from,
            last_position,
            links.len()
        );
        tracing::info!("Delay between requests: {:?}", options.delay);

        for (offset, link) in targets.iter().enumerate() {
            if cancel.is_cancelled() {
                break;
            }

            let position = options.start_from + offset + 1;
            tracing::info!("[{}/{}] Harvesting: {}", position, last_position, link.name);

            match self.process(link).await {
                Ok(state) if state.is_success() => progress.record_success(),
                Ok(state) => {
                    tracing::debug!("{} finished as {}", link.name, state);
                    progress.record_failure(link);
                }
                Err(e) => {
                    tracing::warn!("Unexpected error harvesting {}: {}", link.name, e);
                    progress.record_failure(link);
                }
            }

            self.checkpoint(options.start_from, &progress);

            if !polite_pause(options.delay, cancel).await {
                break;
            }
        }

        let report = CrawlReport::new(options.start_from, progress.clone());
        write_report(&self.report_path, &report)?;

        log_summary(&report, cancel.is_cancelled(), &self.report_path);

        Ok(progress)
    }

    /// Fetches, extracts and saves one leaf page, returning its terminal state
    async fn process(&mut self, link: &DiseaseLink) -> Result<ItemState, HarvestError> {
        let state = ItemState::Pending.transition_to(ItemState::Fetching)?;

        let url = printable_url(&link.url, &self.site.print_query);
        let body = match self.fetcher.fetch(&url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Error harvesting {}: {}", link.name, e);
                return state.transition_to(ItemState::FetchFailed);
            }
        };

        let state = state.transition_to(ItemState::Extracted)?;
        let document = self.extractor.extract(&body);
        if document.is_empty() {
            tracing::warn!("No content found for {}", link.name);
            return state.transition_to(ItemState::NoContent);
        }

        match self.sink.save(link, &document) {
            Ok(slug) => {
                tracing::info!(
                    "Saved {} ({} section(s)) as {}",
                    link.name,
                    document.section_count(),
                    slug
                );
                state.transition_to(ItemState::Saved)
            }
            Err(e) => {
                tracing::warn!("Failed to save {}: {}", link.name, e);
                state.transition_to(ItemState::SaveFailed)
            }
        }
    }

    /// Persists intermediate progress; a failed write only warns
    fn checkpoint(&self, start_from: usize, progress: &CrawlProgress) {
        let report = CrawlReport::new(start_from, progress.clone());
        if let Err(e) = write_report(&self.report_path, &report) {
            tracing::warn!(
                "Failed to update report {}: {}",
                self.report_path.display(),
                e
            );
        }
    }
}

fn log_summary(report: &CrawlReport, cancelled: bool, report_path: &Path) {
    let progress = &report.progress;

    if cancelled && progress.remaining() > 0 {
        tracing::warn!(
            "Harvest interrupted; resume with --start {}",
            report.resume_index()
        );
    }

    tracing::info!("=== Harvest summary ===");
    tracing::info!("Total: {}", progress.total);
    tracing::info!("Successful: {}", progress.successful);
    tracing::info!("Failed: {}", progress.failed);

    if !progress.failed_list.is_empty() {
        tracing::info!("Failed items:");
        for link in progress.failed_list.iter().take(SUMMARY_FAILURES) {
            tracing::info!("  - {}: {}", link.name, link.url);
        }
        if progress.failed_list.len() > SUMMARY_FAILURES {
            tracing::info!(
                "  ... and {} more",
                progress.failed_list.len() - SUMMARY_FAILURES
            );
        }
    }

    tracing::info!("Report saved to {}", report_path.display());
}

/// Runs a complete harvest with the HTTP source and file exporter
///
/// This is the main entry point for starting a harvest.
pub async fn run_crawl(
    config: &Config,
    options: &CrawlOptions,
    cancel: &CancellationToken,
) -> Result<CrawlProgress, HarvestError> {
    let mut coordinator = Coordinator::from_config(config)?;
    coordinator.run(options, cancel).await
}
