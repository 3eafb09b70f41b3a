//! Link discovery across the A-Z index pages
//!
//! Each index key (one letter) names one index page. A failing page is
//! logged and skipped; the remaining keys are still walked. The politeness
//! delay follows every index request, failed or not.

use crate::config::SiteConfig;
use crate::crawler::fetcher::{PageSource, RetryingFetcher};
use crate::crawler::parser::parse_index_page;
use crate::crawler::polite_pause;
use crate::url::index_url;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// A leaf page found on an index page
///
/// Serialized as a `[name, url]` pair in the crawl report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct DiseaseLink {
    /// Display name (the anchor text)
    pub name: String,

    /// Absolute URL of the leaf page
    pub url: String,
}

impl DiseaseLink {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

impl From<(String, String)> for DiseaseLink {
    fn from((name, url): (String, String)) -> Self {
        Self { name, url }
    }
}

impl From<DiseaseLink> for (String, String) {
    fn from(link: DiseaseLink) -> Self {
        (link.name, link.url)
    }
}

/// Removes repeated URLs, keeping the first occurrence and the original order
pub fn dedupe_links(links: Vec<DiseaseLink>) -> Vec<DiseaseLink> {
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|link| seen.insert(link.url.clone()))
        .collect()
}

/// Walks the index pages and collects the unique leaf links
pub struct LinkDiscoverer<'a, S> {
    fetcher: &'a RetryingFetcher<S>,
    site: &'a SiteConfig,
    base_url: Url,
    delay: Duration,
}

impl<'a, S: PageSource> LinkDiscoverer<'a, S> {
    pub fn new(
        fetcher: &'a RetryingFetcher<S>,
        site: &'a SiteConfig,
        delay: Duration,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            fetcher,
            site,
            base_url: Url::parse(&site.base_url)?,
            delay,
        })
    }

    /// Fetches one index page per key and returns the deduplicated links
    ///
    /// Stops early, with whatever was found so far, once `cancel` fires.
    pub async fn discover<K: Display>(
        &self,
        keys: impl IntoIterator<Item = K>,
        cancel: &CancellationToken,
    ) -> Vec<DiseaseLink> {
        tracing::info!("Fetching all index pages...");
        let mut found = Vec::new();

        for key in keys {
            if cancel.is_cancelled() {
                tracing::warn!("Link discovery interrupted before index page '{}'", key);
                break;
            }

            let url = match index_url(&self.base_url, &self.site.index_path, &key) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("Skipping index page '{}': {}", key, e);
                    continue;
                }
            };

            tracing::info!("Fetching index page '{}'", key);
            match self.fetcher.fetch(url.as_str()).await {
                Ok(body) => {
                    let links = parse_index_page(&body, &self.base_url, &self.site.leaf_namespace);
                    tracing::debug!("Index page '{}' listed {} link(s)", key, links.len());
                    found.extend(links);
                }
                Err(e) => {
                    tracing::warn!("Error fetching index page '{}': {}", key, e);
                }
            }

            polite_pause(self.delay, cancel).await;
        }

        let unique = dedupe_links(found);
        tracing::info!("Total unique links found: {}", unique.len());
        unique
    }
}
