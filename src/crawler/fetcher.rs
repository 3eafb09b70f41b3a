//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester, including:
//! - Building the HTTP client with the configured user agent and timeout
//! - Classifying transport failures
//! - Bounded retries with a fixed backoff

use crate::config::CrawlerConfig;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// A single failed attempt to fetch a page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request failed for {url}: {message}")]
    Other { url: String, message: String },
}

/// Terminal failure after every attempt failed
#[derive(Debug, Error)]
#[error("Giving up on {url} after {attempts} attempt(s): {source}")]
pub struct FetchError {
    pub url: String,
    pub attempts: u32,
    #[source]
    pub source: TransportError,
}

/// Anything that can fetch a page body by absolute URL
pub trait PageSource {
    fn get(&self, url: &str) -> impl Future<Output = Result<String, TransportError>>;
}

/// Builds an HTTP client with proper configuration
///
/// Every request is bounded by `request_timeout_secs`, so a stalled
/// connection cannot hold up the run.
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.request_timeout())
        .connect_timeout(Duration::from_secs(10).min(config.request_timeout()))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`PageSource`] backed by a real HTTP client
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

fn classify(url: &str, error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        TransportError::Connect {
            url: url.to_string(),
            message: error.to_string(),
        }
    } else {
        TransportError::Other {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

impl PageSource for HttpSource {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| classify(url, e))
    }
}

/// Fetches pages with a bounded number of attempts
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | Success (2xx) | Return body |
/// | Timeout / connection error / non-2xx | Wait backoff, retry |
/// | Attempts exhausted | `FetchError` with the last cause |
///
/// The backoff is twice the politeness delay, fixed and without jitter.
#[derive(Debug)]
pub struct RetryingFetcher<S> {
    source: S,
    max_retries: u32,
    backoff: Duration,
}

impl<S: PageSource> RetryingFetcher<S> {
    /// Creates a fetcher making at most `max_retries` attempts per page
    pub fn new(source: S, max_retries: u32, politeness_delay: Duration) -> Self {
        Self {
            source,
            max_retries: max_retries.max(1),
            backoff: politeness_delay * 2,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.source.get(url).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    tracing::warn!("Attempt {}/{} failed: {}", attempt, self.max_retries, e);
                    if attempt >= self.max_retries {
                        return Err(FetchError {
                            url: url.to_string(),
                            attempts: attempt,
                            source: e,
                        });
                    }
                    tokio::time::sleep(self.backoff).await;
                }
            }
        }
    }
}
