use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for medref-harvest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Applies command-line overrides on top of the file values
    ///
    /// `delay_secs` is the politeness delay in (fractional) seconds.
    pub fn apply_overrides(&mut self, delay_secs: Option<f64>, output: Option<PathBuf>) {
        if let Some(secs) = delay_secs {
            self.crawler.delay_ms = (secs.max(0.0) * 1000.0).round() as u64;
        }
        if let Some(dir) = output {
            self.output.directory = dir;
        }
    }
}

/// Addressing of the harvested site
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SiteConfig {
    /// Base address every relative link is resolved against (must end in `/`)
    pub base_url: String,

    /// Path of the A-Z index page, relative to the base URL
    pub index_path: String,

    /// Keys of the index pages to enumerate, one character per page
    pub index_keys: String,

    /// Path segment that marks a leaf (condition) page
    pub leaf_namespace: String,

    /// Query appended to a leaf URL to request the printable rendering
    pub print_query: String,

    /// CSS selector of the publication date element on a leaf page
    pub pubdate_selector: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.mayoclinic.org/".to_string(),
            index_path: "diseases-conditions/index".to_string(),
            index_keys: "ABCDEFGHIJKLMNOPQRSTUVWXYZ".to_string(),
            leaf_namespace: "/diseases-conditions/".to_string(),
            print_query: "p=1".to_string(),
            pubdate_selector: ".pubdate".to_string(),
        }
    }
}

impl SiteConfig {
    /// Returns the index keys as individual characters
    pub fn keys(&self) -> Vec<char> {
        self.index_keys.chars().filter(|c| !c.is_whitespace()).collect()
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CrawlerConfig {
    /// Politeness delay between consecutive requests (milliseconds)
    pub delay_ms: u64,

    /// Number of attempts per page before giving up
    pub max_retries: u32,

    /// Upper bound on a single request (seconds)
    pub request_timeout_secs: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            delay_ms: 2000,
            max_retries: 3,
            request_timeout_secs: 20,
            user_agent: "Mozilla/5.0 (Educational crawler)".to_string(),
        }
    }
}

impl CrawlerConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct OutputConfig {
    /// Directory receiving `markdown/`, `yaml/` and `crawl_report.json`
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("mayo_clinic_data"),
        }
    }
}

impl OutputConfig {
    pub fn report_path(&self) -> PathBuf {
        self.directory.join("crawl_report.json")
    }
}
