use serde::Deserialize;
use std::time::Duration;

/// Site scraped when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://quotes.toscrape.com";

/// CSV file written when no output path is configured
pub const DEFAULT_OUTPUT_PATH: &str = "quotes.csv";

/// Main configuration structure for one scrape run
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Scraper behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Highest page number to schedule (pages 1..=max_pages)
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Maximum number of pages in flight at once
    pub concurrency: u32,

    /// Total GET attempts per page, including the first
    #[serde(rename = "per-request-retries")]
    pub per_request_retries: u32,

    /// Site root; pages are fetched from `{base_url}/page/{n}/`
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Backoff unit in milliseconds; the k-th retry waits k units
    #[serde(rename = "retry-backoff-ms")]
    pub retry_backoff_ms: u64,

    /// Pause after each successful page, taken while holding the slot (milliseconds)
    #[serde(rename = "post-fetch-delay-ms")]
    pub post_fetch_delay_ms: u64,

    /// Per-request deadline in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Connection establishment deadline in seconds
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Capacity of the bounded quote channel between workers and collector
    #[serde(rename = "channel-capacity")]
    pub channel_capacity: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 1,
            concurrency: 5,
            per_request_retries: 3,
            base_url: DEFAULT_BASE_URL.to_string(),
            retry_backoff_ms: 1000,
            post_fetch_delay_ms: 1000,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            channel_capacity: 100,
        }
    }
}

impl CrawlerConfig {
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn post_fetch_delay(&self) -> Duration {
        Duration::from_millis(self.post_fetch_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the CSV file, created or truncated at the end of the run
    #[serde(rename = "output-path")]
    pub output_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
        }
    }
}
