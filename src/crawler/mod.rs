//! Crawler module for page fetching and processing
//!
//! This module contains the core scraping pipeline:
//! - HTTP fetching with retry logic
//! - HTML parsing and quote extraction
//! - A bounded worker pool that runs fetch + extract per page
//! - The collector that drains worker output
//!
//! Data flows `page numbers -> WorkerPool -> (Fetcher -> extractor) ->
//! bounded channel -> collector`, after which the caller hands the
//! aggregate to the CSV exporter.

mod collector;
mod fetcher;
mod parser;
mod pool;

pub use collector::collect_quotes;
pub use fetcher::{build_http_client, Fetcher, RetryPolicy};
pub use parser::{extract_quotes, Quote, ScrapedPage};
pub use pool::{PageOutcome, PoolReport, WorkerPool};

use crate::config::{CrawlerConfig, RunConfig};
use crate::output::RunStatistics;
use crate::{ConfigError, PageError, PageResult, ScrapeError};
use async_trait::async_trait;
use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;

/// A 1-indexed page number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// Returns `None` for page zero
    pub fn new(page: u32) -> Option<Self> {
        NonZeroU32::new(page).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Iterates pages `1..=last` in ascending order
    pub fn range(last: PageNumber) -> impl Iterator<Item = PageNumber> {
        (1..=last.get()).filter_map(Self::new)
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Produces the quotes of one page
///
/// The worker pool only talks to this trait, so anything that can turn a
/// page number into a [`ScrapedPage`] can drive it.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn scrape(&self, page: PageNumber) -> PageResult<ScrapedPage>;
}

/// The live quotes site: fetch a page over HTTP, then extract its quotes
#[derive(Debug, Clone)]
pub struct QuoteSite {
    fetcher: Fetcher,
}

impl QuoteSite {
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl PageSource for QuoteSite {
    async fn scrape(&self, page: PageNumber) -> PageResult<ScrapedPage> {
        let body = self.fetcher.fetch(page).await?;
        extract_quotes(&body).map_err(|message| PageError::ParseFailure {
            page: page.get(),
            message,
        })
    }
}

/// Everything a finished scrape hands back to the caller
#[derive(Debug)]
pub struct ScrapeOutcome {
    /// All quotes in collection order
    pub quotes: Vec<Quote>,

    /// Per-page outcomes, ordered by page number
    pub report: PoolReport,

    /// Aggregated counters for logging
    pub statistics: RunStatistics,
}

/// Runs a complete scrape against the configured site
///
/// This is the main entry point. It will:
/// 1. Build the HTTP client and fetcher
/// 2. Schedule pages `1..=max_pages` on the worker pool
/// 3. Collect quotes as workers publish them
/// 4. Wait for every worker, then summarize the run
///
/// Writing the CSV is left to the caller so that export failures stay
/// separate from scrape results.
///
/// # Example
///
/// ```no_run
/// use quote_scraper::{export_csv, run_scrape, RunConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = RunConfig::default();
/// let outcome = run_scrape(&config).await?;
/// export_csv(&config.output.output_path, &outcome.quotes)?;
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(config: &RunConfig) -> Result<ScrapeOutcome, ScrapeError> {
    let crawler = &config.crawler;
    let client = build_http_client(crawler)?;
    let fetcher = Fetcher::new(client, &crawler.base_url, RetryPolicy::from_config(crawler));

    scrape_with(Arc::new(QuoteSite::new(fetcher)), crawler).await
}

/// Runs the pool and collector over an arbitrary page source
pub async fn scrape_with(
    source: Arc<dyn PageSource>,
    config: &CrawlerConfig,
) -> Result<ScrapeOutcome, ScrapeError> {
    let max_pages = PageNumber::new(config.max_pages).ok_or_else(|| {
        ConfigError::Validation("max_pages must be >= 1, got 0".to_string())
    })?;

    let started_at = chrono::Utc::now();
    let timer = Instant::now();

    tracing::info!(
        "Scraping pages 1..={} with {} workers",
        max_pages,
        config.concurrency
    );

    let (receiver, pool) = WorkerPool::from_config(source, config).spawn(max_pages);
    let quotes = collect_quotes(receiver).await;
    let report = pool.await?;

    let statistics = RunStatistics::from_report(&report, quotes.len(), started_at, timer.elapsed());

    Ok(ScrapeOutcome {
        quotes,
        report,
        statistics,
    })
}
