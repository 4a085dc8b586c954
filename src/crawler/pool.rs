//! Bounded worker pool for page scraping
//!
//! This module handles:
//! - Eager scheduling of pages `1..=max_pages`
//! - Global concurrency limiting via a semaphore
//! - Publishing quotes to a bounded channel
//! - The post-success pause, taken while the slot is still held
//!
//! # Concurrency Model
//!
//! The dispatcher acquires a semaphore permit before spawning each worker,
//! so at most `concurrency` pages are ever in flight and scheduling itself
//! waits when the pool is full. Each worker owns its permit; dropping it
//! (on return or on panic) frees the slot. The quote channel closes once
//! the dispatcher and every worker have dropped their senders, which is
//! strictly after the last quote was sent.

use crate::config::CrawlerConfig;
use crate::crawler::{PageNumber, PageSource, Quote};
use crate::state::PageState;
use crate::PageError;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::{JoinHandle, JoinSet};

/// Final result for one scheduled page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutcome {
    /// The page this outcome belongs to
    pub page: PageNumber,

    /// Final state of the page
    pub state: PageState,

    /// Number of quotes published to the channel
    pub quotes: usize,

    /// Whether the page advertised a following page
    pub has_next: bool,

    /// The error that dropped the page, if any
    pub error: Option<PageError>,
}

impl PageOutcome {
    fn processed(page: PageNumber, quotes: usize, has_next: bool) -> Self {
        Self {
            page,
            state: PageState::Processed,
            quotes,
            has_next,
            error: None,
        }
    }

    fn failed(page: PageNumber, error: PageError) -> Self {
        Self {
            page,
            state: PageState::from_error(&error),
            quotes: 0,
            has_next: false,
            error: Some(error),
        }
    }

    fn panicked(page: PageNumber) -> Self {
        Self {
            page,
            state: PageState::Panicked,
            quotes: 0,
            has_next: false,
            error: None,
        }
    }
}

/// Per-page outcomes of a finished pool run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolReport {
    /// Highest page that was scheduled
    pub last_page: PageNumber,

    /// One outcome per scheduled page, ordered by page number
    pub outcomes: Vec<PageOutcome>,
}

impl PoolReport {
    /// Number of pages that ended in the given state
    pub fn count(&self, state: PageState) -> usize {
        self.outcomes.iter().filter(|o| o.state == state).count()
    }

    pub fn pages_processed(&self) -> usize {
        self.count(PageState::Processed)
    }

    pub fn pages_failed(&self) -> usize {
        self.outcomes.len() - self.pages_processed()
    }

    /// Total quotes workers published
    pub fn quotes_published(&self) -> usize {
        self.outcomes.iter().map(|o| o.quotes).sum()
    }

    /// True if the last scheduled page was scraped and points further
    ///
    /// Read only after every worker finished, so no worker races on it.
    /// It never extends the run; it only hints that more pages exist.
    pub fn more_pages_available(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| o.page == self.last_page && o.has_next)
    }
}

/// Fixed-capacity pool of page workers
pub struct WorkerPool {
    source: Arc<dyn PageSource>,
    concurrency: usize,
    post_fetch_delay: Duration,
    channel_capacity: usize,
}

impl WorkerPool {
    /// Creates a pool with the given capacity
    ///
    /// Uses a one second post-success pause and a 100 quote channel.
    pub fn new(source: Arc<dyn PageSource>, concurrency: usize) -> Self {
        Self {
            source,
            concurrency: concurrency.max(1),
            post_fetch_delay: Duration::from_secs(1),
            channel_capacity: 100,
        }
    }

    /// Creates a pool sized and paced by the crawler configuration
    pub fn from_config(source: Arc<dyn PageSource>, config: &CrawlerConfig) -> Self {
        Self::new(source, config.concurrency as usize)
            .with_post_fetch_delay(config.post_fetch_delay())
            .with_channel_capacity(config.channel_capacity)
    }

    pub fn with_post_fetch_delay(mut self, delay: Duration) -> Self {
        self.post_fetch_delay = delay;
        self
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    /// Starts scraping pages `1..=last_page`
    ///
    /// # Returns
    ///
    /// * The receiving end of the quote channel; drain it concurrently or
    ///   workers block once it is full
    /// * A handle resolving to the [`PoolReport`] once every worker finished
    pub fn spawn(self, last_page: PageNumber) -> (mpsc::Receiver<Quote>, JoinHandle<PoolReport>) {
        let (sender, receiver) = mpsc::channel(self.channel_capacity);
        let handle = tokio::spawn(self.dispatch(last_page, sender));
        (receiver, handle)
    }

    /// Schedules every page, then waits for all workers
    async fn dispatch(self, last_page: PageNumber, sender: mpsc::Sender<Quote>) -> PoolReport {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut workers = JoinSet::new();
        let mut pending: BTreeSet<PageNumber> = BTreeSet::new();

        for page in PageNumber::range(last_page) {
            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    tracing::error!("Concurrency semaphore closed at page {}: {}", page, e);
                    break;
                }
            };

            let source = Arc::clone(&self.source);
            let sender = sender.clone();
            let delay = self.post_fetch_delay;

            pending.insert(page);
            workers.spawn(async move {
                let _permit = permit;
                run_worker(source.as_ref(), page, &sender, delay).await
            });
        }

        // Workers hold the remaining senders
        drop(sender);

        let mut outcomes = Vec::with_capacity(pending.len());
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(outcome) => {
                    pending.remove(&outcome.page);
                    outcomes.push(outcome);
                }
                Err(e) => tracing::error!("Worker task failed: {}", e),
            }
        }

        outcomes.extend(pending.into_iter().map(PageOutcome::panicked));
        outcomes.sort_by_key(|o| o.page);

        PoolReport {
            last_page,
            outcomes,
        }
    }
}

/// Scrapes one page and publishes its quotes in document order
async fn run_worker(
    source: &dyn PageSource,
    page: PageNumber,
    sender: &mpsc::Sender<Quote>,
    post_fetch_delay: Duration,
) -> PageOutcome {
    let scraped = match source.scrape(page).await {
        Ok(scraped) => scraped,
        Err(e) => {
            tracing::warn!("Error scraping page {}: {}", page, e);
            return PageOutcome::failed(page, e);
        }
    };

    let mut published = 0;
    for quote in scraped.quotes {
        if sender.send(quote).await.is_err() {
            tracing::warn!("Quote channel closed; dropping rest of page {}", page);
            break;
        }
        published += 1;
    }

    tracing::debug!(
        "Page {} published {} quotes (has_next: {})",
        page,
        published,
        scraped.has_next
    );

    if !post_fetch_delay.is_zero() {
        tokio::time::sleep(post_fetch_delay).await;
    }

    PageOutcome::processed(page, published, scraped.has_next)
}
