//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - Building the HTTP client with per-request deadlines
//! - Building page URLs from the configured base URL
//! - GET requests with a fixed, linear retry backoff
//! - Error classification into [`PageError`] kinds
//!
//! # Retry Logic
//!
//! | Condition | Action |
//! |-----------|--------|
//! | Transport error (DNS, connect, timeout, body read) | Retry until attempts are exhausted |
//! | Any status other than 200 | Immediate `BadStatus`, no retry |
//!
//! Bodies are decoded leniently: stray bytes that are not valid in the
//! response charset become U+FFFD instead of dropping the page.

use crate::config::CrawlerConfig;
use crate::crawler::PageNumber;
use crate::{PageError, PageResult};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Number of attempts and the spacing between them
///
/// Backoff is linear and deterministic: the wait before attempt `n` is
/// `(n - 1) * backoff_unit`, so the first attempt goes out immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_unit: Duration,
}

impl RetryPolicy {
    /// Creates a retry policy; `max_attempts` is clamped to at least one
    pub fn new(max_attempts: u32, backoff_unit: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_unit,
        }
    }

    /// Builds the policy described by the crawler configuration
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(config.per_request_retries, config.retry_backoff())
    }

    /// Total attempts, including the first
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay to wait before the given 1-indexed attempt
    ///
    /// Saturates at `Duration::MAX` instead of overflowing.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        self.backoff_unit
            .checked_mul(attempt.saturating_sub(1))
            .unwrap_or(Duration::MAX)
    }
}

/// Builds an HTTP client with proper configuration
///
/// No custom user agent, headers, or cookies are set.
///
/// # Arguments
///
/// * `config` - The crawler configuration (timeouts)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(config.request_timeout())
        .connect_timeout(config.connect_timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Outcome of a single GET attempt
enum AttemptError {
    /// Worth another try
    Transport(reqwest::Error),
    /// Final: the server answered, just not with success
    Status(u16),
}

/// Fetches page bodies from one site
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl Fetcher {
    /// Creates a fetcher for the site rooted at `base_url`
    pub fn new(client: Client, base_url: &str, retry: RetryPolicy) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry,
        }
    }

    /// Returns the URL of the given page: `{base_url}/page/{n}/`
    pub fn page_url(&self, page: PageNumber) -> String {
        format!("{}/page/{}/", self.base_url, page)
    }

    /// Fetches a page body with retry on transport errors
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The full body of a 200 response
    /// * `Err(PageError::Transport)` - Every attempt failed at the transport layer
    /// * `Err(PageError::BadStatus)` - The server answered with any other status
    pub async fn fetch(&self, page: PageNumber) -> PageResult<String> {
        let url = self.page_url(page);
        tracing::debug!("Fetching page {}: {}", page, url);

        let max_attempts = self.retry.max_attempts();
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            let delay = self.retry.delay_before(attempt);
            if !delay.is_zero() {
                tracing::debug!(
                    "Retry {} for page {} in {:?}",
                    attempt - 1,
                    page,
                    delay
                );
                tokio::time::sleep(delay).await;
            }

            match self.attempt(&url).await {
                Ok(body) => return Ok(body),
                Err(AttemptError::Status(status)) => {
                    return Err(PageError::BadStatus {
                        page: page.get(),
                        status,
                    });
                }
                Err(AttemptError::Transport(e)) => {
                    tracing::warn!(
                        "Attempt {}/{} for page {} failed: {}",
                        attempt,
                        max_attempts,
                        page,
                        e
                    );
                    last_error = e.to_string();
                }
            }
        }

        Err(PageError::Transport {
            page: page.get(),
            attempts: max_attempts,
            message: last_error,
        })
    }

    /// Performs one GET and reads the whole body
    ///
    /// The response is owned by this call, so its connection is released on
    /// every return path.
    async fn attempt(&self, url: &str) -> Result<String, AttemptError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(AttemptError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AttemptError::Status(status.as_u16()));
        }

        response.text().await.map_err(AttemptError::Transport)
    }
}
