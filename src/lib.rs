//! Quote-Scraper: a bounded-concurrency quote harvester
//!
//! This crate fetches a fixed range of paginated pages from a quotes site,
//! extracts quote/author records from each page, and writes the combined
//! result to a CSV file.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for Quote-Scraper operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Worker pool terminated abnormally: {0}")]
    Pool(#[from] tokio::task::JoinError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors that drop a single page from the run
///
/// None of these abort the run; the worker that hit one logs it and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("Transport error for page {page} after {attempts} attempt(s): {message}")]
    Transport {
        page: u32,
        attempts: u32,
        message: String,
    },

    #[error("Unexpected HTTP status {status} for page {page}")]
    BadStatus { page: u32, status: u16 },

    #[error("Failed to parse page {page}: {message}")]
    ParseFailure { page: u32, message: String },
}

impl PageError {
    /// Returns the page number this error belongs to
    pub fn page(&self) -> u32 {
        match self {
            Self::Transport { page, .. }
            | Self::BadStatus { page, .. }
            | Self::ParseFailure { page, .. } => *page,
        }
    }
}

/// Errors raised while writing the CSV output
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create {path}: {source}")]
    Create {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write { path: String, source: csv::Error },

    #[error("Failed to flush {path}: {source}")]
    Flush {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for Quote-Scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for per-page operations
pub type PageResult<T> = std::result::Result<T, PageError>;

// Re-export commonly used types
pub use config::RunConfig;
pub use crawler::{run_scrape, PageNumber, Quote, ScrapeOutcome};
pub use output::export_csv;
pub use state::PageState;
