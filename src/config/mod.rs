//! Configuration module for Quote-Scraper
//!
//! Every setting has a default, so a config file is optional. When one is
//! given it is TOML, and command-line flags override what it sets.
//!
//! # Example
//!
//! ```no_run
//! use quote_scraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scraper.toml")).unwrap();
//! println!("Scraping up to page {}", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CrawlerConfig, OutputConfig, RunConfig, DEFAULT_BASE_URL, DEFAULT_OUTPUT_PATH};

// Re-export parser functions
pub use parser::load_config;
pub use validation::validate;
