//! Output module for writing scrape results
//!
//! This module handles:
//! - Writing collected quotes to CSV
//! - Summarizing run statistics for the log
//! - Formatting the final summary line

mod csv_export;
pub mod stats;

pub use csv_export::{export_csv, write_quotes, CSV_HEADER};
pub use stats::RunStatistics;

/// Formats the line printed after a successful export
///
/// # Example
///
/// ```
/// use quote_scraper::output::summary_line;
///
/// assert_eq!(summary_line(2, "quotes.csv"), "Scraped 2 quotes and saved to quotes.csv");
/// ```
pub fn summary_line(quote_count: usize, output_path: &str) -> String {
    format!("Scraped {} quotes and saved to {}", quote_count, output_path)
}
