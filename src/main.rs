//! Quote-Scraper main entry point
//!
//! This is the command-line interface for the Quote-Scraper harvester.

use anyhow::Context;
use clap::Parser;
use quote_scraper::config::{load_config, validate, RunConfig};
use quote_scraper::output::summary_line;
use quote_scraper::{export_csv, run_scrape};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Quote-Scraper: a bounded-concurrency quote harvester
///
/// Fetches pages 1..=N of a quotes site in parallel, extracts every
/// quote and its author, and writes them to a CSV file.
#[derive(Parser, Debug)]
#[command(name = "quote-scraper")]
#[command(version = "1.0.0")]
#[command(about = "A bounded-concurrency quote harvester", long_about = None)]
struct Cli {
    /// Maximum number of pages to scrape [default: 1]
    #[arg(long, value_name = "N")]
    pages: Option<u32>,

    /// Output CSV file [default: quotes.csv]
    #[arg(long, value_name = "PATH")]
    output: Option<String>,

    /// Enable diagnostic logging to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Optional TOML configuration file; flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of pages in flight [default: 5]
    #[arg(long, value_name = "K")]
    concurrency: Option<u32>,

    /// Total GET attempts per page [default: 3]
    #[arg(long, value_name = "N")]
    retries: Option<u32>,

    /// Site root to scrape [default: https://quotes.toscrape.com]
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    tracing::info!("Starting quote-scraper");

    let config = build_config(&cli)?;
    let output_path = config.output.output_path.clone();

    let outcome = run_scrape(&config).await.context("scrape failed")?;
    outcome.statistics.log();

    if let Err(e) = export_csv(&output_path, &outcome.quotes) {
        tracing::error!("Error exporting to CSV: {}", e);
        return Ok(ExitCode::FAILURE);
    }

    println!("{}", summary_line(outcome.quotes.len(), &output_path));
    Ok(ExitCode::SUCCESS)
}

/// Sets up the logging/tracing subscriber
///
/// Diagnostics go to stderr. Without `--verbose` every event is filtered
/// out, leaving stdout for the summary line alone.
fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("quote_scraper=debug,info")
    } else {
        EnvFilter::new("off")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the optional config file and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<RunConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let config = load_config(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully");
            config
        }
        None => RunConfig::default(),
    };

    if let Some(pages) = cli.pages {
        config.crawler.max_pages = pages;
    }
    if let Some(output) = &cli.output {
        config.output.output_path = output.clone();
    }
    if let Some(concurrency) = cli.concurrency {
        config.crawler.concurrency = concurrency;
    }
    if let Some(retries) = cli.retries {
        config.crawler.per_request_retries = retries;
    }
    if let Some(base_url) = &cli.base_url {
        config.crawler.base_url = base_url.clone();
    }

    validate(&config).context("invalid configuration")?;
    Ok(config)
}
