//! Collector: drains the worker pool's output channel

use crate::crawler::Quote;
use tokio::sync::mpsc;

/// Drains the quote channel into a single list
///
/// Returns once every sender is gone, i.e. after the last worker finished.
/// The list is in arrival order: quotes of one page keep their document
/// order, while different pages interleave as workers complete.
pub async fn collect_quotes(mut receiver: mpsc::Receiver<Quote>) -> Vec<Quote> {
    let mut quotes = Vec::new();

    while let Some(quote) = receiver.recv().await {
        quotes.push(quote);
    }

    tracing::debug!("Collector drained {} quotes", quotes.len());
    quotes
}
