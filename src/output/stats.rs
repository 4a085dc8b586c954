//! Run statistics
//!
//! Summarizes a finished pool run for the diagnostic log.

use crate::crawler::PoolReport;
use crate::state::PageState;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::time::Duration;

/// Scrape run statistics summary
#[derive(Debug, Clone)]
pub struct RunStatistics {
    /// When the pool started
    pub started_at: DateTime<Utc>,

    /// Wall time from first schedule to last worker
    pub elapsed: Duration,

    /// Pages scheduled (1..=max_pages)
    pub pages_scheduled: usize,

    /// Count of pages by final state
    pub pages_by_state: BTreeMap<PageState, usize>,

    /// Quotes that reached the collector
    pub quotes_collected: usize,

    /// The last scheduled page links to a further page
    pub more_pages_available: bool,
}

impl RunStatistics {
    /// Builds statistics from a finished pool report
    pub fn from_report(
        report: &PoolReport,
        quotes_collected: usize,
        started_at: DateTime<Utc>,
        elapsed: Duration,
    ) -> Self {
        let mut pages_by_state = BTreeMap::new();
        for outcome in &report.outcomes {
            *pages_by_state.entry(outcome.state).or_insert(0) += 1;
        }

        Self {
            started_at,
            elapsed,
            pages_scheduled: report.outcomes.len(),
            pages_by_state,
            quotes_collected,
            more_pages_available: report.more_pages_available(),
        }
    }

    pub fn pages_processed(&self) -> usize {
        self.pages_by_state
            .get(&PageState::Processed)
            .copied()
            .unwrap_or(0)
    }

    pub fn pages_failed(&self) -> usize {
        self.pages_scheduled - self.pages_processed()
    }

    /// Percentage of scheduled pages that were processed
    pub fn success_rate(&self) -> f64 {
        if self.pages_scheduled == 0 {
            return 0.0;
        }
        (self.pages_processed() as f64 / self.pages_scheduled as f64) * 100.0
    }

    /// Emits the statistics as diagnostic log lines
    pub fn log(&self) {
        tracing::info!(
            "Run started {} finished in {:.2}s: {} quotes from {}/{} pages ({:.1}%)",
            self.started_at.to_rfc3339(),
            self.elapsed.as_secs_f64(),
            self.quotes_collected,
            self.pages_processed(),
            self.pages_scheduled,
            self.success_rate()
        );

        for (state, count) in &self.pages_by_state {
            if state.is_error() {
                tracing::warn!("{} page(s) ended as {}", count, state);
            }
        }

        if self.more_pages_available {
            tracing::info!("The last scheduled page links to more pages; raise --pages to scrape them");
        }
    }
}
