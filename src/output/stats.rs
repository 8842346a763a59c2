//! Run statistics
//!
//! Collected by the scheduler while it crawls and logged once the run ends.

use crate::state::CrawlResult;
use chrono::{DateTime, Utc};

/// Summary of one crawl run
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// How the traversal ended; `None` while it is still running
    pub result: Option<CrawlResult>,

    /// Pages fetched successfully and recorded
    pub pages_visited: u64,

    /// Pages whose fetch failed and were skipped
    pub fetch_failures: u64,

    /// Links discovered and queued for a level that was never processed
    pub pending_links: usize,

    /// Levels fully or partially processed after the seed
    pub levels_processed: u32,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl CrawlStatistics {
    /// Starts the clock for a new run
    pub fn start() -> Self {
        Self {
            result: None,
            pages_visited: 0,
            fetch_failures: 0,
            pending_links: 0,
            levels_processed: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Stops the clock and records the outcome
    pub fn finish(&mut self, result: CrawlResult, pending_links: usize) {
        self.result = Some(result);
        self.pending_links = pending_links;
        self.finished_at = Some(Utc::now());
    }

    /// Pages attempted, whether or not the fetch succeeded
    pub fn pages_attempted(&self) -> u64 {
        self.pages_visited + self.fetch_failures
    }

    /// Wall-clock duration in milliseconds, if the run has finished
    pub fn duration_ms(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_milliseconds())
    }

    /// True when the run ended on the depth or visit ceiling
    pub fn stopped_by_limit(&self) -> bool {
        self.result.map_or(false, |r| r.is_limited())
    }

    /// Share of attempted pages that were fetched successfully, in percent
    pub fn success_rate(&self) -> f64 {
        let attempted = self.pages_attempted();
        if attempted == 0 {
            return 0.0;
        }
        (self.pages_visited as f64 / attempted as f64) * 100.0
    }
}

/// Logs the statistics at info level
///
/// # Arguments
///
/// * `stats` - The statistics to report
pub fn log_statistics(stats: &CrawlStatistics) {
    let result = stats
        .result
        .map(|r| r.description())
        .unwrap_or("still running");

    tracing::info!("=== Crawl Statistics ===");
    tracing::info!("  Result: {}", result);
    tracing::info!(
        "  Pages visited: {} of {} attempted ({:.1}%)",
        stats.pages_visited,
        stats.pages_attempted(),
        stats.success_rate()
    );
    tracing::info!("  Fetch failures: {}", stats.fetch_failures);
    tracing::info!("  Levels processed: {}", stats.levels_processed);
    if stats.stopped_by_limit() {
        tracing::info!("  Stopped by a limit; raise max-depth or max-visited to go further");
    }
    if stats.pending_links > 0 {
        tracing::info!("  Links left unvisited: {}", stats.pending_links);
    }
    if let Some(ms) = stats.duration_ms() {
        tracing::info!("  Duration: {:.1}s", ms as f64 / 1000.0);
    }
}
