//! Level-synchronized breadth-first traversal
//!
//! This module handles:
//! - Visiting the seed and then each level of discovered links in order
//! - Enforcing the depth and visit ceilings
//! - Counting terms and streaming one record per visited page to a sink
//! - Canonicalizing and deduplicating discovered links

use crate::config::CrawlConfig;
use crate::crawler::fetcher::{FetchOptions, PageContent, PageFetcher};
use crate::output::CrawlStatistics;
use crate::state::{CrawlResult, CrawlState};
use crate::storage::{RecordSink, VisitRecord};
use crate::terms::TermCounter;
use crate::url::normalize_href;
use crate::{RippleError, Result};

/// Drives one crawl from the seed to a terminal `CrawlResult`
///
/// The scheduler owns the frontier exclusively. Pages are fetched one at a
/// time, so records reach the sink in visit order.
pub struct CrawlScheduler<'a, F: PageFetcher + ?Sized> {
    config: &'a CrawlConfig,
    fetcher: &'a F,
    counter: TermCounter,
    options: FetchOptions,
    state: CrawlState,
    stats: CrawlStatistics,
}

impl<'a, F: PageFetcher + ?Sized> CrawlScheduler<'a, F> {
    /// Creates a scheduler for `config`, fetching through `fetcher`
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlScheduler)` - Ready to run
    /// * `Err(RippleError::Config)` - A term failed to compile
    pub fn new(config: &'a CrawlConfig, fetcher: &'a F) -> Result<Self> {
        let counter = TermCounter::new(config.terms(), config.case_sensitive())?;

        Ok(Self {
            config,
            fetcher,
            counter,
            options: FetchOptions::from_config(config),
            state: CrawlState::new(),
            stats: CrawlStatistics::start(),
        })
    }

    /// Fetches the seed and runs the crawl
    ///
    /// A seed that cannot be fetched is a `RippleError::SeedUnreachable`.
    pub async fn run<S: RecordSink>(self, sink: &mut S) -> Result<(CrawlResult, CrawlStatistics)> {
        let config = self.config;
        let content = self
            .fetcher
            .fetch(config.seed(), &self.options)
            .await
            .map_err(|source| RippleError::SeedUnreachable {
                url: config.seed().to_string(),
                source,
            })?;

        self.run_from_seed(content, sink).await
    }

    /// Runs the crawl using already-fetched seed content
    ///
    /// # Arguments
    ///
    /// * `seed_content` - Result of fetching the configured seed URL
    /// * `sink` - Destination of the raw records, flushed after each one
    ///
    /// # Returns
    ///
    /// The terminal status and the run statistics. Errors are limited to
    /// sink failures; fetch failures only skip the page.
    pub async fn run_from_seed<S: RecordSink>(
        mut self,
        seed_content: PageContent,
        sink: &mut S,
    ) -> Result<(CrawlResult, CrawlStatistics)> {
        let max_depth = self.config.max_depth();
        let max_visited = self.config.max_visited();

        tracing::info!(
            "Crawling from {} (max depth {}, max visited {})",
            self.config.seed(),
            max_depth,
            max_visited
        );

        // The seed bypasses both ceilings
        let seed = self.config.seed().to_string();
        sink.flush()?;
        self.state.mark_visited(&seed);
        self.record_page(&seed, seed_content, sink)?;

        while self.state.level() != max_depth {
            self.state.promote_next();
            if self.state.current_len() == 0 {
                tracing::debug!("Level {} is empty", self.state.level());
                break;
            }

            self.stats.levels_processed += 1;
            tracing::info!(
                "Level {}: {} pages queued, {} visited so far",
                self.state.level(),
                self.state.current_len(),
                self.state.visited_count()
            );

            while self.state.current_len() > 0 {
                if self.state.visited_count() >= max_visited {
                    let pending = self.state.current_len() + self.state.next_len();
                    return Ok(self.finish(CrawlResult::VisitLimitReached, pending));
                }

                sink.flush()?;
                let Some(url) = self.state.start_next_visit() else {
                    break;
                };

                match self.fetcher.fetch(&url, &self.options).await {
                    Ok(content) => self.record_page(&url, content, sink)?,
                    Err(e) => {
                        self.stats.fetch_failures += 1;
                        tracing::debug!("Skipping {}: {}", url, e);
                    }
                }
            }

            self.state.advance_level();
        }

        let result = if self.state.has_next() {
            CrawlResult::DepthLimitReached
        } else {
            CrawlResult::NoMorePages
        };
        let pending = self.state.next_len();
        Ok(self.finish(result, pending))
    }

    /// Counts terms, writes the record and queues the page's links
    fn record_page<S: RecordSink>(
        &mut self,
        url: &str,
        content: PageContent,
        sink: &mut S,
    ) -> Result<()> {
        let counts = self.counter.count(&content.text);
        let record = VisitRecord::new(url, counts);

        self.state.record_success();
        self.stats.pages_visited += 1;
        sink.append(&record)?;
        sink.flush()?;

        tracing::debug!(
            "Visited {} (total {}, {} links)",
            url,
            record.total(),
            content.anchors.len()
        );

        let mut queued = 0usize;
        for href in &content.anchors {
            let Some(canonical) = normalize_href(href, url) else {
                tracing::trace!("Ignoring href '{}' on {}", href, url);
                continue;
            };
            tracing::trace!("Normalized '{}' to {}", href, canonical);
            if self.state.enqueue_next(canonical) {
                queued += 1;
            }
        }

        if queued > 0 {
            tracing::debug!("Queued {} new links from {}", queued, url);
        }

        Ok(())
    }

    fn finish(mut self, result: CrawlResult, pending: usize) -> (CrawlResult, CrawlStatistics) {
        tracing::info!(
            "Crawl stopped at level {}: {} ({} URLs attempted)",
            self.state.level(),
            result.description(),
            self.state.attempted_len()
        );
        self.stats.finish(result, pending);
        (result, self.stats)
    }
}
