//! Crawl coordination
//!
//! This module wires a full run together:
//! - Construction checks (writable output paths, reachable seed)
//! - Preparing the raw table and running the scheduler
//! - Closing the raw table and ranking it into the top table

use crate::config::CrawlConfig;
use crate::crawler::fetcher::{FetchOptions, PageContent, PageFetcher};
use crate::crawler::scheduler::CrawlScheduler;
use crate::output::{log_statistics, CrawlStatistics, TopRanker};
use crate::state::CrawlResult;
use crate::storage::{check_writable, CsvSink, RecordSink, StorageError, VisitRecord};
use crate::{RippleError, Result};
use std::io::Write;

/// Everything a completed run produced
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// How the traversal ended
    pub result: CrawlResult,

    /// Counters and timing of the traversal
    pub statistics: CrawlStatistics,

    /// Rows of the top table, highest total first
    pub top: Vec<VisitRecord>,
}

/// A crawl whose construction checks have passed
pub struct Crawler<F: PageFetcher> {
    config: CrawlConfig,
    fetcher: F,
    seed_content: PageContent,
}

impl<F: PageFetcher> Crawler<F> {
    /// Checks that the run can start
    ///
    /// Both output paths must be writable and the seed must be fetchable.
    /// The fetched seed is kept and becomes the first visit of the run.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated configuration
    /// * `fetcher` - Page fetcher used for the seed and every later page
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to run
    /// * `Err(RippleError)` - A construction error; nothing has been written
    pub async fn new(config: CrawlConfig, fetcher: F) -> Result<Self> {
        for path in [config.raw_path(), config.top_path()] {
            check_writable(path).map_err(|e| match e {
                StorageError::Io { path, source } => RippleError::Unwritable { path, source },
                other => RippleError::Storage(other),
            })?;
        }

        let options = FetchOptions::from_config(&config);
        let seed_content = fetcher
            .fetch(config.seed(), &options)
            .await
            .map_err(|source| RippleError::SeedUnreachable {
                url: config.seed().to_string(),
                source,
            })?;

        tracing::debug!(
            "Seed {} reachable ({} links)",
            config.seed(),
            seed_content.anchors.len()
        );

        Ok(Self {
            config,
            fetcher,
            seed_content,
        })
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawls, then ranks the raw table
    ///
    /// The ranked rows are echoed to `report` as they are written to the top
    /// table.
    pub async fn run<W: Write>(self, report: &mut W) -> Result<CrawlOutcome> {
        let Self {
            config,
            fetcher,
            seed_content,
        } = self;

        let header = config.header().then(|| config.header_line());
        let mut sink = CsvSink::create(config.raw_path(), header.as_deref())?;

        let scheduler = CrawlScheduler::new(&config, &fetcher)?;
        let traversal = scheduler.run_from_seed(seed_content, &mut sink).await;
        let closed = sink.close();

        let (result, statistics) = traversal?;
        closed?;

        tracing::info!(
            "Wrote {} records to {}",
            sink.records_written(),
            config.raw_path().display()
        );
        log_statistics(&statistics);

        let top = TopRanker::from_config(&config).run(config.raw_path(), config.top_path(), report)?;

        Ok(CrawlOutcome {
            result,
            statistics,
            top,
        })
    }
}
