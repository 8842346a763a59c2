//! Crawler module for page fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - Fetching pages and extracting their text and links
//! - Breadth-first level scheduling with depth and visit ceilings
//! - Overall run coordination, from construction checks to ranking

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{CrawlOutcome, Crawler};
pub use fetcher::{FetchError, FetchOptions, HttpFetcher, PageContent, PageFetcher};
pub use parser::parse_page;
pub use scheduler::CrawlScheduler;

use crate::config::CrawlConfig;
use crate::Result;

/// Runs a complete crawl over HTTP
///
/// This is the main entry point for a crawl. It will:
/// 1. Build the HTTP fetcher
/// 2. Run the construction checks (output paths, seed)
/// 3. Crawl, streaming records to the raw table
/// 4. Rank the raw table, echoing the top rows to stdout
///
/// # Arguments
///
/// * `config` - The validated crawl configuration
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Crawl and ranking completed
/// * `Err(RippleError)` - Construction, storage or ranking failed
pub async fn crawl(config: CrawlConfig) -> Result<CrawlOutcome> {
    let fetcher = HttpFetcher::new()?;
    let crawler = Crawler::new(config, fetcher).await?;
    tracing::info!(
        "Writing raw table to {} and top table to {}",
        crawler.config().raw_path().display(),
        crawler.config().top_path().display()
    );

    let stdout = std::io::stdout();
    let mut report = stdout.lock();
    crawler.run(&mut report).await
}
