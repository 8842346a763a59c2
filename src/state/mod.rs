//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: visited/current/next URL sets, visit counter and level counter
//! - `CrawlResult`: terminal status of a run and its exit code

mod crawl_result;
mod crawl_state;

// Re-export main types
pub use crawl_result::CrawlResult;
pub use crawl_state::CrawlState;
