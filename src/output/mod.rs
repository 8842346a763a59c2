//! Output module for ranking results and reporting on a run
//!
//! This module handles:
//! - Ranking the raw table and writing the top-N table
//! - Collecting and logging run statistics

mod ranking;
pub mod stats;

pub use ranking::{by_total_desc, rank, read_records, RankError, TopRanker};
pub use stats::{log_statistics, CrawlStatistics};
