//! Term-Ripple: a breadth-first term-counting web crawler
//!
//! This crate crawls outward from a seed page, level by level, counting how often
//! a set of search terms (regular expressions) occurs on every page it visits.
//! Results are streamed to a raw CSV table and then ranked into a top-N table.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod storage;
pub mod terms;
pub mod url;

use thiserror::Error;

/// Main error type for Term-Ripple operations
#[derive(Debug, Error)]
pub enum RippleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Can't write to file: {path}")]
    Unwritable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Illegal seed URL {url}: {source}")]
    SeedUnreachable {
        url: String,
        #[source]
        source: crawler::FetchError,
    },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Ranking error: {0}")]
    Rank(#[from] output::RankError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RippleError {
    /// Returns true if the error was raised before any page was crawled
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Unwritable { .. } | Self::SeedUnreachable { .. } | Self::Reqwest(_)
        )
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid term pattern '{pattern}': {message}")]
    InvalidTerm { pattern: String, message: String },
}

/// Result type alias for Term-Ripple operations
pub type Result<T> = std::result::Result<T, RippleError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{CrawlConfig, CrawlSettings};
pub use state::{CrawlResult, CrawlState};
pub use storage::VisitRecord;
pub use crate::url::normalize_href;
