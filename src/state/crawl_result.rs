//! Terminal status of a crawl run
//!
//! Each status maps to the process exit code reported by the command-line
//! front end.

use std::fmt;

/// How a crawl run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlResult {
    /// Every discoverable page within the limits was attempted
    NoMorePages,

    /// The depth ceiling stopped the crawl while links were still pending
    DepthLimitReached,

    /// The visit ceiling stopped the crawl
    VisitLimitReached,

    /// The crawl could not be set up, or failed unrecoverably
    ConstructionFailed,
}

impl CrawlResult {
    /// Process exit code for this status
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoMorePages => 0,
            Self::DepthLimitReached => 1,
            Self::VisitLimitReached => 2,
            Self::ConstructionFailed => -1,
        }
    }

    /// Returns true if a limit, rather than the link graph, ended the crawl
    pub fn is_limited(&self) -> bool {
        matches!(self, Self::DepthLimitReached | Self::VisitLimitReached)
    }

    /// Human-readable description used in logs and the run summary
    pub fn description(&self) -> &'static str {
        match self {
            Self::NoMorePages => "no pages left to process",
            Self::DepthLimitReached => "maximum depth reached",
            Self::VisitLimitReached => "page visit limit reached",
            Self::ConstructionFailed => "unsuccessful completion",
        }
    }
}

impl fmt::Display for CrawlResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}
