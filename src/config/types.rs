use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Unvalidated crawl settings, as read from a TOML file and/or the command line
///
/// Numeric fields are signed so that out-of-range input can be reported by
/// validation instead of being rejected by the parser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrawlSettings {
    #[serde(default)]
    pub crawl: CrawlSection,
    #[serde(default)]
    pub fetch: FetchSection,
    #[serde(default)]
    pub output: OutputSection,
}

/// What to crawl and how far
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlSection {
    /// URL the crawl starts from
    #[serde(default)]
    pub seed: Option<String>,

    /// Search terms (regular expressions), counted in this order
    #[serde(default)]
    pub terms: Vec<String>,

    /// Match terms case-sensitively
    #[serde(rename = "case-sensitive", default)]
    pub case_sensitive: bool,

    /// Depth ceiling, compared against the level counter for inequality
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: i64,

    /// Maximum number of successfully fetched pages
    #[serde(rename = "max-visited", default = "default_max_visited")]
    pub max_visited: i64,
}

/// Page fetch behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct FetchSection {
    /// Time to wait for a response from the server (milliseconds)
    #[serde(rename = "timeout-ms", default = "default_timeout_ms")]
    pub timeout_ms: i64,

    /// Whether the fetcher should execute page scripts
    #[serde(default = "default_true")]
    pub javascript: bool,

    /// Wait for background scripts scheduled to start within this window (milliseconds)
    #[serde(rename = "js-quiet-before-ms", default = "default_js_quiet_before_ms")]
    pub js_quiet_before_ms: i64,

    /// Upper bound on waiting for background scripts (milliseconds)
    #[serde(rename = "js-max-wait-ms", default = "default_js_max_wait_ms")]
    pub js_max_wait_ms: i64,
}

/// Output tables
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSection {
    /// Path of the raw (visit-order) CSV table
    #[serde(rename = "raw-path", default = "default_raw_path")]
    pub raw_path: String,

    /// Path of the top-N CSV table
    #[serde(rename = "top-path", default = "default_top_path")]
    pub top_path: String,

    /// Number of rows in the top-N table
    #[serde(rename = "top-count", default = "default_top_count")]
    pub top_count: i64,

    /// Write a `URL,<terms>` header line to both tables
    #[serde(default = "default_true")]
    pub header: bool,
}

fn default_max_depth() -> i64 {
    8
}

fn default_max_visited() -> i64 {
    10_000
}

fn default_timeout_ms() -> i64 {
    7_500
}

fn default_js_quiet_before_ms() -> i64 {
    1_000
}

fn default_js_max_wait_ms() -> i64 {
    5_000
}

fn default_raw_path() -> String {
    "Out.csv".to_string()
}

fn default_top_path() -> String {
    "OutTop.csv".to_string()
}

fn default_top_count() -> i64 {
    10
}

fn default_true() -> bool {
    true
}

impl Default for CrawlSection {
    fn default() -> Self {
        Self {
            seed: None,
            terms: Vec::new(),
            case_sensitive: false,
            max_depth: default_max_depth(),
            max_visited: default_max_visited(),
        }
    }
}

impl Default for FetchSection {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            javascript: true,
            js_quiet_before_ms: default_js_quiet_before_ms(),
            js_max_wait_ms: default_js_max_wait_ms(),
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            raw_path: default_raw_path(),
            top_path: default_top_path(),
            top_count: default_top_count(),
            header: true,
        }
    }
}

/// Validated, immutable crawl configuration
///
/// The only way to obtain one is [`crate::config::validate`], so every value
/// carries the range invariants checked there.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub(crate) seed: String,
    pub(crate) terms: Vec<String>,
    pub(crate) case_sensitive: bool,
    pub(crate) max_depth: u32,
    pub(crate) max_visited: u64,
    pub(crate) top_count: usize,
    pub(crate) fetch_timeout: Duration,
    pub(crate) javascript: bool,
    pub(crate) js_quiet_before: Duration,
    pub(crate) js_max_wait: Duration,
    pub(crate) header: bool,
    pub(crate) raw_path: PathBuf,
    pub(crate) top_path: PathBuf,
}

impl CrawlConfig {
    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn max_visited(&self) -> u64 {
        self.max_visited
    }

    pub fn top_count(&self) -> usize {
        self.top_count
    }

    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    pub fn javascript(&self) -> bool {
        self.javascript
    }

    pub fn js_quiet_before(&self) -> Duration {
        self.js_quiet_before
    }

    pub fn js_max_wait(&self) -> Duration {
        self.js_max_wait
    }

    pub fn header(&self) -> bool {
        self.header
    }

    pub fn raw_path(&self) -> &Path {
        &self.raw_path
    }

    pub fn top_path(&self) -> &Path {
        &self.top_path
    }

    /// Header line shared by the raw and top tables
    pub fn header_line(&self) -> String {
        format!("URL,{}", self.terms.join(","))
    }
}
