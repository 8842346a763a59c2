//! Page fetching
//!
//! This module handles:
//! - The `PageFetcher` seam the scheduler fetches pages through
//! - Per-request options derived from the crawl configuration
//! - An HTTP implementation built on `reqwest`
//! - Classification of fetch failures

use crate::config::CrawlConfig;
use crate::crawler::parser::parse_page;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;

/// User agent sent with every request
const USER_AGENT: &str = concat!("TermRipple/", env!("CARGO_PKG_VERSION"));

/// Maximum number of redirect hops followed per request
const MAX_REDIRECTS: usize = 10;

/// Plain text and raw links extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    /// Visible text with whitespace runs collapsed
    pub text: String,

    /// `href` values of the page's anchors, unmodified, in document order
    pub anchors: Vec<String>,
}

/// Per-request fetch settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Request timeout; zero disables it
    pub timeout: Duration,

    /// Whether the fetcher should execute JavaScript
    pub javascript: bool,

    /// Quiet period to wait for before JavaScript starts
    pub js_quiet_before: Duration,

    /// Upper bound on waiting for background JavaScript
    pub js_max_wait: Duration,
}

impl FetchOptions {
    pub fn from_config(config: &CrawlConfig) -> Self {
        Self {
            timeout: config.fetch_timeout(),
            javascript: config.javascript(),
            js_quiet_before: config.js_quiet_before(),
            js_max_wait: config.js_max_wait(),
        }
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(7500),
            javascript: true,
            js_quiet_before: Duration::from_millis(1000),
            js_max_wait: Duration::from_millis(5000),
        }
    }
}

/// Reasons a page could not be fetched
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u128 },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} is not an HTML page (Content-Type: {content_type})")]
    ContentMismatch { url: String, content_type: String },
}

/// Retrieves a page and extracts its text and links
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url`
    ///
    /// A failure means the page is skipped; it never aborts the crawl.
    async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<PageContent, FetchError>;
}

/// `PageFetcher` backed by a `reqwest` client
///
/// Redirects are followed and invalid TLS certificates are accepted.
/// JavaScript is not executed.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds the underlying HTTP client
    ///
    /// # Returns
    ///
    /// * `Ok(HttpFetcher)` - Client ready for use
    /// * `Err(reqwest::Error)` - The TLS backend could not be initialized
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .danger_accept_invalid_certs(true)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<PageContent, FetchError> {
        if options.javascript {
            tracing::debug!(
                "JavaScript requested for {} (quiet {}ms, max wait {}ms); serving static HTML",
                url,
                options.js_quiet_before.as_millis(),
                options.js_max_wait.as_millis()
            );
        }

        let mut request = self.client.get(url);
        if !options.timeout.is_zero() {
            request = request.timeout(options.timeout);
        }

        let classify = |source: reqwest::Error| {
            if source.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                    timeout_ms: options.timeout.as_millis(),
                }
            } else {
                FetchError::Http {
                    url: url.to_string(),
                    source,
                }
            }
        };

        let response = request.send().await.map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !is_html(&content_type) {
            return Err(FetchError::ContentMismatch {
                url: url.to_string(),
                content_type,
            });
        }

        let body = response.text().await.map_err(classify)?;
        Ok(parse_page(&body))
    }
}

/// Returns true for HTML media types; a missing Content-Type is treated as HTML
fn is_html(content_type: &str) -> bool {
    if content_type.is_empty() {
        return true;
    }
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    media_type == "text/html" || media_type == "application/xhtml+xml"
}
