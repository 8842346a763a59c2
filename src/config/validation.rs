use crate::config::types::{CrawlConfig, CrawlSection, CrawlSettings, FetchSection, OutputSection};
use crate::terms::TermCounter;
use crate::ConfigError;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Validates settings and freezes them into a [`CrawlConfig`]
pub fn validate(settings: &CrawlSettings) -> Result<CrawlConfig, ConfigError> {
    let seed = validate_seed(&settings.crawl)?;
    validate_terms(&settings.crawl)?;
    let (max_depth, max_visited) = validate_limits(&settings.crawl)?;
    let (fetch_timeout, js_quiet_before, js_max_wait) = validate_fetch(&settings.fetch)?;
    let top_count = validate_output(&settings.output, max_visited)?;

    Ok(CrawlConfig {
        seed,
        terms: settings.crawl.terms.clone(),
        case_sensitive: settings.crawl.case_sensitive,
        max_depth,
        max_visited,
        top_count,
        fetch_timeout,
        javascript: settings.fetch.javascript,
        js_quiet_before,
        js_max_wait,
        header: settings.output.header,
        raw_path: PathBuf::from(&settings.output.raw_path),
        top_path: PathBuf::from(&settings.output.top_path),
    })
}

/// The seed must be an absolute http(s) URL
fn validate_seed(crawl: &CrawlSection) -> Result<String, ConfigError> {
    let seed = match crawl.seed.as_deref() {
        Some(seed) if !seed.is_empty() => seed,
        _ => {
            return Err(ConfigError::Validation(
                "seed URL is required".to_string(),
            ))
        }
    };

    let url = Url::parse(seed)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed URL '{}' must use http or https, got {}",
            seed,
            url.scheme()
        )));
    }

    Ok(seed.to_string())
}

fn validate_terms(crawl: &CrawlSection) -> Result<(), ConfigError> {
    if crawl.terms.is_empty() {
        return Err(ConfigError::Validation(
            "at least one search term is required".to_string(),
        ));
    }

    if crawl.terms.iter().any(|t| t.is_empty()) {
        return Err(ConfigError::Validation(
            "search terms cannot be empty".to_string(),
        ));
    }

    // Compiling up front turns a bad pattern into a construction error
    TermCounter::new(&crawl.terms, crawl.case_sensitive)?;

    Ok(())
}

fn validate_limits(crawl: &CrawlSection) -> Result<(u32, u64), ConfigError> {
    if crawl.max_depth < 0 {
        return Err(ConfigError::Validation(format!(
            "max-depth must be >= 0, got {}",
            crawl.max_depth
        )));
    }

    let max_depth = u32::try_from(crawl.max_depth).map_err(|_| {
        ConfigError::Validation(format!("max-depth is too large: {}", crawl.max_depth))
    })?;

    if crawl.max_visited < 1 {
        return Err(ConfigError::Validation(format!(
            "max-visited must be >= 1, got {}",
            crawl.max_visited
        )));
    }

    Ok((max_depth, crawl.max_visited as u64))
}

fn validate_fetch(fetch: &FetchSection) -> Result<(Duration, Duration, Duration), ConfigError> {
    let timeout = non_negative_millis("timeout-ms", fetch.timeout_ms)?;
    let quiet_before = non_negative_millis("js-quiet-before-ms", fetch.js_quiet_before_ms)?;
    let max_wait = non_negative_millis("js-max-wait-ms", fetch.js_max_wait_ms)?;
    Ok((timeout, quiet_before, max_wait))
}

fn non_negative_millis(name: &str, value: i64) -> Result<Duration, ConfigError> {
    if value < 0 {
        return Err(ConfigError::Validation(format!(
            "{} must be >= 0, got {}",
            name, value
        )));
    }
    Ok(Duration::from_millis(value as u64))
}

fn validate_output(output: &OutputSection, max_visited: u64) -> Result<usize, ConfigError> {
    if output.raw_path.is_empty() {
        return Err(ConfigError::Validation(
            "raw-path cannot be empty".to_string(),
        ));
    }

    if output.top_path.is_empty() {
        return Err(ConfigError::Validation(
            "top-path cannot be empty".to_string(),
        ));
    }

    if output.raw_path == output.top_path {
        return Err(ConfigError::Validation(format!(
            "raw-path and top-path must differ, both are '{}'",
            output.raw_path
        )));
    }

    if output.top_count < 0 {
        return Err(ConfigError::Validation(format!(
            "top-count must be >= 0, got {}",
            output.top_count
        )));
    }

    if (output.top_count as u64) > max_visited {
        return Err(ConfigError::Validation(format!(
            "max-visited ({}) can't be lower than top-count ({})",
            max_visited, output.top_count
        )));
    }

    Ok(output.top_count as usize)
}
