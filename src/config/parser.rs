use crate::config::types::{CrawlConfig, CrawlSettings};
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads crawl settings from a TOML file without validating them
///
/// Settings loaded this way are usually layered with command-line overrides
/// before being passed to [`validate`].
pub fn load_settings(path: &Path) -> Result<CrawlSettings, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let settings: CrawlSettings = toml::from_str(&content)?;
    Ok(settings)
}

/// Loads and validates a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(CrawlConfig)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use term_ripple::config::load_config;
///
/// let config = load_config(Path::new("crawl.toml")).unwrap();
/// println!("Max depth: {}", config.max_depth());
/// ```
pub fn load_config(path: &Path) -> Result<CrawlConfig, ConfigError> {
    let settings = load_settings(path)?;
    validate(&settings)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so a pair of output tables can be matched to the file
/// that produced them.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads settings and returns both the settings and the file hash
pub fn load_settings_with_hash(path: &Path) -> Result<(CrawlSettings, String), ConfigError> {
    let settings = load_settings(path)?;
    let hash = compute_config_hash(path)?;
    Ok((settings, hash))
}
