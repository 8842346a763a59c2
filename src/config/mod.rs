//! Configuration module for Term-Ripple
//!
//! Settings come from an optional TOML file layered with command-line flags,
//! and are validated once into an immutable [`CrawlConfig`].
//!
//! # Example
//!
//! ```no_run
//! use term_ripple::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawl.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.max_depth());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CrawlConfig, CrawlSection, CrawlSettings, FetchSection, OutputSection};

// Re-export parser and validation functions
pub use parser::{compute_config_hash, load_config, load_settings, load_settings_with_hash};
pub use validation::validate;
