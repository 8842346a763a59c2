use crate::ConfigError;
use regex::{Regex, RegexBuilder};

/// Compiled set of search terms
///
/// Patterns are compiled once and reused for every page of a crawl. Terms are
/// not escaped, so `colou?r` counts both spellings.
#[derive(Debug, Clone)]
pub struct TermCounter {
    patterns: Vec<Regex>,
}

impl TermCounter {
    /// Compiles the terms in order
    ///
    /// # Arguments
    ///
    /// * `terms` - Regular expression patterns, one per output column
    /// * `case_sensitive` - When false, patterns match case-insensitively
    ///
    /// # Returns
    ///
    /// * `Ok(TermCounter)` - All patterns compiled
    /// * `Err(ConfigError::InvalidTerm)` - The first pattern that failed to compile
    pub fn new(terms: &[String], case_sensitive: bool) -> Result<Self, ConfigError> {
        let patterns = terms
            .iter()
            .map(|term| {
                RegexBuilder::new(term)
                    .case_insensitive(!case_sensitive)
                    .build()
                    .map_err(|e| ConfigError::InvalidTerm {
                        pattern: term.clone(),
                        message: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Number of terms (and therefore counts per page)
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Counts non-overlapping matches of every term in `text`
    ///
    /// The returned vector has one entry per term, in configured order.
    pub fn count(&self, text: &str) -> Vec<u64> {
        self.patterns
            .iter()
            .map(|pattern| pattern.find_iter(text).count() as u64)
            .collect()
    }
}
