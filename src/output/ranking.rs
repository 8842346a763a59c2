//! Top-N ranking of the raw table
//!
//! The ranking pass runs after the raw table is closed: it parses every row,
//! sorts by total term occurrences (descending, stable) and keeps the first N.

use crate::config::CrawlConfig;
use crate::storage::{write_table, StorageError, VisitRecord};
use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;

/// Errors raised by the ranking pass
#[derive(Debug, Error)]
pub enum RankError {
    #[error("Can't read raw table {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed raw table line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: StorageError,
    },

    #[error("Requested the top {requested} pages but the raw table has only {available} records")]
    NotEnoughRecords { requested: usize, available: usize },

    #[error("Can't write top table: {0}")]
    Write(#[from] StorageError),

    #[error("Can't write report: {0}")]
    Report(#[source] std::io::Error),
}

/// Orders records by total occurrences, highest first
///
/// Equal totals compare equal, so a stable sort keeps their table order.
pub fn by_total_desc(a: &VisitRecord, b: &VisitRecord) -> Ordering {
    b.total().cmp(&a.total())
}

/// Returns the `top_n` records with the highest totals
///
/// # Arguments
///
/// * `records` - Rows in raw-table order
/// * `top_n` - Number of rows to keep
///
/// # Returns
///
/// * `Ok(Vec<VisitRecord>)` - Exactly `top_n` rows, descending by total
/// * `Err(RankError::NotEnoughRecords)` - Fewer than `top_n` rows were given
pub fn rank(records: Vec<VisitRecord>, top_n: usize) -> Result<Vec<VisitRecord>, RankError> {
    if top_n > records.len() {
        return Err(RankError::NotEnoughRecords {
            requested: top_n,
            available: records.len(),
        });
    }

    let mut sorted = records;
    sorted.sort_by(by_total_desc);
    sorted.truncate(top_n);
    Ok(sorted)
}

/// Reads every record of a raw table
///
/// The first line is skipped when the table was written with a header.
/// Blank lines are ignored.
pub fn read_records(path: &Path, has_header: bool) -> Result<Vec<VisitRecord>, RankError> {
    let read_error = |source| RankError::Read {
        path: path.display().to_string(),
        source,
    };

    let file = File::open(path).map_err(read_error)?;
    let reader = BufReader::new(file);
    let skip = usize::from(has_header);

    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate().skip(skip) {
        let line = line.map_err(read_error)?;
        if line.trim().is_empty() {
            continue;
        }
        let record = VisitRecord::parse_line(&line).map_err(|source| RankError::Malformed {
            line: index + 1,
            source,
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Produces the top-N table from a closed raw table
pub struct TopRanker {
    top_count: usize,
    header: Option<String>,
}

impl TopRanker {
    /// Creates a ranker keeping `top_count` rows
    ///
    /// `header` is expected as the first line of the raw table and is written
    /// as the first line of the top table.
    pub fn new(top_count: usize, header: Option<String>) -> Self {
        Self { top_count, header }
    }

    pub fn from_config(config: &CrawlConfig) -> Self {
        let header = config.header().then(|| config.header_line());
        Self::new(config.top_count(), header)
    }

    /// Ranks `raw_path` into `top_path` and echoes the ranked lines to `report`
    ///
    /// Nothing is written to `top_path` unless ranking succeeds.
    pub fn run<W: Write>(
        &self,
        raw_path: &Path,
        top_path: &Path,
        report: &mut W,
    ) -> Result<Vec<VisitRecord>, RankError> {
        let records = read_records(raw_path, self.header.is_some())?;
        let parsed = records.len();
        let top = rank(records, self.top_count)?;

        write_table(top_path, self.header.as_deref(), &top)?;

        for record in &top {
            writeln!(report, "{}", record.to_line()).map_err(RankError::Report)?;
        }

        tracing::info!(
            "Wrote top {} of {} pages to {}",
            top.len(),
            parsed,
            top_path.display()
        );

        Ok(top)
    }
}
