//! Storage module for the raw statistics table
//!
//! This module handles:
//! - The `VisitRecord` row type and its CSV line format
//! - The append-only `RecordSink` trait the scheduler writes through
//! - A CSV file sink and an in-memory sink

mod csv;
mod traits;

pub use self::csv::{check_writable, write_table, CsvSink};
pub use traits::{RecordSink, StorageError, StorageResult};

/// Commas inside URLs are percent-encoded so the first field stays unambiguous
const ENCODED_COMMA: &str = "%2C";

/// One row of the raw table: a visited page and its per-term counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitRecord {
    url: String,
    counts: Vec<u64>,
}

impl VisitRecord {
    /// Creates a record; `counts` must follow the configured term order
    pub fn new(url: impl Into<String>, counts: Vec<u64>) -> Self {
        Self {
            url: url.into(),
            counts,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Sum of all per-term counts
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Formats the record as `<url>,<count1>,<count2>,...`
    pub fn to_line(&self) -> String {
        let mut line = self.url.replace(',', ENCODED_COMMA);
        for count in &self.counts {
            line.push(',');
            line.push_str(&count.to_string());
        }
        line
    }

    /// Parses a line produced by [`VisitRecord::to_line`]
    ///
    /// Every `%2C` in the URL field is decoded to `,`, including one that was
    /// literally part of the URL; such a record parses to a different `url()`
    /// than the one that was written.
    pub fn parse_line(line: &str) -> StorageResult<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let malformed = |reason: String| StorageError::MalformedLine {
            content: line.to_string(),
            reason,
        };

        let mut fields = line.split(',');
        let url = match fields.next() {
            Some(url) if !url.is_empty() => url.replace(ENCODED_COMMA, ","),
            _ => return Err(malformed("missing URL".to_string())),
        };

        let counts = fields
            .map(|field| {
                field
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| malformed(format!("bad count '{}': {}", field, e)))
            })
            .collect::<StorageResult<Vec<u64>>>()?;

        if counts.is_empty() {
            return Err(malformed("no term counts".to_string()));
        }

        Ok(Self { url, counts })
    }
}

/// Sink that keeps records in memory, in append order
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<VisitRecord>,
    flushes: usize,
    closed: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[VisitRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<VisitRecord> {
        self.records
    }

    /// Number of times `flush` was called
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl RecordSink for MemorySink {
    fn append(&mut self, record: &VisitRecord) -> StorageResult<()> {
        if self.closed {
            return Err(StorageError::Closed);
        }
        self.records.push(record.clone());
        Ok(())
    }

    fn flush(&mut self) -> StorageResult<()> {
        self.flushes += 1;
        Ok(())
    }

    fn close(&mut self) -> StorageResult<()> {
        self.closed = true;
        Ok(())
    }
}
