//! Record sink trait and error types
//!
//! The scheduler streams one record per visited page into a sink. Sinks
//! are append-only: records are never rewritten or removed.

use crate::storage::VisitRecord;
use thiserror::Error;

/// Errors that can occur while writing or reading the raw table
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Sink is closed")]
    Closed,

    #[error("Malformed record line '{content}': {reason}")]
    MalformedLine { content: String, reason: String },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Append-only destination for visit records
///
/// Implementations must make every appended record durable by the time
/// `flush` returns; the scheduler flushes after each record.
pub trait RecordSink {
    /// Appends a record after all previously appended records
    fn append(&mut self, record: &VisitRecord) -> StorageResult<()>;

    /// Pushes buffered records to durable storage
    fn flush(&mut self) -> StorageResult<()>;

    /// Flushes and releases the underlying resource
    ///
    /// Appending after `close` fails with [`StorageError::Closed`]. Closing
    /// twice is a no-op.
    fn close(&mut self) -> StorageResult<()>;
}
