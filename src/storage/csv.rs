//! CSV file backend for the raw and top tables

use crate::storage::traits::{RecordSink, StorageError, StorageResult};
use crate::storage::VisitRecord;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// File-backed record sink writing one CSV line per record
///
/// Creating the sink truncates the file and writes the optional header. The
/// handle stays open until [`RecordSink::close`].
pub struct CsvSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    records_written: u64,
}

impl CsvSink {
    /// Creates (or truncates) the table at `path`
    ///
    /// # Arguments
    ///
    /// * `path` - Location of the table
    /// * `header` - Header line to write first, if any
    pub fn create(path: &Path, header: Option<&str>) -> StorageResult<Self> {
        let file = File::create(path).map_err(|e| io_error(path, e))?;
        let mut writer = BufWriter::new(file);

        if let Some(header) = header {
            writeln!(writer, "{}", header).map_err(|e| io_error(path, e))?;
            writer.flush().map_err(|e| io_error(path, e))?;
        }

        tracing::debug!("Opened record table {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            writer: Some(writer),
            records_written: 0,
        })
    }

    /// Number of records appended so far
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for CsvSink {
    fn append(&mut self, record: &VisitRecord) -> StorageResult<()> {
        let writer = self.writer.as_mut().ok_or(StorageError::Closed)?;
        writeln!(writer, "{}", record.to_line()).map_err(|e| io_error(&self.path, e))?;
        self.records_written += 1;
        Ok(())
    }

    fn flush(&mut self) -> StorageResult<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.flush().map_err(|e| io_error(&self.path, e)),
            None => Ok(()),
        }
    }

    fn close(&mut self) -> StorageResult<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| io_error(&self.path, e))?;
            tracing::debug!(
                "Closed record table {} after {} records",
                self.path.display(),
                self.records_written
            );
        }
        Ok(())
    }
}

/// Writes a complete table (header plus records) in one pass
pub fn write_table(path: &Path, header: Option<&str>, records: &[VisitRecord]) -> StorageResult<()> {
    let mut sink = CsvSink::create(path, header)?;
    for record in records {
        sink.append(record)?;
    }
    sink.close()
}

/// Verifies that `path` can be opened for writing
///
/// A file that does not exist yet is created and removed again; an existing
/// file is opened without being truncated.
pub fn check_writable(path: &Path) -> StorageResult<()> {
    if path.exists() {
        OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|e| io_error(path, e))?;
        return Ok(());
    }

    File::create(path).map_err(|e| io_error(path, e))?;
    std::fs::remove_file(path).map_err(|e| io_error(path, e))?;
    Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        source,
    }
}
