//! # CSV Transaction Store
//!
//! The sales file backend.
//!
//! ## File Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       sales.csv Lifecycle                               │
//! │                                                                         │
//! │  1. FIRST SALE                                                         │
//! │     └── file missing or empty → header row, then the record            │
//! │                                                                         │
//! │  2. LATER SALES                                                        │
//! │     └── header checked, rows counted → record appended → RecordId      │
//! │                                                                         │
//! │  3. REPORTING                                                          │
//! │     └── read_entries() → header checked → every row decoded            │
//! │         (missing or empty file = no records; bad row = error)          │
//! │                                                                         │
//! │  Rows are never rewritten or deleted.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use smartpos_core::TransactionRecord;

use super::{RecordId, TransactionStore};
use crate::codec::{TransactionRow, HEADER};
use crate::error::{StoreError, StoreResult};

/// Transaction store backed by a CSV file.
#[derive(Debug, Clone)]
pub struct CsvTransactionStore {
    path: PathBuf,
}

impl CsvTransactionStore {
    /// Creates a store for `path`. Nothing is touched until the first call.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvTransactionStore { path: path.into() }
    }

    /// Location of the sales file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_error(&self, source: io::Error) -> StoreError {
        StoreError::Read {
            path: self.path.clone(),
            source,
        }
    }

    fn write_error(&self, source: io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }

    /// Opens a reader positioned after a verified header.
    ///
    /// `Ok(None)` means the file is missing or empty.
    fn open_reader(&self) -> StoreResult<Option<csv::Reader<File>>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.read_error(e)),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| self.csv_read_error(e, 0))?;

        if headers.is_empty() {
            return Ok(None);
        }

        if !headers.iter().eq(HEADER.iter().copied()) {
            return Err(StoreError::UnexpectedHeader {
                path: self.path.clone(),
                found: headers.iter().collect::<Vec<_>>().join(","),
            });
        }

        Ok(Some(reader))
    }

    /// I/O failures stay I/O failures; everything else is the row's fault.
    fn csv_read_error(&self, err: csv::Error, row: u64) -> StoreError {
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(source) => self.read_error(source),
                other => StoreError::malformed(row, format!("{:?}", other)),
            }
        } else {
            StoreError::malformed(row, err.to_string())
        }
    }

    fn csv_write_error(&self, err: csv::Error) -> StoreError {
        match err.into_kind() {
            csv::ErrorKind::Io(source) => self.write_error(source),
            other => self.write_error(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{:?}", other),
            )),
        }
    }

    /// Number of data rows already in the file.
    fn count_rows(&self) -> StoreResult<u64> {
        let Some(mut reader) = self.open_reader()? else {
            return Ok(0);
        };

        let mut count = 0;
        let mut record = csv::ByteRecord::new();
        loop {
            match reader.read_byte_record(&mut record) {
                Ok(true) => count += 1,
                Ok(false) => break,
                Err(e) => return Err(self.csv_read_error(e, count + 1)),
            }
        }
        Ok(count)
    }
}

impl TransactionStore for CsvTransactionStore {
    fn append(&mut self, record: &TransactionRecord) -> StoreResult<RecordId> {
        let existing = self.count_rows()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.write_error(e))?;

        let needs_header = file.metadata().map_err(|e| self.write_error(e))?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            debug!(path = %self.path.display(), "Writing sales file header");
            writer
                .write_record(HEADER)
                .map_err(|e| self.csv_write_error(e))?;
        }

        writer
            .serialize(TransactionRow::from(record))
            .map_err(|e| self.csv_write_error(e))?;
        writer.flush().map_err(|e| self.write_error(e))?;

        let id = RecordId::new(existing + 1);
        debug!(
            id = %id,
            path = %self.path.display(),
            customer = %record.customer_name,
            total = %record.total,
            "Appended transaction"
        );
        Ok(id)
    }

    fn read_entries(&self) -> StoreResult<Vec<(RecordId, TransactionRecord)>> {
        let Some(mut reader) = self.open_reader()? else {
            debug!(path = %self.path.display(), "Sales file missing or empty");
            return Ok(Vec::new());
        };

        let mut entries = Vec::new();
        for (index, row) in reader.deserialize::<TransactionRow>().enumerate() {
            let position = index as u64 + 1;
            let row = row.map_err(|e| self.csv_read_error(e, position))?;
            let record = TransactionRecord::try_from(row)
                .map_err(|reason| StoreError::malformed(position, reason))?;
            entries.push((RecordId::new(position), record));
        }

        debug!(
            path = %self.path.display(),
            count = entries.len(),
            "Read transaction history"
        );
        Ok(entries)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
