//! # Storage Error Types
//!
//! Error types for the transaction store.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / csv::Error                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the file path or row number           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (in the CLI) ← Error code + user-facing message              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Transaction store errors.
///
/// Nothing is retried and nothing is skipped: a failed append leaves the
/// sale unrecorded, a bad row fails the whole read.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Appending a record failed.
    ///
    /// ## When This Occurs
    /// - Directory does not exist or is read-only
    /// - Disk full
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the history failed at the I/O level.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A data row could not be decoded into a transaction record.
    ///
    /// `row` is the 1-based data row, header excluded.
    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: u64, reason: String },

    /// The file does not start with the expected header.
    #[error("Unexpected header in {}: {found}", path.display())]
    UnexpectedHeader { path: PathBuf, found: String },
}

impl StoreError {
    /// Creates a MalformedRow error.
    pub fn malformed(row: u64, reason: impl Into<String>) -> Self {
        StoreError::MalformedRow {
            row,
            reason: reason.into(),
        }
    }

    /// True for the failures of a write, false for read-side failures.
    pub fn is_write(&self) -> bool {
        matches!(self, StoreError::Write { .. })
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
