//! # Repository Module
//!
//! The [`TransactionStore`] trait and its backends.
//!
//! ## Backends
//! - [`file`] - CSV sales file (production)
//! - [`memory`] - `Vec` in memory (tests, embedding)

pub mod file;
pub mod memory;

use std::fmt;

use serde::{Deserialize, Serialize};

use smartpos_core::TransactionRecord;

use crate::error::StoreResult;

/// Stable identifier of a stored transaction.
///
/// The 1-based position of the record among all records ever appended.
/// The store never rewrites or removes rows, so an id keeps pointing at the
/// same sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(u64);

impl RecordId {
    /// Creates a RecordId from a 1-based row position.
    pub const fn new(position: u64) -> Self {
        RecordId(position)
    }

    /// The 1-based row position.
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Append-only persistence for transaction records.
pub trait TransactionStore {
    /// Persists one completed sale and returns the id it was given.
    fn append(&mut self, record: &TransactionRecord) -> StoreResult<RecordId>;

    /// Every stored record with its id, in append order.
    fn read_entries(&self) -> StoreResult<Vec<(RecordId, TransactionRecord)>>;

    /// Every stored record, in append order.
    fn read_all(&self) -> StoreResult<Vec<TransactionRecord>> {
        Ok(self
            .read_entries()?
            .into_iter()
            .map(|(_, record)| record)
            .collect())
    }
}
