//! # In-Memory Store
//!
//! A [`TransactionStore`] over a `Vec`, with the same ordering and id rules
//! as the CSV file.

use tracing::debug;

use smartpos_core::TransactionRecord;

use super::{RecordId, TransactionStore};
use crate::error::StoreResult;

/// Transaction store that keeps records in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransactionStore {
    records: Vec<TransactionRecord>,
}

impl MemoryTransactionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Checks if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TransactionStore for MemoryTransactionStore {
    fn append(&mut self, record: &TransactionRecord) -> StoreResult<RecordId> {
        self.records.push(record.clone());
        let id = RecordId::new(self.records.len() as u64);
        debug!(id = %id, customer = %record.customer_name, "Stored transaction in memory");
        Ok(id)
    }

    fn read_entries(&self) -> StoreResult<Vec<(RecordId, TransactionRecord)>> {
        Ok(self
            .records
            .iter()
            .enumerate()
            .map(|(index, record)| (RecordId::new(index as u64 + 1), record.clone()))
            .collect())
    }
}
