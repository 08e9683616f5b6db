//! # smartpos-store: Transaction Storage for Smart POS
//!
//! This crate persists completed sales and reads them back for reporting.
//! The default backend is a CSV file the shop owner can open in a
//! spreadsheet.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Smart POS Data Flow                              │
//! │                                                                         │
//! │  finalize_bill() ──► TransactionRecord                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  smartpos-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌──────────────────┐    ┌────────────┐  │   │
//! │  │   │    codec      │    │   repository     │    │   error    │  │   │
//! │  │   │               │    │                  │    │            │  │   │
//! │  │   │ TransactionRow│◄───│ CsvTransaction-  │    │ StoreError │  │   │
//! │  │   │ "Latte x2; …" │    │   Store          │    │            │  │   │
//! │  │   │               │    │ MemoryTransac-   │    │            │  │   │
//! │  │   │               │    │   tionStore      │    │            │  │   │
//! │  │   └───────────────┘    └──────────────────┘    └────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                         sales.csv                               │   │
//! │  │  CustomerName,OrderedItems,Subtotal,GST,FinalTotal,...          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`codec`] - Row layout and the item list encoding
//! - [`repository`] - The `TransactionStore` trait and its backends
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use smartpos_store::{CsvTransactionStore, TransactionStore};
//!
//! let mut store = CsvTransactionStore::new("sales.csv");
//! let id = store.append(&record)?;
//! let history = store.read_all()?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codec;
pub mod error;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use codec::{HEADER, TIMESTAMP_FORMAT};
pub use error::{StoreError, StoreResult};
pub use repository::file::CsvTransactionStore;
pub use repository::memory::MemoryTransactionStore;
pub use repository::{RecordId, TransactionStore};
