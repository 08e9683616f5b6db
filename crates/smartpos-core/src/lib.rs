//! # smartpos-core: Pure Business Logic for Smart POS
//!
//! This crate is the **heart** of Smart POS. It turns a cashier's cart into
//! a tax-inclusive bill, a bill into a transaction record, and a history of
//! records into the admin's sales report.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Smart POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Front End (smartpos CLI / GUI / web form)          │   │
//! │  │    Menu ──► Cart ──► Bill ──► Payment ──► Admin report          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ smartpos-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  billing  │  │ reporting │  │   │
//! │  │   │ PriceList │  │   Money   │  │   Cart    │  │ aggregate │  │   │
//! │  │   │ Record    │  │  TaxRate  │  │   Bill    │  │ by date   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO FILES • PURE FUNCTIONS                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               smartpos-store (sales.csv, append-only)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (PriceList, TransactionRecord, PaymentMethod, TaxRate)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`billing`] - Cart building, bill computation, bill finalization
//! - [`reporting`] - Sales report aggregation and date scoping
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use smartpos_core::billing::{add_item, compute_bill, Cart};
//! use smartpos_core::{Money, PriceList, TaxRate};
//!
//! let prices = PriceList::new([
//!     ("Coffee", Money::from_cents(5_000)),
//!     ("Sandwich", Money::from_cents(8_000)),
//! ])
//! .unwrap();
//!
//! let cart = add_item(&Cart::new(), &prices, "Coffee", 2).unwrap();
//! let cart = add_item(&cart, &prices, "Sandwich", 1).unwrap();
//!
//! let bill = compute_bill(&cart, &prices, TaxRate::from_bps(500)).unwrap();
//! assert_eq!(bill.subtotal().to_string(), "180.00");
//! assert_eq!(bill.tax_amount().to_string(), "9.00");
//! assert_eq!(bill.total().to_string(), "189.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod error;
pub mod money;
pub mod reporting;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use billing::{Bill, BillLine, Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use reporting::{EmptyHistoryPolicy, SalesReport};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default GST rate in basis points (500 = 5%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 500;

/// Maximum distinct items allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single item in a cart.
///
/// Catches a typed 1000 where 10 was meant.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest unit price a price list accepts (₹1,00,00,000.00).
///
/// `MAX_UNIT_PRICE × MAX_ITEM_QUANTITY × MAX_CART_ITEMS` plus GST stays
/// far inside `i64`.
pub const MAX_UNIT_PRICE: Money = Money::from_cents(1_000_000_000);
