//! # Reporting Engine
//!
//! Aggregates transaction history into the admin's sales report.
//!
//! ## Report Flow
//! ```text
//! sales.csv ──► read_all() ──► filter_by_date(today) ──► aggregate() ──► SalesReport
//!                                                           │
//!                              one pass over every line:    │
//!                              • Σ total      → total_sales │
//!                              • Σ tax_amount → total_tax   │
//!                              • count        → transaction_count
//!                              • qty per item → most_sold_item
//! ```
//!
//! ## Most Sold Item
//! Quantities are tallied in a `BTreeMap`, so items are visited in name
//! order and only a strictly larger quantity replaces the current leader.
//! Ties therefore go to the lexicographically smallest name, whatever
//! order the records arrive in.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::TransactionRecord;

// =============================================================================
// Empty History Policy
// =============================================================================

/// What [`aggregate`] does when there are no records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EmptyHistoryPolicy {
    /// Return a report with zero totals and no most-sold item.
    #[default]
    Zeroed,
    /// Fail with [`CoreError::EmptyHistory`].
    Reject,
}

// =============================================================================
// Sales Report
// =============================================================================

/// Aggregate statistics over a set of transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesReport {
    /// Σ total over the records.
    pub total_sales: Money,
    /// Σ GST over the records.
    pub total_tax: Money,
    pub transaction_count: usize,
    /// `None` when no item was sold.
    pub most_sold_item: Option<String>,
}

/// Computes the sales report for `records`.
///
/// ## Errors
/// - `EmptyHistory` when `records` is empty and `policy` is
///   [`EmptyHistoryPolicy::Reject`]
/// - `AmountOverflow` when a sum leaves the `i64` range (only corrupt
///   records can get there)
///
/// ## Example
/// ```rust
/// use smartpos_core::reporting::{aggregate, EmptyHistoryPolicy};
/// use smartpos_core::{Money, TransactionRecord};
///
/// let history: Vec<TransactionRecord> = Vec::new();
/// let report = aggregate(&history, EmptyHistoryPolicy::Zeroed).unwrap();
/// assert_eq!(report.transaction_count, 0);
/// assert_eq!(report.total_sales, Money::zero());
/// assert!(report.most_sold_item.is_none());
/// ```
pub fn aggregate<'a, I>(records: I, policy: EmptyHistoryPolicy) -> CoreResult<SalesReport>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut report = SalesReport::default();
    let mut quantities: BTreeMap<&'a str, i64> = BTreeMap::new();

    for record in records {
        report.total_sales = report
            .total_sales
            .checked_add(record.total)
            .ok_or(CoreError::AmountOverflow { field: "total sales" })?;
        report.total_tax = report
            .total_tax
            .checked_add(record.tax_amount)
            .ok_or(CoreError::AmountOverflow { field: "total GST" })?;
        report.transaction_count += 1;

        for item in &record.items {
            tally(quantities.entry(item.name.as_str()).or_insert(0), item.quantity)?;
        }
    }

    if report.transaction_count == 0 && policy == EmptyHistoryPolicy::Reject {
        return Err(CoreError::EmptyHistory);
    }

    report.most_sold_item = most_sold(&quantities).map(str::to_string);
    Ok(report)
}

fn tally(count: &mut i64, quantity: i64) -> CoreResult<()> {
    *count = count
        .checked_add(quantity)
        .ok_or(CoreError::AmountOverflow { field: "quantity sold" })?;
    Ok(())
}

/// Leader of a name-ordered tally; first (smallest) name wins ties.
fn most_sold<'a>(quantities: &BTreeMap<&'a str, i64>) -> Option<&'a str> {
    let mut best: Option<(&'a str, i64)> = None;

    for (&name, &quantity) in quantities {
        match best {
            Some((_, best_quantity)) if quantity <= best_quantity => {}
            _ => best = Some((name, quantity)),
        }
    }

    best.map(|(name, _)| name)
}

/// Cumulative quantity sold per item, in name order.
///
/// The tally behind `most_sold_item`; the admin view prints it as a
/// breakdown under the headline figures.
pub fn item_quantities<'a, I>(records: I) -> CoreResult<BTreeMap<String, i64>>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut quantities = BTreeMap::new();
    for item in records.into_iter().flat_map(|record| &record.items) {
        tally(quantities.entry(item.name.clone()).or_insert(0), item.quantity)?;
    }
    Ok(quantities)
}

/// Records whose timestamp falls on `date`, in their original order.
pub fn filter_by_date<'a, I>(records: I, date: NaiveDate) -> Vec<&'a TransactionRecord>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    records
        .into_iter()
        .filter(|record| record.date() == date)
        .collect()
}

/// The end-of-day view: [`aggregate`] over the records of one date.
pub fn daily_report(
    records: &[TransactionRecord],
    date: NaiveDate,
    policy: EmptyHistoryPolicy,
) -> CoreResult<SalesReport> {
    aggregate(filter_by_date(records, date), policy)
}

// =============================================================================
// Unit Tests
// =============================================================================
