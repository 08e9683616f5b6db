//! # Row Codec
//!
//! Maps a [`TransactionRecord`] to one CSV row and back.
//!
//! ## Row Layout
//! ```text
//! CustomerName,OrderedItems,Subtotal,GST,FinalTotal,PaymentMethod,DateTime
//! Asha,Latte x2; Vada pav x1,270.00,13.50,283.50,UPI,2024-03-09 18:42:07
//!      └──────────┬────────┘ └──────────┬───────┘ └┬┘ └────────┬────────┘
//!         "<name> x<qty>"      "189.00" style     label   %Y-%m-%d %H:%M:%S
//!          joined by "; "      (minor units)
//! ```
//!
//! Item names never contain `;` (the price list rejects them), and the
//! quantity is split off at the LAST `" x"`, so names such as
//! `"Grilled Sandwich x2 combo"` survive the round trip.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use smartpos_core::validation::ITEM_SEPARATOR;
use smartpos_core::{Money, PaymentMethod, SoldItem, TransactionRecord, MAX_ITEM_QUANTITY};

/// Column names, in file order.
pub const HEADER: [&str; 7] = [
    "CustomerName",
    "OrderedItems",
    "Subtotal",
    "GST",
    "FinalTotal",
    "PaymentMethod",
    "DateTime",
];

/// Timestamp column format (local wall-clock time, whole seconds).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the sales file, every column as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRow {
    #[serde(rename = "CustomerName")]
    pub customer_name: String,
    #[serde(rename = "OrderedItems")]
    pub ordered_items: String,
    #[serde(rename = "Subtotal")]
    pub subtotal: String,
    #[serde(rename = "GST")]
    pub gst: String,
    #[serde(rename = "FinalTotal")]
    pub final_total: String,
    #[serde(rename = "PaymentMethod")]
    pub payment_method: String,
    #[serde(rename = "DateTime")]
    pub date_time: String,
}

impl From<&TransactionRecord> for TransactionRow {
    fn from(record: &TransactionRecord) -> Self {
        TransactionRow {
            customer_name: record.customer_name.clone(),
            ordered_items: format_items(&record.items),
            subtotal: record.subtotal.to_string(),
            gst: record.tax_amount.to_string(),
            final_total: record.total.to_string(),
            payment_method: record.payment_method.as_str().to_string(),
            date_time: record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

impl TryFrom<TransactionRow> for TransactionRecord {
    type Error = String;

    /// Decodes a row; the error is a human-readable reason.
    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        if row.customer_name.trim().is_empty() {
            return Err("customer name is empty".to_string());
        }

        let items = parse_items(&row.ordered_items)?;
        let subtotal = parse_amount("Subtotal", &row.subtotal)?;
        let tax_amount = parse_amount("GST", &row.gst)?;
        let total = parse_amount("FinalTotal", &row.final_total)?;

        let payment_method: PaymentMethod = row
            .payment_method
            .parse()
            .map_err(|e: smartpos_core::CoreError| e.to_string())?;

        let timestamp = NaiveDateTime::parse_from_str(row.date_time.trim(), TIMESTAMP_FORMAT)
            .map_err(|e| format!("DateTime '{}': {}", row.date_time, e))?;

        Ok(TransactionRecord {
            customer_name: row.customer_name,
            items,
            subtotal,
            tax_amount,
            total,
            payment_method,
            timestamp,
        })
    }
}

fn parse_amount(column: &str, value: &str) -> Result<Money, String> {
    value
        .parse::<Money>()
        .map_err(|e| format!("{}: {}", column, e))
}

// =============================================================================
// Item List Encoding
// =============================================================================

/// Encodes sold items as `"Latte x2; Vada pav x1"`.
pub fn format_items(items: &[SoldItem]) -> String {
    items
        .iter()
        .map(|item| format!("{} x{}", item.name, item.quantity))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Decodes an item list written by [`format_items`].
///
/// Rejects an empty list, a segment without `" x<qty>"`, an empty name and
/// a quantity outside `1..=MAX_ITEM_QUANTITY`, the range a cart can hold.
pub fn parse_items(encoded: &str) -> Result<Vec<SoldItem>, String> {
    if encoded.trim().is_empty() {
        return Err("ordered items are empty".to_string());
    }

    encoded
        .split(ITEM_SEPARATOR)
        .map(|segment| {
            let segment = segment.trim();
            let (name, quantity) = segment
                .rsplit_once(" x")
                .ok_or_else(|| format!("item '{}' has no quantity", segment))?;

            let name = name.trim();
            if name.is_empty() {
                return Err(format!("item '{}' has no name", segment));
            }

            let quantity: i64 = quantity
                .parse()
                .map_err(|_| format!("item '{}' has an invalid quantity", segment))?;
            if quantity <= 0 {
                return Err(format!("item '{}' has a non-positive quantity", segment));
            }
            if quantity > MAX_ITEM_QUANTITY {
                return Err(format!(
                    "item '{}' exceeds the maximum quantity ({})",
                    segment, MAX_ITEM_QUANTITY
                ));
            }

            Ok(SoldItem {
                name: name.to_string(),
                quantity,
            })
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
