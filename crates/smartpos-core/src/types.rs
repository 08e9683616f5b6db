//! # Domain Types
//!
//! Core domain types shared by billing, reporting and the transaction store.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐   ┌─────────────────┐   │
//! │  │   PriceList     │   │ TransactionRecord   │   │ PaymentMethod   │   │
//! │  │  ─────────────  │   │  ─────────────────  │   │  ─────────────  │   │
//! │  │  name → price   │   │  customer_name      │   │  Cash           │   │
//! │  │  (immutable)    │   │  items (SoldItem)   │   │  Card           │   │
//! │  └─────────────────┘   │  subtotal / GST     │   │  UPI            │   │
//! │                        │  total              │   └─────────────────┘   │
//! │  ┌─────────────────┐   │  payment_method     │                          │
//! │  │    TaxRate      │   │  timestamp          │                          │
//! │  │  bps (u32)      │   └─────────────────────┘                          │
//! │  │  500 = 5%       │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{parse_hundredths, Money};
use crate::validation::{validate_item_name, validate_price, validate_tax_rate_bps};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 500 bps = 5% (GST on restaurant service)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(crate::DEFAULT_TAX_RATE_BPS)
    }
}

/// Percent form, `"5%"` or `"8.25%"`.
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        match self.0 % 100 {
            0 => write!(f, "{}%", whole),
            frac if frac % 10 == 0 => write!(f, "{}.{}%", whole, frac / 10),
            frac => write!(f, "{}.{:02}%", whole, frac),
        }
    }
}

/// Parses a percentage such as `"5"`, `"5%"` or `"8.25"`.
///
/// Hundredths of a percent are basis points, so no floating point is
/// involved.
impl FromStr for TaxRate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_suffix('%').unwrap_or(s);
        let bps = parse_hundredths(s).map_err(|reason| ValidationError::InvalidFormat {
            field: "tax_rate".to_string(),
            reason,
        })?;
        let bps = u32::try_from(bps).map_err(|_| ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        })?;
        validate_tax_rate_bps(bps)?;
        Ok(TaxRate(bps))
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on the counter terminal.
    Card,
    /// Unified Payments Interface (QR / VPA).
    #[serde(rename = "UPI")]
    Upi,
}

impl PaymentMethod {
    /// Every accepted method, in the order the till offers them.
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Upi,
    ];

    /// The label written to the sales file and printed on the bill.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Upi => "UPI",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive: `"cash"`, `"CARD"` and `"Upi"` are all accepted.
impl FromStr for PaymentMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::InvalidPaymentMethod(trimmed.to_string()))
    }
}

// =============================================================================
// Price List
// =============================================================================

/// Item name → unit price, fixed for the session.
///
/// ## Invariants
/// - Names are unique, non-empty and contain no `;` or line break
/// - Every price is positive and at most [`MAX_UNIT_PRICE`](crate::MAX_UNIT_PRICE)
///
/// Both are checked once in [`PriceList::new`]; afterwards the list is
/// read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct PriceList {
    prices: BTreeMap<String, Money>,
}

impl PriceList {
    /// Builds a price list from `(name, price)` pairs.
    ///
    /// ## Errors
    /// - `Validation(Duplicate)` when a name appears twice
    /// - `Validation(..)` for an invalid name or a non-positive price
    pub fn new<N, I>(entries: I) -> CoreResult<Self>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Money)>,
    {
        let mut prices = BTreeMap::new();

        for (name, price) in entries {
            let name: String = name.into();
            validate_item_name(&name)?;
            validate_price(price)?;

            if prices.contains_key(&name) {
                return Err(ValidationError::Duplicate {
                    field: "item".to_string(),
                    value: name,
                }
                .into());
            }
            prices.insert(name, price);
        }

        Ok(PriceList { prices })
    }

    /// Unit price of an item, if it is on the list.
    #[inline]
    pub fn price_of(&self, item_name: &str) -> Option<Money> {
        self.prices.get(item_name).copied()
    }

    /// Checks if an item is on the list.
    #[inline]
    pub fn contains(&self, item_name: &str) -> bool {
        self.prices.contains_key(item_name)
    }

    /// Items in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> + '_ {
        self.prices.iter().map(|(name, price)| (name.as_str(), *price))
    }

    /// Number of items on the list.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Checks if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

// =============================================================================
// Transaction Record
// =============================================================================

/// One line of a completed sale: what left the counter, and how many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SoldItem {
    pub name: String,
    pub quantity: i64,
}

/// The durable record of a completed sale.
///
/// Created exactly once per sale by
/// [`finalize_bill`](crate::billing::finalize_bill), appended to the
/// store, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TransactionRecord {
    pub customer_name: String,
    /// Lines in the order they were rung up.
    pub items: Vec<SoldItem>,
    pub subtotal: Money,
    /// GST collected on this sale.
    pub tax_amount: Money,
    pub total: Money,
    pub payment_method: PaymentMethod,
    /// Local wall-clock time at the till, whole seconds.
    #[ts(as = "String")]
    pub timestamp: NaiveDateTime,
}

impl TransactionRecord {
    /// Calendar day of the sale, used by daily reports.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_default_is_gst() {
        assert_eq!(TaxRate::default().bps(), 500);
    }

    #[test]
    fn test_tax_rate_parse() {
        assert_eq!("5".parse::<TaxRate>().unwrap().bps(), 500);
        assert_eq!("5%".parse::<TaxRate>().unwrap().bps(), 500);
        assert_eq!("8.25".parse::<TaxRate>().unwrap().bps(), 825);
        assert_eq!("0".parse::<TaxRate>().unwrap(), TaxRate::from_bps(0));

        assert!("-5".parse::<TaxRate>().is_err());
        assert!("101".parse::<TaxRate>().is_err());
        assert!("five".parse::<TaxRate>().is_err());
        assert!("8.125".parse::<TaxRate>().is_err());
    }

    #[test]
    fn test_tax_rate_display() {
        assert_eq!(TaxRate::from_bps(500).to_string(), "5%");
        assert_eq!(TaxRate::from_bps(825).to_string(), "8.25%");
        assert_eq!(TaxRate::from_bps(1250).to_string(), "12.5%");
        assert_eq!(TaxRate::from_bps(5).to_string(), "0.05%");
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!("Cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!("card".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert_eq!(" upi ".parse::<PaymentMethod>().unwrap(), PaymentMethod::Upi);

        let err = "cheque".parse::<PaymentMethod>().unwrap_err();
        assert_eq!(err, CoreError::InvalidPaymentMethod("cheque".to_string()));
    }

    #[test]
    fn test_payment_method_serializes_as_label() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Upi).unwrap(), "\"UPI\"");
        assert_eq!(PaymentMethod::Upi.to_string(), "UPI");
    }

    #[test]
    fn test_price_list_lookup() {
        let prices = PriceList::new([
            ("Latte", Money::from_cents(12_000)),
            ("Samosa", Money::from_cents(2_500)),
        ])
        .unwrap();

        assert_eq!(prices.len(), 2);
        assert_eq!(prices.price_of("Latte"), Some(Money::from_cents(12_000)));
        assert_eq!(prices.price_of("latte"), None);
        assert!(prices.contains("Samosa"));
    }

    #[test]
    fn test_price_list_rejects_duplicates() {
        let err = PriceList::new([
            ("Latte", Money::from_cents(12_000)),
            ("Latte", Money::from_cents(13_000)),
        ])
        .unwrap_err();

        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_price_list_rejects_bad_entries() {
        assert!(PriceList::new([("Latte", Money::zero())]).is_err());
        assert!(PriceList::new([("Latte", Money::from_cents(-100))]).is_err());
        assert!(PriceList::new([("", Money::from_cents(100))]).is_err());
        assert!(PriceList::new([("Tea; Coffee", Money::from_cents(100))]).is_err());
    }

    #[test]
    fn test_record_date() {
        let record = TransactionRecord {
            customer_name: "Asha".to_string(),
            items: vec![
                SoldItem { name: "Latte".to_string(), quantity: 2 },
                SoldItem { name: "Samosa".to_string(), quantity: 3 },
            ],
            subtotal: Money::from_cents(31_500),
            tax_amount: Money::from_cents(1_575),
            total: Money::from_cents(33_075),
            payment_method: PaymentMethod::Cash,
            timestamp: NaiveDate::from_ymd_opt(2024, 3, 9)
                .unwrap()
                .and_hms_opt(18, 30, 0)
                .unwrap(),
        };

        assert_eq!(record.date(), NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    }
}
