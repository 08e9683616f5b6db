//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A GST line of 5% on ₹25.10 is 1.255 - as a float it is 1.25499...     │
//! │  and "rounds half up" to 1.25 instead of 1.26.                         │
//! │                                                                         │
//! │  OUR SOLUTION: Integer paise                                            │
//! │    2510 paise × 500 bps = 1_255_000 → +5000 → /10000 = 126 paise       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use smartpos_core::money::Money;
//!
//! // Create from minor units (preferred)
//! let price = Money::from_cents(12_000); // 120.00
//!
//! // Checked arithmetic: overflow is a `None`, never a wrap
//! let doubled = price.checked_mul_quantity(2).unwrap();             // 240.00
//! let total = price.checked_add(Money::from_cents(600)).unwrap();   // 126.00
//! assert_eq!(doubled.cents(), 24_000);
//!
//! // Parse the decimal form used by the sales file
//! let parsed: Money = "126.00".parse().unwrap();
//! assert_eq!(parsed, total);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paise for INR, cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Matches the decimal text in the sales file, sign included
/// - **No operator impls**: Sums go through `checked_add`, so a corrupt
///   amount surfaces as an error instead of a wrapped total
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serde**: Serialized as the raw minor-unit integer
///
/// ## Where Money is Used
/// ```text
/// PriceList price ──► BillLine.unit_price ──► BillLine.line_total
///                                                   │
///                                                   ▼
///                    Bill.subtotal ──► GST ──► Bill.total ──► TransactionRecord
///                                                                   │
///                                                                   ▼
///                                         SalesReport.total_sales / total_tax
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use smartpos_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Calculates tax rounded to whole minor units, half away from zero.
    ///
    /// ## Commercial Rounding
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  ROUND HALF UP (away from zero)                                     │
    /// │                                                                     │
    /// │    0.5 → 1, 1.5 → 2, 2.5 → 3       (exact halves go up)            │
    /// │   -0.5 → -1                          (mirror image below zero)      │
    /// │                                                                     │
    /// │  This is what a customer checks with a calculator, so the printed  │
    /// │  bill always agrees with it.                                        │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Implementation
    /// `amount × bps` is in 1/10000 of a minor unit; adding (or, for
    /// negative amounts, subtracting) 5000 before the truncating division
    /// rounds the half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use smartpos_core::money::Money;
    /// use smartpos_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(18_000); // 180.00
    /// let gst = subtotal.calculate_tax(TaxRate::from_bps(500)); // 5%
    /// assert_eq!(gst.cents(), 900); // 9.00
    ///
    /// // 25.10 × 5% = 1.255 → 1.26
    /// let gst = Money::from_cents(2510).calculate_tax(TaxRate::from_bps(500));
    /// assert_eq!(gst.cents(), 126);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 keeps the intermediate product from overflowing
        let scaled = self.0 as i128 * rate.bps() as i128;
        let rounded = if scaled >= 0 {
            (scaled + 5000) / 10000
        } else {
            (scaled - 5000) / 10000
        };
        Money::from_cents(rounded as i64)
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(sum) => Some(Money(sum)),
            None => None,
        }
    }

    /// Multiplies money by a quantity, `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use smartpos_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(2500); // Samosa 25.00
    /// assert_eq!(unit_price.checked_mul_quantity(3), Some(Money::from_cents(7500)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_mul_quantity(2), None);
    /// ```
    #[inline]
    pub const fn checked_mul_quantity(&self, qty: i64) -> Option<Money> {
        match self.0.checked_mul(qty) {
            Some(product) => Some(Money(product)),
            None => None,
        }
    }
}

/// Parses a decimal with at most two fraction digits into an integer
/// scaled by 100. Shared with [`TaxRate`]'s percent parser, where
/// hundredths of a percent are basis points.
pub(crate) fn parse_hundredths(input: &str) -> Result<i64, String> {
    let input = input.trim();
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("'{}' is not a decimal number", input));
    }
    if fraction.len() > 2 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("'{}' must have at most two decimal places", input));
    }

    let too_large = || format!("'{}' is too large", input);
    let whole: i64 = whole.parse().map_err(|_| too_large())?;
    let fraction: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|_| too_large())? * 10,
        _ => fraction.parse().map_err(|_| too_large())?,
    };

    let value = whole
        .checked_mul(100)
        .and_then(|v| v.checked_add(fraction))
        .ok_or_else(too_large)?;

    Ok(if negative { -value } else { value })
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal form, `"189.00"`.
///
/// ## Note
/// No currency symbol: this is the form written to the sales file. The
/// front end adds the symbol from its configuration.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// Parses `"189"`, `"189.5"`, `"189.00"` or `"-5.50"`.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hundredths(s)
            .map(Money::from_cents)
            .map_err(|reason| ValidationError::InvalidFormat {
                field: "amount".to_string(),
                reason,
            })
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
