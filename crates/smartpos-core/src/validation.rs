//! # Validation Module
//!
//! Input validation rules for Smart POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end                                                    │
//! │  ├── Argument parsing (quantity is a number, date is a date)           │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: smartpos-core                                                │
//! │  ├── THIS MODULE: names, prices, rates                                 │
//! │  └── billing: quantities, known items, payment methods                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: smartpos-store                                               │
//! │  └── Rows that do not parse back are rejected on read                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use smartpos_core::validation::{validate_customer_name, validate_item_name};
//!
//! assert!(validate_item_name("Vada pav").is_ok());
//! assert_eq!(validate_customer_name("  Asha ").unwrap(), "Asha");
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted item or customer name, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// Separator between lines in the stored item list (`"Latte x2; Samosa x1"`).
pub const ITEM_SEPARATOR: char = ';';

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item name for the price list.
///
/// ## Rules
/// - Must not be empty or whitespace, and must not carry surrounding spaces
/// - At most 100 characters
/// - No `;` and no line breaks, since those delimit stored item lists
///
/// ## Example
/// ```rust
/// use smartpos_core::validation::validate_item_name;
///
/// assert!(validate_item_name("Masala Tea").is_ok());
/// assert!(validate_item_name("").is_err());
/// assert!(validate_item_name("Tea; Coffee").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "item name".to_string(),
        });
    }

    if name.trim() != name {
        return Err(ValidationError::InvalidFormat {
            field: "item name".to_string(),
            reason: "must not start or end with whitespace".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "item name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    if name.contains(ITEM_SEPARATOR) || name.contains(&['\n', '\r'][..]) {
        return Err(ValidationError::InvalidFormat {
            field: "item name".to_string(),
            reason: "must not contain ';' or line breaks".to_string(),
        });
    }

    Ok(())
}

/// Validates a customer name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 100 characters
/// - No line breaks
pub fn validate_customer_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "customer name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "customer name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    if name.contains(&['\n', '\r'][..]) {
        return Err(ValidationError::InvalidFormat {
            field: "customer name".to_string(),
            reason: "must not contain line breaks".to_string(),
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be positive (> 0); the menu has no free items
/// - At most [`MAX_UNIT_PRICE`](crate::MAX_UNIT_PRICE), which keeps every
///   bill within `i64` paise
///
/// ## Example
/// ```rust
/// use smartpos_core::money::Money;
/// use smartpos_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(2500)).is_ok());
/// assert!(validate_price(Money::zero()).is_err());
/// assert!(validate_price("50000000000000000".parse().unwrap()).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if price > crate::MAX_UNIT_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "price (minor units)".to_string(),
            min: 1,
            max: crate::MAX_UNIT_PRICE.cents(),
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Latte").is_ok());
        assert!(validate_item_name("Vada pav").is_ok());
        assert!(validate_item_name("Grilled Sandwich x2 combo").is_ok());

        assert!(validate_item_name("").is_err());
        assert!(validate_item_name("   ").is_err());
        assert!(validate_item_name(" Latte").is_err());
        assert!(validate_item_name("Tea;Coffee").is_err());
        assert!(validate_item_name("Tea\nCoffee").is_err());
        assert!(validate_item_name(&"A".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_customer_name() {
        assert_eq!(validate_customer_name("Asha").unwrap(), "Asha");
        assert_eq!(validate_customer_name("  Ravi Kumar  ").unwrap(), "Ravi Kumar");
        assert_eq!(validate_customer_name("Lee, Min").unwrap(), "Lee, Min");

        assert!(matches!(
            validate_customer_name("   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_customer_name("Asha\nRavi").is_err());
        assert!(validate_customer_name(&"B".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_cents(1)).is_ok());
        assert!(validate_price(Money::zero()).is_err());
        assert!(validate_price(Money::from_cents(-100)).is_err());

        assert!(validate_price(crate::MAX_UNIT_PRICE).is_ok());
        assert!(matches!(
            validate_price(Money::from_cents(crate::MAX_UNIT_PRICE.cents() + 1)),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_tax_rate_bps() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(500).is_ok());
        assert!(validate_tax_rate_bps(10000).is_ok());
        assert!(validate_tax_rate_bps(10001).is_err());
    }
}
