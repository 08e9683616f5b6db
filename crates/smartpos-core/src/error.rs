//! # Error Types
//!
//! Domain-specific error types for smartpos-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  smartpos-core errors (this file)                                      │
//! │  ├── CoreError        - Billing / reporting rule violations            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  smartpos-store errors (separate crate)                                │
//! │  └── StoreError       - Transaction file read/write failures           │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── AppError         - What the cashier / admin sees                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → terminal               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every billing and reporting error is a local validation failure: the
//! inputs are deterministic, so retrying without correcting them cannot
//! succeed.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Quantity was zero or negative.
    #[error("Quantity must be a positive integer, got {quantity}")]
    InvalidQuantity { quantity: i64 },

    /// Item is not on the price list.
    ///
    /// ## When This Occurs
    /// - Cashier typed a name that is not on the menu
    /// - The menu changed between building the cart and billing it
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    /// A bill was requested for a cart with no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// Payment method is not one of Cash, Card, UPI.
    #[error("Invalid payment method '{0}': expected one of Cash, Card, UPI")]
    InvalidPaymentMethod(String),

    /// A report was requested over no transactions with
    /// [`EmptyHistoryPolicy::Reject`](crate::reporting::EmptyHistoryPolicy).
    #[error("No transactions to report on")]
    EmptyHistory,

    /// Cart has exceeded maximum allowed distinct items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// A sum or product left the `i64` range.
    ///
    /// ## When This Occurs
    /// - A bill whose line totals do not fit (prices are capped, so only
    ///   a price list built outside validation can get here)
    /// - A report over records with corrupt amounts or quantities
    #[error("{field} is too large to compute")]
    AmountOverflow { field: &'static str },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation of names, prices and rates before
/// business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., unparsable amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., same item name in two menu categories).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidQuantity { quantity: -2 };
        assert_eq!(
            err.to_string(),
            "Quantity must be a positive integer, got -2"
        );

        let err = CoreError::UnknownItem("Mocha".to_string());
        assert_eq!(err.to_string(), "Unknown item: Mocha");

        let err = CoreError::AmountOverflow { field: "subtotal" };
        assert_eq!(err.to_string(), "subtotal is too large to compute");

        let err = CoreError::InvalidPaymentMethod("cheque".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid payment method 'cheque': expected one of Cash, Card, UPI"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "customer name".to_string(),
        };
        assert_eq!(err.to_string(), "customer name is required");

        let err = ValidationError::Duplicate {
            field: "item".to_string(),
            value: "Latte".to_string(),
        };
        assert_eq!(err.to_string(), "item 'Latte' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "item name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
