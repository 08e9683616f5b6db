//! # Application Error Type
//!
//! Unified error type for the `smartpos` commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Smart POS                              │
//! │                                                                         │
//! │  Command Function                                                      │
//! │  AppResult<T>                                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Core error? ──── CoreError::UnknownItem("Mocha") ─────┐               │
//! │  Store error? ─── StoreError::Write { .. } ────────────┤               │
//! │  Config error? ── ConfigError::InvalidValue { .. } ────┼──► AppError   │
//! │  Wrong password? ─ AppError::access_denied() ──────────┘       │       │
//! │                                                                 ▼       │
//! │                                      stderr: "error: <message>"        │
//! │                                      (report --json: JSON on stdout)   │
//! │                                      exit status from ErrorCode        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::io;
use std::process::ExitCode;

use serde::Serialize;

use smartpos_core::CoreError;
use smartpos_store::StoreError;

use crate::config::ConfigError;

/// Error returned from a command.
///
/// ## Serialization
/// Under `report --json` a failure is written to stdout as:
/// ```json
/// {
///   "code": "ACCESS_DENIED",
///   "message": "Access denied: wrong admin password"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Bad quantity, unknown item, bad payment method, bad name
    ValidationError,

    /// Bill requested for an empty cart
    EmptyCart,

    /// Report requested over no transactions under the reject policy
    EmptyHistory,

    /// Sales file could not be written or read
    StorageError,

    /// Config file missing, unparsable or invalid
    ConfigError,

    /// Wrong admin credential
    AccessDenied,

    /// Anything else (terminal I/O, hashing)
    Internal,
}

impl ErrorCode {
    /// Process exit status for this code.
    pub const fn exit_status(&self) -> u8 {
        match self {
            ErrorCode::ValidationError | ErrorCode::EmptyCart | ErrorCode::EmptyHistory => 2,
            ErrorCode::AccessDenied => 3,
            ErrorCode::StorageError => 4,
            ErrorCode::ConfigError => 5,
            ErrorCode::Internal => 1,
        }
    }
}

impl AppError {
    /// Creates a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an access-denied error.
    pub fn access_denied() -> Self {
        AppError::new(ErrorCode::AccessDenied, "Access denied: wrong admin password")
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code.exit_status())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AppError {}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let code = match err {
            CoreError::EmptyCart => ErrorCode::EmptyCart,
            CoreError::EmptyHistory => ErrorCode::EmptyHistory,
            CoreError::InvalidQuantity { .. }
            | CoreError::UnknownItem(_)
            | CoreError::InvalidPaymentMethod(_)
            | CoreError::CartTooLarge { .. }
            | CoreError::QuantityTooLarge { .. }
            | CoreError::AmountOverflow { .. }
            | CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        AppError::new(code, err.to_string())
    }
}

/// Converts storage errors to app errors.
///
/// The full error (path, OS error) goes to the log; the message keeps it
/// short.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "Sales file operation failed");

        let message = match &err {
            StoreError::Write { .. } => {
                format!("Transaction NOT saved: {}", err)
            }
            StoreError::Read { .. } => format!("Could not read sales history: {}", err),
            StoreError::MalformedRow { .. } | StoreError::UnexpectedHeader { .. } => {
                format!("Sales history is damaged: {}", err)
            }
        };
        AppError::new(ErrorCode::StorageError, message)
    }
}

/// Converts configuration errors to app errors.
impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

/// Terminal I/O failures.
impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::internal(format!("Terminal I/O failed: {}", err))
    }
}

/// Result type for commands.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_codes() {
        let err = AppError::from(CoreError::EmptyCart);
        assert_eq!(err.code, ErrorCode::EmptyCart);

        let err = AppError::from(CoreError::UnknownItem("Mocha".to_string()));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Unknown item: Mocha");
        assert_eq!(err.code.exit_status(), 2);
    }

    #[test]
    fn test_store_error_code() {
        let err = AppError::from(StoreError::malformed(4, "bad quantity"));
        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(err.message.contains("row 4"));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_string(&AppError::access_denied()).unwrap();
        assert_eq!(
            json,
            r#"{"code":"ACCESS_DENIED","message":"Access denied: wrong admin password"}"#
        );
    }
}
