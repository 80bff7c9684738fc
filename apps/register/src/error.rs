//! # API Error Type
//!
//! Unified error type for register commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Snack POS                              │
//! │                                                                         │
//! │  Operator types: cash-out 600 bank                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Rule violated? ─── CoreError::InsufficientFunds ──┐            │  │
//! │  │         │                                          ▼            │  │
//! │  │  Journal failed? ── JournalError::Io ──────────► ApiError ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Shell prints: [INSUFFICIENT_FUNDS] Insufficient funds in drawer: ...  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error is a corrective prompt for the operator. None ends the shell.

use serde::Serialize;
use snack_core::CoreError;

use crate::state::JournalError;

/// Error returned from register commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INSUFFICIENT_FUNDS",
///   "message": "Insufficient funds in drawer: requested $600.00, available $500.00"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product not in the catalog
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart rule violated (empty cart, bad discount, limits)
    CartError,

    /// Drawer state rule violated (open/closed, bad amounts)
    DrawerError,

    /// Withdrawal larger than the drawer balance
    InsufficientFunds,

    /// Record kept in memory but not written to the journal
    JournalError,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::InvalidQuantity { .. }
            | CoreError::AmountOverflow
            | CoreError::Validation(_) => ApiError::validation(message),
            CoreError::InvalidDiscount { .. }
            | CoreError::EmptyCart
            | CoreError::NonPositiveTotal { .. }
            | CoreError::CartTooLarge { .. }
            | CoreError::QuantityTooLarge { .. } => ApiError::new(ErrorCode::CartError, message),
            CoreError::InsufficientFunds { .. } => {
                ApiError::new(ErrorCode::InsufficientFunds, message)
            }
            CoreError::InvalidOpeningAmount { .. }
            | CoreError::InvalidAmount { .. }
            | CoreError::EmptyDescription
            | CoreError::DrawerAlreadyOpen
            | CoreError::DrawerNotOpen => ApiError::new(ErrorCode::DrawerError, message),
        }
    }
}

/// Converts journal failures to API errors.
///
/// The record the command produced is already in memory; only its durable
/// copy is missing.
impl From<JournalError> for ApiError {
    fn from(err: JournalError) -> Self {
        tracing::error!("Journal write failed: {}", err);
        ApiError::new(
            ErrorCode::JournalError,
            format!("Recorded, but the journal write failed: {}", err),
        )
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = serde_json::to_value(self.code)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| format!("{:?}", self.code));
        write!(f, "[{}] {}", code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use snack_core::{Money, ValidationError};

    #[test]
    fn test_core_error_codes() {
        let err: ApiError = CoreError::ProductNotFound("42".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 42");

        let err: ApiError = CoreError::EmptyCart.into();
        assert_eq!(err.code, ErrorCode::CartError);

        let err: ApiError = CoreError::InsufficientFunds {
            requested: Money::from_cents(60_000),
            available: Money::from_cents(50_000),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientFunds);

        let err: ApiError = CoreError::DrawerNotOpen.into();
        assert_eq!(err.code, ErrorCode::DrawerError);

        let err: ApiError = CoreError::AmountOverflow.into();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err: ApiError = CoreError::Validation(ValidationError::Required {
            field: "name".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_display_uses_wire_code() {
        let err = ApiError::new(ErrorCode::InsufficientFunds, "not enough");
        assert_eq!(err.to_string(), "[INSUFFICIENT_FUNDS] not enough");
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::not_found("Product", "9");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: 9");
    }
}
