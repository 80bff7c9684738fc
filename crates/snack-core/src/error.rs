//! # Error Types
//!
//! Domain-specific error types for snack-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  snack-core errors (this file)                                         │
//! │  ├── CoreError        - Cart, drawer and session rule violations       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  register app errors (separate crate)                                  │
//! │  └── ApiError         - What the shell prints (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Operator               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is a local validation failure. None is transient, none is
//! retried internally, and an operation that returns one has not changed any
//! state.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised by the cart, the drawer and the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // -------------------------------------------------------------------------
    // Cart Engine
    // -------------------------------------------------------------------------
    /// Quantity passed to `add_item` was below one.
    #[error("Invalid quantity {quantity}: must be at least 1")]
    InvalidQuantity { quantity: i64 },

    /// Discount is negative or larger than the current subtotal.
    #[error("Invalid discount {discount}: must be between $0.00 and the subtotal {subtotal}")]
    InvalidDiscount { discount: Money, subtotal: Money },

    /// Finalize was called on a cart without lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// Finalize was called while subtotal minus discount is zero or less.
    #[error("Sale total must be greater than zero (got {total})")]
    NonPositiveTotal { total: Money },

    /// Cart already holds the maximum number of distinct lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity would exceed the configured maximum.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    // -------------------------------------------------------------------------
    // Cash Drawer Engine
    // -------------------------------------------------------------------------
    /// Opening float was zero or negative.
    #[error("Invalid opening amount {amount}: must be greater than zero")]
    InvalidOpeningAmount { amount: Money },

    /// Movement amount was zero or negative.
    #[error("Invalid movement amount {amount}: must be greater than zero")]
    InvalidAmount { amount: Money },

    /// Movement description was blank.
    #[error("Movement description is required")]
    EmptyDescription,

    /// A withdrawal would drive the drawer balance negative.
    ///
    /// ```text
    /// open(500.00)
    ///      │
    ///      ▼
    /// record_movement(Out, 600.00, "bank deposit")
    ///      │
    ///      ▼
    /// InsufficientFunds { requested: 600.00, available: 500.00 }
    ///      │
    ///      ▼
    /// balance stays 500.00
    /// ```
    #[error("Insufficient funds in drawer: requested {requested}, available {available}")]
    InsufficientFunds { requested: Money, available: Money },

    /// `open` was called on a drawer that is already open.
    #[error("Cash drawer is already open")]
    DrawerAlreadyOpen,

    /// A movement or close was attempted on a closed drawer.
    #[error("Cash drawer is not open")]
    DrawerNotOpen,

    // -------------------------------------------------------------------------
    // Session / shared
    // -------------------------------------------------------------------------
    /// Catalog has no product with this id.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A line total, subtotal or drawer figure would leave the `i64` cent
    /// range. Nothing was changed.
    #[error("Amount exceeds the supported range")]
    AmountOverflow,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
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

    /// Invalid format (e.g. an amount with too many decimals).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
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
        let err = CoreError::InsufficientFunds {
            requested: Money::from_cents(60000),
            available: Money::from_cents(50000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds in drawer: requested $600.00, available $500.00"
        );

        let err = CoreError::InvalidDiscount {
            discount: Money::from_cents(-100),
            subtotal: Money::from_cents(1890),
        };
        assert_eq!(
            err.to_string(),
            "Invalid discount -$1.00: must be between $0.00 and the subtotal $18.90"
        );

        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty");
        assert_eq!(
            CoreError::AmountOverflow.to_string(),
            "Amount exceeds the supported range"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        };
        assert_eq!(err.to_string(), "name must be at most 200 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
