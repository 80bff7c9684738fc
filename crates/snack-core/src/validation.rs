//! # Validation Module
//!
//! Input validation utilities shared by the catalog and the drawer.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Register shell                                               │
//! │  ├── Typed parsing (amounts, quantities, payment methods)              │
//! │  └── Immediate operator feedback                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Field rules (required, length, sign)                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engines                                                      │
//! │  └── State rules (discount ≤ subtotal, no negative drawer, ...)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product name.
pub const MAX_NAME_LEN: usize = 200;

/// Longest accepted movement description or closing note.
pub const MAX_TEXT_LEN: usize = 200;

/// Highest accepted unit price: R$ 1,000,000.00.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product identifier.
///
/// ## Rules
/// - Must not be blank
/// - At most 50 characters
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: 50,
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Example
/// ```rust
/// use snack_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Cheeseburger").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a product category.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    if category.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    Ok(())
}

/// Validates free text attached to a movement or a closing report.
///
/// Blank text is accepted here; whether it is allowed is up to the caller.
pub fn validate_text_length(field: &str, text: &str) -> ValidationResult<()> {
    if text.trim().chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    Ok(())
}

/// Validates a search query and returns it trimmed.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price. Zero is allowed (free items), negatives are not.
///
/// ## Example
/// ```rust
/// use snack_core::money::Money;
/// use snack_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1890)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
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
    fn test_validate_product_id() {
        assert!(validate_product_id("1").is_ok());
        assert!(validate_product_id("burger-deluxe").is_ok());
        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("   ").is_err());
        assert!(validate_product_id(&"A".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Orange Juice 300ml").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
        assert!(validate_product_name(&"Á".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_category() {
        assert!(validate_category("Drinks").is_ok());
        assert!(validate_category(" ").is_err());
    }

    #[test]
    fn test_validate_text_length() {
        assert!(validate_text_length("note", "").is_ok());
        assert!(validate_text_length("note", "short by 20").is_ok());
        assert!(matches!(
            validate_text_length("note", &"x".repeat(201)),
            Err(ValidationError::TooLong { max: 200, .. })
        ));
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  fries ").unwrap(), "fries");
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(1890)).is_ok());
        assert!(validate_price(Money::from_cents(-1)).is_err());
        assert!(validate_price(Money::from_cents(MAX_PRICE_CENTS)).is_ok());
        assert!(validate_price(Money::from_cents(MAX_PRICE_CENTS + 1)).is_err());
    }

    #[test]
    fn test_full_cart_at_max_price_fits() {
        let line = Money::from_cents(MAX_PRICE_CENTS)
            .checked_mul(crate::MAX_ITEM_QUANTITY)
            .unwrap();
        assert!(line.checked_mul(crate::MAX_CART_ITEMS as i64).is_some());
    }
}
