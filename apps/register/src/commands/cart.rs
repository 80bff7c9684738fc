//! # Cart Commands
//!
//! Commands for building up the in-progress sale.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Discount │────►│ Finalized│       │
//! │  │  Cart    │     │          │     │ (option) │     │   Sale   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                 │              │
//! │                   add_to_cart                       checkout           │
//! │                   update_cart_item                  (sale.rs)          │
//! │                   remove_from_cart                                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::SessionState;
use snack_core::{CartEngine, CartLine, Money};

/// One cart line as shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemDto {
    pub product_id: String,
    pub name: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
    pub line_total_cents: i64,
}

impl From<&CartLine> for CartItemDto {
    fn from(line: &CartLine) -> Self {
        CartItemDto {
            product_id: line.product.id.clone(),
            name: line.product.name.clone(),
            unit_price_cents: line.product.unit_price.cents(),
            quantity: line.quantity,
            line_total_cents: line.line_total().cents(),
        }
    }
}

/// Cart totals in cents.
///
/// `discount_cents` is the discount actually applied, which never exceeds
/// the subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub item_count: i64,
}

impl From<&CartEngine> for CartTotals {
    fn from(cart: &CartEngine) -> Self {
        CartTotals {
            subtotal_cents: cart.compute_subtotal().cents(),
            discount_cents: cart.effective_discount().cents(),
            total_cents: cart.compute_total().cents(),
            item_count: cart.total_quantity(),
        }
    }
}

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItemDto>,
    pub totals: CartTotals,
}

impl From<&CartEngine> for CartResponse {
    fn from(cart: &CartEngine) -> Self {
        CartResponse {
            items: cart.lines().iter().map(CartItemDto::from).collect(),
            totals: CartTotals::from(cart),
        }
    }
}

/// Gets the current cart contents.
///
/// ## Display
/// ```text
/// ┌────────────────────────────────────────────────────────────────┐
/// │  CART                                              3 items     │
/// ├────────────────────────────────────────────────────────────────┤
/// │  [1] Cheeseburger Deluxe  x2              R$ 37.80             │
/// │  [4] Cola 350ml           x1              R$ 5.50              │
/// ├────────────────────────────────────────────────────────────────┤
/// │  Subtotal                                 R$ 43.30             │
/// │  Discount                                 R$ 3.30              │
/// │  TOTAL                                    R$ 40.00             │
/// └────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(session: &SessionState) -> CartResponse {
    debug!("get_cart command");
    session.with_session(|s| CartResponse::from(s.cart()))
}

/// Adds a product from the menu to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases
/// - If product not in cart: added as new line
/// - Price is copied at add time
///
/// ## Arguments
/// * `product_id` - Menu id
/// * `quantity` - Quantity to add (default: 1)
pub fn add_to_cart(
    session: &SessionState,
    product_id: &str,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id = %product_id, quantity = %quantity, "add_to_cart command");

    session.with_session_mut(|s| {
        s.add_product(product_id, quantity)?;
        Ok::<_, ApiError>(CartResponse::from(s.cart()))
    })
}

/// Sets the quantity of a cart line.
///
/// ## Behavior
/// - Quantity 0 or less: removes the line
/// - Product not in cart: nothing changes
/// - Quantity above the per-line limit: error
pub fn update_cart_item(
    session: &SessionState,
    product_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    session.with_session_mut(|s| {
        s.cart_mut().update_quantity(product_id, quantity)?;
        Ok::<_, ApiError>(CartResponse::from(s.cart()))
    })
}

/// Removes a line from the cart. Removing an absent product is a no-op.
pub fn remove_from_cart(session: &SessionState, product_id: &str) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");

    session.with_session_mut(|s| {
        s.cart_mut().remove_item(product_id);
        CartResponse::from(s.cart())
    })
}

/// Sets the sale discount.
///
/// ## Errors
/// `CART_ERROR` if the discount is negative or larger than the subtotal.
pub fn apply_discount(session: &SessionState, amount: Money) -> Result<CartResponse, ApiError> {
    debug!(amount = %amount, "apply_discount command");

    session.with_session_mut(|s| {
        s.cart_mut().apply_discount(amount)?;
        Ok::<_, ApiError>(CartResponse::from(s.cart()))
    })
}

/// Clears all lines and the discount.
///
/// ## When Used
/// - Customer cancels the order
/// - Operator starts over
pub fn clear_cart(session: &SessionState) -> CartResponse {
    debug!("clear_cart command");

    session.with_session_mut(|s| {
        s.cart_mut().clear();
        CartResponse::from(s.cart())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;
    use crate::error::ErrorCode;

    #[test]
    fn test_add_to_cart_merges_lines() {
        let (session, _journal, _dir) = fixtures::states();

        add_to_cart(&session, "1", None).unwrap();
        let cart = add_to_cart(&session, "1", Some(2)).unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(cart.items[0].line_total_cents, 5670);
        assert_eq!(cart.totals.item_count, 3);
    }

    #[test]
    fn test_add_to_cart_errors() {
        let (session, _journal, _dir) = fixtures::states();

        let err = add_to_cart(&session, "99", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = add_to_cart(&session, "1", Some(0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert!(get_cart(&session).items.is_empty());
    }

    #[test]
    fn test_update_cart_item_to_zero_removes() {
        let (session, _journal, _dir) = fixtures::states();
        add_to_cart(&session, "4", Some(2)).unwrap();
        add_to_cart(&session, "7", Some(1)).unwrap();

        let cart = update_cart_item(&session, "4", 0).unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].product_id, "7");

        // Absent product is a no-op
        let cart = update_cart_item(&session, "4", 5).unwrap();
        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn test_remove_from_cart_is_idempotent() {
        let (session, _journal, _dir) = fixtures::states();
        add_to_cart(&session, "4", Some(1)).unwrap();

        assert!(remove_from_cart(&session, "4").items.is_empty());
        assert!(remove_from_cart(&session, "4").items.is_empty());
    }

    #[test]
    fn test_apply_discount() {
        let (session, _journal, _dir) = fixtures::states();
        add_to_cart(&session, "1", Some(2)).unwrap();
        add_to_cart(&session, "4", Some(1)).unwrap();

        let cart = apply_discount(&session, Money::from_cents(330)).unwrap();
        assert_eq!(cart.totals.subtotal_cents, 4330);
        assert_eq!(cart.totals.discount_cents, 330);
        assert_eq!(cart.totals.total_cents, 4000);

        let err = apply_discount(&session, Money::from_cents(5000)).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(get_cart(&session).totals.discount_cents, 330);
    }

    #[test]
    fn test_clear_cart_resets_discount() {
        let (session, _journal, _dir) = fixtures::states();
        add_to_cart(&session, "1", Some(1)).unwrap();
        apply_discount(&session, Money::from_cents(100)).unwrap();

        let cart = clear_cart(&session);
        assert!(cart.items.is_empty());
        assert_eq!(cart.totals.discount_cents, 0);
        assert_eq!(cart.totals.total_cents, 0);
    }
}
