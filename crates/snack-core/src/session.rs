//! # Register Session
//!
//! Owns one cart, one drawer and the catalog for a single register. The two
//! engines never call each other; the session is where a finished cash sale
//! becomes a drawer entry.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RegisterSession                                                        │
//! │                                                                         │
//! │   add_product(id, qty) ──► catalog.get_product(id) ──► cart.add_item    │
//! │                                                                         │
//! │   checkout(method)                                                      │
//! │     ├── Cash: drawer must be open (checked first)                      │
//! │     ├── cart.finalize(method) ──► Sale                                  │
//! │     └── Cash: drawer.record_movement(In, total, "Sale <id>")            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One session per register. It is not shared between callers; a deployment
//! with several registers builds one session each.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cart::{CartEngine, CartLimits};
use crate::catalog::CatalogLookup;
use crate::drawer::CashDrawer;
use crate::error::{CoreError, CoreResult};
use crate::types::{CashMovement, MovementDirection, PaymentMethod, Sale};

/// What a successful checkout produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkout {
    pub sale: Sale,
    /// The drawer entry for a cash sale; `None` for card and transfer.
    pub movement: Option<CashMovement>,
}

/// A cashier's working session at one register.
#[derive(Debug)]
pub struct RegisterSession<C> {
    catalog: C,
    cart: CartEngine,
    drawer: CashDrawer,
}

impl<C: CatalogLookup> RegisterSession<C> {
    /// Starts a session with an empty cart and a closed drawer.
    pub fn new(catalog: C) -> Self {
        Self::with_limits(catalog, CartLimits::default())
    }

    pub fn with_limits(catalog: C, limits: CartLimits) -> Self {
        RegisterSession {
            catalog,
            cart: CartEngine::with_limits(limits),
            drawer: CashDrawer::new(),
        }
    }

    /// Looks the product up by id and adds it to the cart.
    ///
    /// ## Errors
    /// `ProductNotFound` if the catalog has no such id, otherwise whatever
    /// [`CartEngine::add_item`] returns.
    pub fn add_product(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        let product = self
            .catalog
            .get_product(product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        self.cart.add_item(&product, quantity)
    }

    /// Finalizes the cart and, for cash, puts the total in the drawer.
    ///
    /// Every check runs before anything changes: a cash checkout the drawer
    /// cannot take (closed, or a balance past the cent range) fails with the
    /// cart intact and no sale recorded.
    pub fn checkout(&mut self, payment_method: PaymentMethod) -> CoreResult<Checkout> {
        if payment_method.is_cash() {
            if !self.drawer.is_open() {
                return Err(CoreError::DrawerNotOpen);
            }
            let total = self.cart.check_finalize()?;
            self.drawer.validate_movement(MovementDirection::In, total)?;
        }

        let sale = self.cart.finalize(payment_method)?;

        let movement = payment_method.is_cash().then(|| {
            self.drawer.apply_movement(
                MovementDirection::In,
                sale.final_total,
                format!("Sale {}", sale.id),
            )
        });

        debug!(sale_id = %sale.id, cash = movement.is_some(), "checkout complete");
        Ok(Checkout { sale, movement })
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn cart(&self) -> &CartEngine {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartEngine {
        &mut self.cart
    }

    pub fn drawer(&self) -> &CashDrawer {
        &self.drawer
    }

    pub fn drawer_mut(&mut self) -> &mut CashDrawer {
        &mut self.drawer
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::money::Money;
    use crate::types::Product;

    fn session() -> RegisterSession<InMemoryCatalog> {
        let catalog = InMemoryCatalog::from_products(vec![
            Product::new("1", "Cheeseburger Deluxe", Money::from_cents(1890), "Burgers"),
            Product::new("4", "Cola 350ml", Money::from_cents(550), "Drinks"),
        ])
        .unwrap();
        RegisterSession::new(catalog)
    }

    #[test]
    fn test_add_product_from_catalog() {
        let mut session = session();
        session.add_product("1", 2).unwrap();
        session.add_product("4", 1).unwrap();

        assert_eq!(session.cart().compute_subtotal().cents(), 4330);
    }

    #[test]
    fn test_add_unknown_product() {
        let mut session = session();
        assert_eq!(
            session.add_product("99", 1),
            Err(CoreError::ProductNotFound("99".to_string()))
        );
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_cash_checkout_records_drawer_entry() {
        let mut session = session();
        session.drawer_mut().open(Money::from_cents(50_000)).unwrap();
        session.add_product("1", 1).unwrap();

        let checkout = session.checkout(PaymentMethod::Cash).unwrap();

        let movement = checkout.movement.unwrap();
        assert_eq!(movement.direction, MovementDirection::In);
        assert_eq!(movement.amount.cents(), 1890);
        assert_eq!(movement.description, format!("Sale {}", checkout.sale.id));
        assert_eq!(session.drawer().current_balance().cents(), 51_890);
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_card_checkout_leaves_drawer_alone() {
        let mut session = session();
        session.add_product("4", 2).unwrap();

        let checkout = session.checkout(PaymentMethod::Card).unwrap();

        assert!(checkout.movement.is_none());
        assert_eq!(checkout.sale.final_total.cents(), 1100);
        assert!(session.drawer().movements().is_empty());
    }

    #[test]
    fn test_cash_checkout_needs_open_drawer() {
        let mut session = session();
        session.add_product("1", 1).unwrap();

        assert_eq!(
            session.checkout(PaymentMethod::Cash),
            Err(CoreError::DrawerNotOpen)
        );
        assert_eq!(session.cart().line_count(), 1);
        assert!(session.cart().sales().is_empty());
    }

    #[test]
    fn test_cash_checkout_drawer_overflow_keeps_cart() {
        let mut session = session();
        session
            .drawer_mut()
            .open(Money::from_cents(i64::MAX - 10))
            .unwrap();
        session.add_product("1", 1).unwrap();

        assert_eq!(
            session.checkout(PaymentMethod::Cash),
            Err(CoreError::AmountOverflow)
        );
        assert_eq!(session.cart().line_count(), 1);
        assert!(session.cart().sales().is_empty());
        assert!(session.drawer().movements().is_empty());
        assert_eq!(session.drawer().current_balance().cents(), i64::MAX - 10);
    }

    #[test]
    fn test_checkout_empty_cart_touches_nothing() {
        let mut session = session();
        session.drawer_mut().open(Money::from_cents(10_000)).unwrap();

        assert_eq!(
            session.checkout(PaymentMethod::Cash),
            Err(CoreError::EmptyCart)
        );
        assert!(session.drawer().movements().is_empty());
    }
}
