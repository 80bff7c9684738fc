//! # snack-core: Pure Business Logic for Snack POS
//!
//! Cart aggregation, sale finalization and cash drawer reconciliation for a
//! small food-service counter. No I/O, no global state: every engine is an
//! explicit value owned by its caller.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Snack POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Register shell (apps/register)                  │   │
//! │  │   menu ──► add / qty / discount ──► checkout ──► open / close   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ snack-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   cart    │  │  drawer   │  │  session  │  │   │
//! │  │   │  lookup   │  │  engine   │  │  engine   │  │  (owner)  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   types   │  │   error   │  │ validation│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NO LOCKS                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Product, Sale, CashMovement, ClosingReport, ...
//! - [`catalog`] - Read-only product lookup
//! - [`cart`] - Cart engine and sales history
//! - [`drawer`] - Cash drawer state machine
//! - [`session`] - Owns one cart and one drawer per register
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation
//!
//! ## Example Usage
//!
//! ```rust
//! use snack_core::{CartEngine, CashDrawer, Money, MovementDirection, PaymentMethod, Product};
//!
//! let burger = Product::new("1", "Cheeseburger", Money::from_cents(1890), "Burgers");
//!
//! let mut cart = CartEngine::new();
//! cart.add_item(&burger, 2).unwrap();
//! cart.apply_discount(Money::from_cents(380)).unwrap();
//! let sale = cart.finalize(PaymentMethod::Cash).unwrap();
//! assert_eq!(sale.final_total.cents(), 3400);
//!
//! let mut drawer = CashDrawer::new();
//! drawer.open(Money::from_cents(50_000)).unwrap();
//! drawer
//!     .record_movement(MovementDirection::In, sale.final_total, "Sale")
//!     .unwrap();
//! let report = drawer.close(Money::from_cents(53_400), "").unwrap();
//! assert!(report.variance.is_zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod drawer;
pub mod error;
pub mod money;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartEngine, CartLimits, MethodTotal, SalesSummary};
pub use catalog::{CatalogLookup, InMemoryCatalog};
pub use drawer::CashDrawer;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use session::{Checkout, RegisterSession};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default maximum number of distinct lines in a cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Default maximum quantity on a single cart line.
///
/// Catches typing 1000 instead of 10 at the counter.
pub const MAX_ITEM_QUANTITY: i64 = 999;
