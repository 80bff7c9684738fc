//! # Domain Types
//!
//! Record types shared by the catalog, the cart engine and the drawer engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │  CashMovement   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  items          │   │  direction      │       │
//! │  │  unit_price     │   │  final_total    │   │  amount         │       │
//! │  │  category       │   │  payment_method │   │  description    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ PaymentMethod   │   │ MovementDir.    │   │ ClosingReport   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Cash           │   │  In             │   │  expected       │       │
//! │  │  Card           │   │  Out            │   │  counted        │       │
//! │  │  InstantTransfer│   └─────────────────┘   │  variance       │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here except [`CartLine`] is immutable once created. Sales,
//! movements and reports are handed out by value so a persistence layer can
//! append them as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A menu item, supplied by the catalog and referenced by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Opaque identifier. Lines are keyed by this, never by name.
    pub id: String,

    /// Display name shown to the cashier.
    pub name: String,

    /// Price of one unit. Never negative.
    pub unit_price: Money,

    /// Menu section ("Burgers", "Drinks", ...).
    pub category: String,
}

impl Product {
    /// Creates a product record.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money,
        category: impl Into<String>,
    ) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            unit_price,
            category: category.into(),
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One product and how many of it are in the cart.
///
/// ## Invariant
/// `quantity >= 1`. A line whose quantity drops to zero is removed by the
/// cart engine, never kept at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub product: Product,
    pub quantity: i64,
}

impl CartLine {
    /// Returns `unit_price × quantity`.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash. The only method that affects the drawer.
    Cash,
    /// Card on an external terminal.
    Card,
    /// Instant bank transfer (QR code / key based).
    InstantTransfer,
}

impl PaymentMethod {
    /// All methods, in display order.
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::InstantTransfer,
    ];

    /// Stable lowercase name used by the shell and the journal.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::InstantTransfer => "instant-transfer",
        }
    }

    /// Whether the sale should move money into the drawer.
    #[inline]
    pub const fn is_cash(&self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "instant-transfer" | "transfer" => Ok(PaymentMethod::InstantTransfer),
            other => Err(ValidationError::InvalidFormat {
                field: "payment method".to_string(),
                reason: format!("'{}' is not one of cash, card, instant-transfer", other),
            }),
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A finalized transaction. Append-only once created.
///
/// `items` is a deep copy of the cart lines at finalize time; later cart
/// mutations never reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    pub id: String,
    pub items: Vec<CartLine>,
    pub subtotal: Money,
    pub discount: Money,
    pub final_total: Money,
    pub payment_method: PaymentMethod,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

impl Sale {
    /// Total number of units sold.
    pub fn item_quantity(&self) -> i64 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}

// =============================================================================
// Cash Movement
// =============================================================================

/// Whether a movement adds cash to the drawer or takes it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MovementDirection {
    /// Cash entering the drawer (sales, change top-ups).
    In,
    /// Cash leaving the drawer (withdrawals, supplier payments).
    Out,
}

impl fmt::Display for MovementDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovementDirection::In => f.write_str("in"),
            MovementDirection::Out => f.write_str("out"),
        }
    }
}

/// A single recorded cash event against an open drawer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CashMovement {
    pub id: String,
    pub direction: MovementDirection,
    /// Always positive; the direction carries the sign.
    pub amount: Money,
    pub description: String,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

impl CashMovement {
    /// The movement's effect on the drawer balance.
    #[inline]
    pub fn signed_amount(&self) -> Money {
        match self.direction {
            MovementDirection::In => self.amount,
            MovementDirection::Out => -self.amount,
        }
    }
}

// =============================================================================
// Drawer Status
// =============================================================================

/// The drawer's two states. Closed is both initial and terminal per shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DrawerStatus {
    #[default]
    Closed,
    Open,
}

// =============================================================================
// Closing Report
// =============================================================================

/// Sign of a closing variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum VarianceKind {
    /// Counted matches expected.
    Balanced,
    /// More cash than expected.
    Overage,
    /// Less cash than expected.
    Shortage,
}

/// End-of-shift reconciliation, produced exactly once per close.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClosingReport {
    pub id: String,
    pub opening_float: Money,
    pub total_in: Money,
    pub total_out: Money,
    pub movement_count: usize,
    /// Balance the drawer should hold: float + in − out.
    pub expected_balance: Money,
    /// Balance the cashier physically counted.
    pub counted_balance: Money,
    /// `counted_balance − expected_balance`.
    pub variance: Money,
    pub note: String,
    #[ts(as = "String")]
    pub opened_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub closed_at: DateTime<Utc>,
}

impl ClosingReport {
    /// Classifies the variance.
    pub fn variance_kind(&self) -> VarianceKind {
        if self.variance.is_zero() {
            VarianceKind::Balanced
        } else if self.variance.is_positive() {
            VarianceKind::Overage
        } else {
            VarianceKind::Shortage
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with_variance(cents: i64) -> ClosingReport {
        let now = Utc::now();
        ClosingReport {
            id: "r".to_string(),
            opening_float: Money::from_cents(50000),
            total_in: Money::zero(),
            total_out: Money::zero(),
            movement_count: 0,
            expected_balance: Money::from_cents(50000),
            counted_balance: Money::from_cents(50000 + cents),
            variance: Money::from_cents(cents),
            note: String::new(),
            opened_at: now,
            closed_at: now,
        }
    }

    #[test]
    fn test_line_total() {
        let line = CartLine {
            product: Product::new("7", "Small Fries", Money::from_cents(890), "Sides"),
            quantity: 3,
        };
        assert_eq!(line.line_total().cents(), 2670);
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!("cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!("CARD".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert_eq!(
            "instant_transfer".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::InstantTransfer
        );
        assert!("cheque".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_payment_method_serde_names() {
        let json = serde_json::to_string(&PaymentMethod::InstantTransfer).unwrap();
        assert_eq!(json, "\"instant_transfer\"");
    }

    #[test]
    fn test_signed_amount() {
        let movement = CashMovement {
            id: "m".to_string(),
            direction: MovementDirection::Out,
            amount: Money::from_cents(5000),
            description: "change".to_string(),
            timestamp: Utc::now(),
        };
        assert_eq!(movement.signed_amount().cents(), -5000);
    }

    #[test]
    fn test_variance_kind() {
        assert_eq!(report_with_variance(0).variance_kind(), VarianceKind::Balanced);
        assert_eq!(report_with_variance(150).variance_kind(), VarianceKind::Overage);
        assert_eq!(report_with_variance(-2000).variance_kind(), VarianceKind::Shortage);
    }

    #[test]
    fn test_drawer_status_default() {
        assert_eq!(DrawerStatus::default(), DrawerStatus::Closed);
    }
}
