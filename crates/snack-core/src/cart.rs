//! # Cart Engine
//!
//! Builds an order line by line, computes its totals and turns it into an
//! immutable [`Sale`].
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Engine Operations                               │
//! │                                                                         │
//! │  Operation               Effect                                         │
//! │  ─────────               ──────                                         │
//! │                                                                         │
//! │  add_item(p, n) ───────► line for p.id += n (or new line)              │
//! │  update_quantity(id, n)► line.qty = n   (n ≤ 0 removes the line)        │
//! │  remove_item(id) ──────► line removed   (absent id: no-op)              │
//! │  apply_discount(d) ────► discount = d   (0 ≤ d ≤ subtotal)              │
//! │                                                                         │
//! │  finalize(method) ─────► Sale snapshot ──► sales history                │
//! │                          cart + discount reset to empty                 │
//! │                                                                         │
//! │  Every failing call returns before touching any field.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product id; lines keep insertion order
//! - Every line has `quantity >= 1`
//! - `compute_total() >= 0`: a discount left larger than the subtotal by
//!   later removals is clamped to the subtotal when read

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartLine, PaymentMethod, Product, Sale};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Limits
// =============================================================================

/// Size limits applied to the in-progress cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLimits {
    /// Maximum number of distinct lines.
    pub max_lines: usize,
    /// Maximum quantity on a single line.
    pub max_quantity: i64,
}

impl Default for CartLimits {
    fn default() -> Self {
        CartLimits {
            max_lines: MAX_CART_ITEMS,
            max_quantity: MAX_ITEM_QUANTITY,
        }
    }
}

// =============================================================================
// Sales Summary
// =============================================================================

/// Per-method slice of the sales history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MethodTotal {
    pub method: PaymentMethod,
    pub sale_count: usize,
    pub total: Money,
}

/// Aggregate figures over every finalized sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesSummary {
    pub sale_count: usize,
    /// Sum of subtotals.
    pub gross: Money,
    /// Sum of discounts granted.
    pub discounts: Money,
    /// Sum of final totals (`gross − discounts`).
    pub net: Money,
    /// One entry per payment method, in [`PaymentMethod::ALL`] order.
    pub by_method: Vec<MethodTotal>,
}

// =============================================================================
// Cart Engine
// =============================================================================

/// The in-progress cart plus the append-only history of sales it produced.
#[derive(Debug, Clone, Default)]
pub struct CartEngine {
    lines: Vec<CartLine>,
    discount: Money,
    limits: CartLimits,
    sales: Vec<Sale>,
}

impl CartEngine {
    /// Creates an empty cart with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cart with custom limits.
    pub fn with_limits(limits: CartLimits) -> Self {
        CartEngine {
            limits,
            ..Self::default()
        }
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds `quantity` units of `product`.
    ///
    /// ## Behavior
    /// - Product already in cart (same id): its line's quantity increases
    /// - Otherwise a new line is appended with a copy of the product
    ///
    /// ## Errors
    /// - `InvalidQuantity` if `quantity < 1`
    /// - `QuantityTooLarge` if the line would exceed the limit
    /// - `CartTooLarge` if a new line would exceed the line limit
    /// - `AmountOverflow` if the line total or subtotal would leave the cent range
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        if quantity < 1 {
            return Err(CoreError::InvalidQuantity { quantity });
        }

        if let Some(idx) = self.position(&product.id) {
            let line = &self.lines[idx];
            let new_qty = line.quantity.saturating_add(quantity);
            if new_qty > self.limits.max_quantity {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: self.limits.max_quantity,
                });
            }
            self.ensure_representable(line.product.unit_price, line.quantity, new_qty)?;

            self.lines[idx].quantity = new_qty;
            debug!(product_id = %product.id, quantity = new_qty, "cart line incremented");
            return Ok(());
        }

        if self.lines.len() >= self.limits.max_lines {
            return Err(CoreError::CartTooLarge {
                max: self.limits.max_lines,
            });
        }
        if quantity > self.limits.max_quantity {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: self.limits.max_quantity,
            });
        }
        self.ensure_representable(product.unit_price, 0, quantity)?;

        self.lines.push(CartLine {
            product: product.clone(),
            quantity,
        });
        debug!(product_id = %product.id, quantity, "cart line added");
        Ok(())
    }

    /// Sets the quantity of a line.
    ///
    /// `quantity <= 0` removes the line. An id with no line is a no-op.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            self.remove_item(product_id);
            return Ok(());
        }

        let Some(idx) = self.position(product_id) else {
            return Ok(());
        };

        let max = self.limits.max_quantity;
        if quantity > max {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max,
            });
        }
        let line = &self.lines[idx];
        self.ensure_representable(line.product.unit_price, line.quantity, quantity)?;

        self.lines[idx].quantity = quantity;
        debug!(product_id, quantity, "cart line updated");
        Ok(())
    }

    /// Removes the line for `product_id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.product.id != product_id);

        let removed = self.lines.len() != initial_len;
        if removed {
            debug!(product_id, "cart line removed");
        }
        removed
    }

    /// Sets the sale discount.
    ///
    /// ## Errors
    /// `InvalidDiscount` if `amount < 0` or `amount > subtotal`.
    pub fn apply_discount(&mut self, amount: Money) -> CoreResult<()> {
        let subtotal = self.compute_subtotal();
        if amount.is_negative() || amount > subtotal {
            return Err(CoreError::InvalidDiscount {
                discount: amount,
                subtotal,
            });
        }

        self.discount = amount;
        debug!(discount = %amount, subtotal = %subtotal, "discount applied");
        Ok(())
    }

    /// Discards the in-progress cart and discount without producing a sale.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.discount = Money::zero();
        debug!("cart cleared");
    }

    /// Returns the total `finalize` would charge, or the error it would fail
    /// with. The cart is not changed.
    pub fn check_finalize(&self) -> CoreResult<Money> {
        if self.lines.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let total = self.compute_total();
        if !total.is_positive() {
            return Err(CoreError::NonPositiveTotal { total });
        }
        Ok(total)
    }

    /// Turns the cart into a [`Sale`], appends it to the history and resets
    /// the cart.
    ///
    /// ## Errors
    /// - `EmptyCart` if there are no lines
    /// - `NonPositiveTotal` if `compute_total() <= 0`
    pub fn finalize(&mut self, payment_method: PaymentMethod) -> CoreResult<Sale> {
        let total = self.check_finalize()?;

        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            items: self.lines.clone(),
            subtotal: self.compute_subtotal(),
            discount: self.effective_discount(),
            final_total: total,
            payment_method,
            timestamp: Utc::now(),
        };

        self.sales.push(sale.clone());
        self.lines.clear();
        self.discount = Money::zero();

        info!(
            sale_id = %sale.id,
            total = %sale.final_total,
            method = %payment_method,
            items = sale.items.len(),
            "Sale finalized"
        );
        Ok(sale)
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.product.id == product_id)
    }

    /// Checks that moving one line from `old_qty` to `new_qty` keeps the line
    /// total and the subtotal inside the cent range.
    fn ensure_representable(&self, unit_price: Money, old_qty: i64, new_qty: i64) -> CoreResult<()> {
        unit_price
            .checked_mul(new_qty)
            .and_then(|new_line| {
                self.compute_subtotal()
                    .checked_sub(unit_price.multiply_quantity(old_qty))?
                    .checked_add(new_line)
            })
            .map(|_| ())
            .ok_or(CoreError::AmountOverflow)
    }

    // -------------------------------------------------------------------------
    // Totals
    // -------------------------------------------------------------------------

    /// Sum of `unit_price × quantity` over all lines. Zero for an empty cart.
    pub fn compute_subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// The discount as last applied.
    pub fn discount(&self) -> Money {
        self.discount
    }

    /// The discount actually deducted: never more than the current subtotal.
    pub fn effective_discount(&self) -> Money {
        self.discount.min(self.compute_subtotal())
    }

    /// `subtotal − discount`, never negative.
    pub fn compute_total(&self) -> Money {
        self.compute_subtotal() - self.effective_discount()
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities over all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |acc, l| acc.saturating_add(l.quantity))
    }

    pub fn limits(&self) -> CartLimits {
        self.limits
    }

    /// Finalized sales, oldest first.
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    /// Aggregates the sales history.
    pub fn sales_summary(&self) -> SalesSummary {
        let by_method = PaymentMethod::ALL
            .iter()
            .map(|&method| {
                let matching = self.sales.iter().filter(|s| s.payment_method == method);
                MethodTotal {
                    method,
                    sale_count: matching.clone().count(),
                    total: matching.map(|s| s.final_total).sum(),
                }
            })
            .collect();

        SalesSummary {
            sale_count: self.sales.len(),
            gross: self.sales.iter().map(|s| s.subtotal).sum(),
            discounts: self.sales.iter().map(|s| s.discount).sum(),
            net: self.sales.iter().map(|s| s.final_total).sum(),
            by_method,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
