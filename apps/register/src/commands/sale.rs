//! # Sale Commands
//!
//! Checkout and the sales history.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout cash                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  session.checkout(Cash)                                                 │
//! │       ├── drawer closed? ──────────────► DRAWER_ERROR (cart untouched) │
//! │       ├── cart empty / total ≤ 0? ─────► CART_ERROR (cart untouched)   │
//! │       └── Sale + drawer In movement                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  journal.append(sale, movement)                                         │
//! │       └── write failed? ───────────────► JOURNAL_ERROR (sale kept)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{JournalRecord, JournalState, SessionState};
use snack_core::{PaymentMethod, Sale, SalesSummary};

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub sale_id: String,
    pub payment_method: PaymentMethod,
    pub item_count: i64,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    /// Drawer balance after a cash sale; `None` for card and transfer.
    pub drawer_balance_cents: Option<i64>,
}

/// One row of the sales history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDto {
    pub id: String,
    pub timestamp: String,
    pub payment_method: PaymentMethod,
    pub item_count: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
}

impl From<&Sale> for SaleDto {
    fn from(sale: &Sale) -> Self {
        SaleDto {
            id: sale.id.clone(),
            timestamp: sale.timestamp.to_rfc3339(),
            payment_method: sale.payment_method,
            item_count: sale.item_quantity(),
            discount_cents: sale.discount.cents(),
            total_cents: sale.final_total.cents(),
        }
    }
}

/// Sales history plus totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesResponse {
    pub sales: Vec<SaleDto>,
    pub summary: SalesSummary,
}

/// Finalizes the cart as a sale paid with `payment_method`.
///
/// A cash sale needs an open drawer and puts its total in the drawer.
/// The sale (and its drawer movement) are journaled after they are recorded.
pub fn checkout(
    session: &SessionState,
    journal: &JournalState,
    payment_method: PaymentMethod,
) -> Result<CheckoutResponse, ApiError> {
    debug!(method = %payment_method, "checkout command");

    let (checkout, drawer_balance) = session.with_session_mut(|s| {
        let checkout = s.checkout(payment_method)?;
        let balance = s.drawer().current_balance();
        Ok::<_, ApiError>((checkout, balance))
    })?;

    let sale = &checkout.sale;
    info!(sale_id = %sale.id, total = %sale.final_total, "Checkout complete");

    let mut records = vec![JournalRecord::Sale(sale)];
    if let Some(movement) = &checkout.movement {
        records.push(JournalRecord::Movement(movement));
    }
    journal.append_all(&records)?;

    Ok(CheckoutResponse {
        sale_id: sale.id.clone(),
        payment_method,
        item_count: sale.item_quantity(),
        subtotal_cents: sale.subtotal.cents(),
        discount_cents: sale.discount.cents(),
        total_cents: sale.final_total.cents(),
        drawer_balance_cents: checkout.movement.as_ref().map(|_| drawer_balance.cents()),
    })
}

/// Lists finalized sales, oldest first, with a summary.
pub fn list_sales(session: &SessionState) -> SalesResponse {
    debug!("list_sales command");

    session.with_session(|s| SalesResponse {
        sales: s.cart().sales().iter().map(SaleDto::from).collect(),
        summary: s.cart().sales_summary(),
    })
}
