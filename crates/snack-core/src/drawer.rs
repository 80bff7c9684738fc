//! # Cash Drawer Engine
//!
//! Tracks the physical cash drawer across a shift.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │             open(float > 0)                                             │
//! │   ┌────────┐ ─────────────────────► ┌────────┐                          │
//! │   │ Closed │                        │  Open  │ ◄──┐ record_movement     │
//! │   └────────┘ ◄───────────────────── └────────┘ ───┘ (in / out)          │
//! │              close(counted, note)                                       │
//! │              └─► ClosingReport { expected, counted, variance }          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - The balance never goes negative: a withdrawal larger than the balance
//!   is refused
//! - Closing always succeeds once the drawer is open; the variance is
//!   reported, never enforced
//! - Movements of the last shift stay readable after close; they are wiped by
//!   the next `open`
//! - A movement that would push the balance or a running total past the
//!   `i64` cent range is refused with `AmountOverflow`
//! - A failed call leaves every field as it was

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{CashMovement, ClosingReport, DrawerStatus, MovementDirection, VarianceKind};
use crate::validation::{validate_text_length, MAX_TEXT_LEN};

/// A register's cash drawer and its shift history.
#[derive(Debug, Clone, Default)]
pub struct CashDrawer {
    status: DrawerStatus,
    opening_float: Money,
    current_balance: Money,
    total_in: Money,
    total_out: Money,
    movements: Vec<CashMovement>,
    opened_at: Option<DateTime<Utc>>,
    reports: Vec<ClosingReport>,
}

impl CashDrawer {
    /// Creates a closed drawer with no history.
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Opens a new shift with `opening_float` in the drawer.
    ///
    /// ## Errors
    /// - `DrawerAlreadyOpen` if a shift is in progress
    /// - `InvalidOpeningAmount` if `opening_float <= 0`
    pub fn open(&mut self, opening_float: Money) -> CoreResult<()> {
        if self.status == DrawerStatus::Open {
            return Err(CoreError::DrawerAlreadyOpen);
        }
        if !opening_float.is_positive() {
            return Err(CoreError::InvalidOpeningAmount {
                amount: opening_float,
            });
        }

        self.movements.clear();
        self.opening_float = opening_float;
        self.current_balance = opening_float;
        self.total_in = Money::zero();
        self.total_out = Money::zero();
        self.opened_at = Some(Utc::now());
        self.status = DrawerStatus::Open;

        info!(opening_float = %opening_float, "Cash drawer opened");
        Ok(())
    }

    /// Checks that a movement of `amount` in `direction` would be accepted,
    /// without recording anything.
    ///
    /// ## Errors
    /// - `DrawerNotOpen` if the drawer is closed
    /// - `InvalidAmount` if `amount <= 0`
    /// - `InsufficientFunds` for an `Out` larger than the current balance
    /// - `AmountOverflow` if the balance or a running total would leave the
    ///   cent range
    pub fn validate_movement(&self, direction: MovementDirection, amount: Money) -> CoreResult<()> {
        if self.status != DrawerStatus::Open {
            return Err(CoreError::DrawerNotOpen);
        }
        if !amount.is_positive() {
            return Err(CoreError::InvalidAmount { amount });
        }

        let fits = match direction {
            MovementDirection::In => {
                self.current_balance.checked_add(amount).is_some()
                    && self.total_in.checked_add(amount).is_some()
            }
            MovementDirection::Out => {
                if amount > self.current_balance {
                    return Err(CoreError::InsufficientFunds {
                        requested: amount,
                        available: self.current_balance,
                    });
                }
                self.total_out.checked_add(amount).is_some()
            }
        };
        if !fits {
            return Err(CoreError::AmountOverflow);
        }
        Ok(())
    }

    /// Records cash entering or leaving the drawer.
    ///
    /// ## Errors
    /// - Everything [`validate_movement`](Self::validate_movement) rejects
    /// - `EmptyDescription` if the description is blank
    /// - `Validation` if the description is longer than 200 characters
    pub fn record_movement(
        &mut self,
        direction: MovementDirection,
        amount: Money,
        description: &str,
    ) -> CoreResult<CashMovement> {
        self.validate_movement(direction, amount)?;
        let description = description.trim();
        if description.is_empty() {
            return Err(CoreError::EmptyDescription);
        }
        validate_text_length("description", description)?;

        Ok(self.apply_movement(direction, amount, description.to_string()))
    }

    /// Records a movement that already passed
    /// [`validate_movement`](Self::validate_movement).
    pub(crate) fn apply_movement(
        &mut self,
        direction: MovementDirection,
        amount: Money,
        description: String,
    ) -> CashMovement {
        let movement = CashMovement {
            id: Uuid::new_v4().to_string(),
            direction,
            amount,
            description,
            timestamp: Utc::now(),
        };

        self.current_balance += movement.signed_amount();
        match direction {
            MovementDirection::In => self.total_in += amount,
            MovementDirection::Out => self.total_out += amount,
        }
        self.movements.push(movement.clone());

        info!(
            movement_id = %movement.id,
            direction = %direction,
            amount = %amount,
            balance = %self.current_balance,
            "Cash movement recorded"
        );
        movement
    }

    /// Ends the shift and reconciles against the physically counted cash.
    ///
    /// `variance = counted_balance − current_balance`. Positive is an overage,
    /// negative a shortage. Either way the drawer closes. The note is trimmed
    /// and cut to its first 200 characters.
    ///
    /// ## Errors
    /// - `DrawerNotOpen` if the drawer is closed
    /// - `Validation` if the count is negative
    pub fn close(&mut self, counted_balance: Money, note: &str) -> CoreResult<ClosingReport> {
        if self.status != DrawerStatus::Open {
            return Err(CoreError::DrawerNotOpen);
        }
        if counted_balance.is_negative() {
            return Err(ValidationError::OutOfRange {
                field: "counted balance".to_string(),
                min: 0,
                max: i64::MAX,
            }
            .into());
        }
        let note: String = note.trim().chars().take(MAX_TEXT_LEN).collect();

        let closed_at = Utc::now();
        let report = ClosingReport {
            id: Uuid::new_v4().to_string(),
            opening_float: self.opening_float,
            total_in: self.total_in,
            total_out: self.total_out,
            movement_count: self.movements.len(),
            expected_balance: self.current_balance,
            counted_balance,
            variance: counted_balance - self.current_balance,
            note,
            opened_at: self.opened_at.unwrap_or(closed_at),
            closed_at,
        };

        self.reports.push(report.clone());
        self.status = DrawerStatus::Closed;

        match report.variance_kind() {
            VarianceKind::Balanced => {
                info!(report_id = %report.id, expected = %report.expected_balance, "Cash drawer closed balanced");
            }
            kind => {
                warn!(
                    report_id = %report.id,
                    expected = %report.expected_balance,
                    counted = %report.counted_balance,
                    variance = %report.variance,
                    ?kind,
                    "Cash drawer closed with variance"
                );
            }
        }
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    pub fn status(&self) -> DrawerStatus {
        self.status
    }

    pub fn is_open(&self) -> bool {
        self.status == DrawerStatus::Open
    }

    /// Float of the current (or last) shift.
    pub fn opening_float(&self) -> Money {
        self.opening_float
    }

    /// Float plus entries minus withdrawals of the current (or last) shift.
    pub fn current_balance(&self) -> Money {
        self.current_balance
    }

    /// Movements of the current (or last) shift, in recording order.
    pub fn movements(&self) -> &[CashMovement] {
        &self.movements
    }

    pub fn opened_at(&self) -> Option<DateTime<Utc>> {
        self.opened_at
    }

    /// Sum of `In` movements.
    pub fn total_in(&self) -> Money {
        self.total_in
    }

    /// Sum of `Out` movements.
    pub fn total_out(&self) -> Money {
        self.total_out
    }

    /// One report per completed shift, oldest first.
    pub fn reports(&self) -> &[ClosingReport] {
        &self.reports
    }

    pub fn last_report(&self) -> Option<&ClosingReport> {
        self.reports.last()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
