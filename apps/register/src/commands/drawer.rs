//! # Drawer Commands
//!
//! Opening, cash movements and end-of-shift closing.
//!
//! ## Drawer Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌──────────┐  open_drawer(float)   ┌──────────┐                       │
//! │   │  Closed  │──────────────────────►│   Open   │◄──┐                   │
//! │   └──────────┘                       └──────────┘   │ record_movement   │
//! │        ▲                                  │    └─────┘ checkout (cash)  │
//! │        │          close_drawer(counted)   │                             │
//! │        └──────────────────────────────────┘                             │
//! │                        │                                                │
//! │                        ▼                                                │
//! │               ClosingReport (journaled)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{JournalRecord, JournalState, SessionState};
use snack_core::{
    CashDrawer, CashMovement, ClosingReport, DrawerStatus, Money, MovementDirection, VarianceKind,
};

/// One drawer movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementDto {
    pub id: String,
    pub direction: MovementDirection,
    pub amount_cents: i64,
    pub description: String,
    pub timestamp: String,
}

impl From<&CashMovement> for MovementDto {
    fn from(m: &CashMovement) -> Self {
        MovementDto {
            id: m.id.clone(),
            direction: m.direction,
            amount_cents: m.amount.cents(),
            description: m.description.clone(),
            timestamp: m.timestamp.to_rfc3339(),
        }
    }
}

/// End-of-shift reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosingReportDto {
    pub report_id: String,
    pub opening_float_cents: i64,
    pub total_in_cents: i64,
    pub total_out_cents: i64,
    pub movement_count: usize,
    pub expected_cents: i64,
    pub counted_cents: i64,
    /// `counted − expected`
    pub variance_cents: i64,
    pub variance: VarianceKind,
    pub note: String,
}

impl From<&ClosingReport> for ClosingReportDto {
    fn from(r: &ClosingReport) -> Self {
        ClosingReportDto {
            report_id: r.id.clone(),
            opening_float_cents: r.opening_float.cents(),
            total_in_cents: r.total_in.cents(),
            total_out_cents: r.total_out.cents(),
            movement_count: r.movement_count,
            expected_cents: r.expected_balance.cents(),
            counted_cents: r.counted_balance.cents(),
            variance_cents: r.variance.cents(),
            variance: r.variance_kind(),
            note: r.note.clone(),
        }
    }
}

/// Drawer state as shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawerResponse {
    pub status: DrawerStatus,
    pub opening_float_cents: i64,
    pub balance_cents: i64,
    pub total_in_cents: i64,
    pub total_out_cents: i64,
    pub movements: Vec<MovementDto>,
    pub last_report: Option<ClosingReportDto>,
}

impl From<&CashDrawer> for DrawerResponse {
    fn from(d: &CashDrawer) -> Self {
        DrawerResponse {
            status: d.status(),
            opening_float_cents: d.opening_float().cents(),
            balance_cents: d.current_balance().cents(),
            total_in_cents: d.total_in().cents(),
            total_out_cents: d.total_out().cents(),
            movements: d.movements().iter().map(MovementDto::from).collect(),
            last_report: d.last_report().map(ClosingReportDto::from),
        }
    }
}

/// Movement plus the balance it left behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementResponse {
    pub movement: MovementDto,
    pub balance_cents: i64,
}

/// Opens the drawer with a positive float.
pub fn open_drawer(session: &SessionState, opening_float: Money) -> Result<DrawerResponse, ApiError> {
    debug!(opening_float = %opening_float, "open_drawer command");

    session.with_session_mut(|s| {
        s.drawer_mut().open(opening_float)?;
        Ok::<_, ApiError>(DrawerResponse::from(s.drawer()))
    })
}

/// Records a manual cash-in or cash-out and journals it.
///
/// ## Errors
/// - `DRAWER_ERROR`: drawer closed, amount not positive, blank description
/// - `INSUFFICIENT_FUNDS`: cash-out larger than the balance
/// - `VALIDATION_ERROR`: description too long, or the balance would leave the
///   supported range
pub fn record_movement(
    session: &SessionState,
    journal: &JournalState,
    direction: MovementDirection,
    amount: Money,
    description: &str,
) -> Result<MovementResponse, ApiError> {
    debug!(%direction, amount = %amount, "record_movement command");

    let (movement, balance) = session.with_session_mut(|s| {
        let movement = s.drawer_mut().record_movement(direction, amount, description)?;
        Ok::<_, ApiError>((movement, s.drawer().current_balance()))
    })?;

    journal.append(&JournalRecord::Movement(&movement))?;

    Ok(MovementResponse {
        movement: MovementDto::from(&movement),
        balance_cents: balance.cents(),
    })
}

/// Closes the drawer against the physically counted cash and journals the
/// report. A variance is reported, never refused.
pub fn close_drawer(
    session: &SessionState,
    journal: &JournalState,
    counted: Money,
    note: &str,
) -> Result<ClosingReportDto, ApiError> {
    debug!(counted = %counted, "close_drawer command");

    let report = session.with_session_mut(|s| s.drawer_mut().close(counted, note))?;

    journal.append(&JournalRecord::Closing(&report))?;

    Ok(ClosingReportDto::from(&report))
}

/// Gets the drawer state and movements of the current (or last) shift.
pub fn get_drawer(session: &SessionState) -> DrawerResponse {
    debug!("get_drawer command");
    session.with_session(|s| DrawerResponse::from(s.drawer()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;
    use crate::error::ErrorCode;

    #[test]
    fn test_open_drawer() {
        let (session, _journal, _dir) = fixtures::states();

        let err = open_drawer(&session, Money::zero()).unwrap_err();
        assert_eq!(err.code, ErrorCode::DrawerError);

        let drawer = open_drawer(&session, Money::from_cents(50_000)).unwrap();
        assert_eq!(drawer.status, DrawerStatus::Open);
        assert_eq!(drawer.balance_cents, 50_000);

        let err = open_drawer(&session, Money::from_cents(100)).unwrap_err();
        assert_eq!(err.code, ErrorCode::DrawerError);
    }

    #[test]
    fn test_record_movement_flow() {
        let (session, journal, _dir) = fixtures::states();
        open_drawer(&session, Money::from_cents(50_000)).unwrap();

        let response = record_movement(
            &session,
            &journal,
            MovementDirection::In,
            Money::from_cents(10_000),
            "Change top-up",
        )
        .unwrap();
        assert_eq!(response.balance_cents, 60_000);

        let response = record_movement(
            &session,
            &journal,
            MovementDirection::Out,
            Money::from_cents(5_000),
            "Supplier",
        )
        .unwrap();
        assert_eq!(response.balance_cents, 55_000);
        assert_eq!(response.movement.direction, MovementDirection::Out);

        let lines = fixtures::journal_lines(&journal);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["direction"], "out");
        assert_eq!(lines[1]["description"], "Supplier");
    }

    #[test]
    fn test_record_movement_rejections() {
        let (session, journal, _dir) = fixtures::states();

        let err = record_movement(
            &session,
            &journal,
            MovementDirection::In,
            Money::from_cents(100),
            "x",
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::DrawerError);

        open_drawer(&session, Money::from_cents(50_000)).unwrap();

        let err = record_movement(
            &session,
            &journal,
            MovementDirection::Out,
            Money::from_cents(60_000),
            "Bank deposit",
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientFunds);

        let err = record_movement(
            &session,
            &journal,
            MovementDirection::In,
            Money::from_cents(100),
            "   ",
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::DrawerError);

        let drawer = get_drawer(&session);
        assert_eq!(drawer.balance_cents, 50_000);
        assert!(drawer.movements.is_empty());
        assert!(fixtures::journal_lines(&journal).is_empty());
    }

    #[test]
    fn test_close_drawer_reports_shortage() {
        let (session, journal, _dir) = fixtures::states();
        open_drawer(&session, Money::from_cents(50_000)).unwrap();
        record_movement(
            &session,
            &journal,
            MovementDirection::In,
            Money::from_cents(10_000),
            "Top-up",
        )
        .unwrap();
        record_movement(
            &session,
            &journal,
            MovementDirection::Out,
            Money::from_cents(5_000),
            "Supplier",
        )
        .unwrap();

        let report = close_drawer(&session, &journal, Money::from_cents(53_000), "short").unwrap();
        assert_eq!(report.expected_cents, 55_000);
        assert_eq!(report.variance_cents, -2_000);
        assert_eq!(report.variance, VarianceKind::Shortage);
        assert_eq!(report.movement_count, 2);

        let drawer = get_drawer(&session);
        assert_eq!(drawer.status, DrawerStatus::Closed);
        assert_eq!(drawer.last_report, Some(report));

        let lines = fixtures::journal_lines(&journal);
        assert_eq!(lines.last().unwrap()["kind"], "closing");

        let err = close_drawer(&session, &journal, Money::zero(), "").unwrap_err();
        assert_eq!(err.code, ErrorCode::DrawerError);
    }
}
