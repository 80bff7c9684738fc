//! # Journal State
//!
//! Append-only JSON-lines file holding every completed sale, cash movement
//! and closing report. This is the hook for durable storage: the core keeps
//! the records in memory, the journal gives them a life after the process.
//!
//! ## Line Format
//! ```text
//! {"kind":"sale","id":"…","items":[…],"final_total":4000,…}
//! {"kind":"movement","id":"…","direction":"in","amount":4000,…}
//! {"kind":"closing","id":"…","expected_balance":54000,"variance":0,…}
//! ```
//!
//! Amounts are integer cents.

use serde::Serialize;
use snack_core::{CashMovement, ClosingReport, Sale};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Journal write failures.
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One journal line.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JournalRecord<'a> {
    Sale(&'a Sale),
    Movement(&'a CashMovement),
    Closing(&'a ClosingReport),
}

/// Location of the journal file.
#[derive(Debug, Clone)]
pub struct JournalState {
    path: PathBuf,
}

impl JournalState {
    /// Uses `path`, creating its parent directory if needed.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, JournalError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| JournalError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(JournalState { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one record as a single line.
    pub fn append(&self, record: &JournalRecord<'_>) -> Result<(), JournalError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let io_err = |source| JournalError::Io {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        file.write_all(&line).map_err(io_err)?;

        debug!(path = %self.path.display(), bytes = line.len(), "journal append");
        Ok(())
    }

    /// Appends several records, stopping at the first failure.
    pub fn append_all(&self, records: &[JournalRecord<'_>]) -> Result<(), JournalError> {
        records.iter().try_for_each(|record| self.append(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snack_core::{CartEngine, CashDrawer, Money, MovementDirection, PaymentMethod, Product};

    #[test]
    fn test_append_writes_tagged_lines() {
        let dir = tempfile::tempdir().unwrap();
        let journal = JournalState::new(dir.path().join("nested/journal.jsonl")).unwrap();

        let mut cart = CartEngine::new();
        cart.add_item(
            &Product::new("4", "Cola 350ml", Money::from_cents(550), "Drinks"),
            2,
        )
        .unwrap();
        let sale = cart.finalize(PaymentMethod::Cash).unwrap();

        let mut drawer = CashDrawer::new();
        drawer.open(Money::from_cents(10_000)).unwrap();
        let movement = drawer
            .record_movement(MovementDirection::In, sale.final_total, "Sale")
            .unwrap();

        journal
            .append_all(&[JournalRecord::Sale(&sale), JournalRecord::Movement(&movement)])
            .unwrap();

        let contents = fs::read_to_string(journal.path()).unwrap();
        let lines: Vec<serde_json::Value> = contents
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["kind"], "sale");
        assert_eq!(lines[0]["final_total"], 1100);
        assert_eq!(lines[0]["payment_method"], "cash");
        assert_eq!(lines[1]["kind"], "movement");
        assert_eq!(lines[1]["direction"], "in");
    }

    #[test]
    fn test_append_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending.
        let journal = JournalState::new(dir.path()).unwrap();

        let mut drawer = CashDrawer::new();
        drawer.open(Money::from_cents(100)).unwrap();
        let report = drawer.close(Money::from_cents(100), "").unwrap();

        assert!(matches!(
            journal.append(&JournalRecord::Closing(&report)),
            Err(JournalError::Io { .. })
        ));
    }
}
