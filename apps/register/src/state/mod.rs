//! # State Module
//!
//! Runtime state for the register shell.
//!
//! Each command takes only the state it needs instead of one large
//! `AppState` struct.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │   SessionState   │  │   JournalState   │  │    ConfigState       │  │
//! │  │                  │  │                  │  │                      │  │
//! │  │  Arc<Mutex<      │  │  journal.jsonl   │  │  store_name          │  │
//! │  │    Register      │  │  (append only)   │  │  currency_symbol     │  │
//! │  │  >>              │  │                  │  │  cart limits         │  │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • SessionState: Protected by Arc<Mutex<T>> for exclusive access       │
//! │  • JournalState: Opens the file per append                             │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod journal;
mod session;

pub use config::ConfigState;
pub use journal::{JournalError, JournalRecord, JournalState};
pub use session::{Register, SessionState};
