//! # Session State
//!
//! Holds the register's single [`RegisterSession`].
//!
//! ## Thread Safety
//! The core engines do no locking of their own. This wrapper is the one
//! serialization point: every command goes through the mutex, so two callers
//! can never mutate the same cart or drawer at once.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shell command            Command fn                Session change      │
//! │  ─────────────            ──────────                ──────────────      │
//! │  add 4 2 ───────────────► add_to_cart() ──────────► cart line += 2     │
//! │  discount 3.30 ─────────► apply_discount() ───────► cart discount      │
//! │  checkout cash ─────────► checkout() ─────────────► sale + drawer in   │
//! │  cash-out 50 change ────► record_movement() ──────► drawer out         │
//! │  close 550 ─────────────► close_drawer() ─────────► closing report     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use snack_core::{InMemoryCatalog, RegisterSession};

/// The session type this register runs.
pub type Register = RegisterSession<InMemoryCatalog>;

/// Shared handle to the register session.
#[derive(Debug, Clone)]
pub struct SessionState {
    session: Arc<Mutex<Register>>,
}

impl SessionState {
    pub fn new(session: Register) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = session_state.with_session(|s| s.cart().compute_total());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Register) -> R,
    {
        let session = self.session.lock().expect("Session mutex poisoned");
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// session_state.with_session_mut(|s| s.add_product("4", 1))?;
    /// ```
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Register) -> R,
    {
        let mut session = self.session.lock().expect("Session mutex poisoned");
        f(&mut session)
    }
}
