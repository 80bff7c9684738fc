//! # Register Commands
//!
//! Every operator action the shell can dispatch.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── Menu search, categories
//! ├── cart.rs     ◄─── Cart manipulation
//! ├── sale.rs     ◄─── Checkout and sales history
//! ├── drawer.rs   ◄─── Open, movements, close
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the session
//! fn get_cart(session: &SessionState) -> CartResponse
//!
//! // Needs the journal too
//! fn checkout(session: &SessionState, journal: &JournalState, method: PaymentMethod)
//! ```
//!
//! Responses are serializable DTOs with amounts in integer cents.

pub mod cart;
pub mod config;
pub mod drawer;
pub mod product;
pub mod sale;
