//! # Snack Register Library
//!
//! Terminal front end for the Snack POS counter: one cart, one cash drawer,
//! a seeded menu and a journal of everything completed.
//!
//! ## Module Organization
//! ```text
//! snack_register/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── Register session (cart + drawer) behind a mutex
//! │   ├── journal.rs  ◄─── JSON-lines journal
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Menu search
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── sale.rs     ◄─── Checkout and history
//! │   ├── drawer.rs   ◄─── Cash drawer
//! │   └── config.rs   ◄─── Configuration retrieval
//! ├── seed.rs         ◄─── Built-in menu
//! ├── shell.rs        ◄─── Line parser and renderer
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod seed;
pub mod shell;
pub mod state;

use directories::ProjectDirs;
use snack_core::RegisterSession;
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shell::Shell;
use state::{ConfigState, JournalState, SessionState};

/// Runs the register shell on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Register Startup                                  │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,snack=debug; override with RUST_LOG                 │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • SNACK_* environment variables over defaults                       │
/// │                                                                         │
/// │  3. Determine Journal Path ───────────────────────────────────────────► │
/// │     • SNACK_JOURNAL_PATH, else the platform data directory              │
/// │                                                                         │
/// │  4. Initialize State Objects ─────────────────────────────────────────► │
/// │     • SessionState: seeded menu, empty cart, closed drawer              │
/// │     • JournalState: append-only file                                    │
/// │                                                                         │
/// │  5. Run Shell ────────────────────────────────────────────────────────► │
/// │     • Until quit or end of input                                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Snack POS register");

    let config = ConfigState::from_env();
    info!(store = %config.store_name, "Configuration loaded");

    let journal_path = get_journal_path(&config)?;
    info!(?journal_path, "Journal path determined");
    let journal = JournalState::new(journal_path)?;

    let catalog = seed::seeded_catalog()?;
    info!(products = catalog.len(), "Menu seeded");

    let session = SessionState::new(RegisterSession::with_limits(
        catalog,
        config.cart_limits(),
    ));

    let shell = Shell::new(config, session, journal);
    let stdin = io::stdin();
    shell.run(stdin.lock(), io::stdout().lock())?;

    info!("Register shell ended");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=snack_core=trace` - Trace the core engines only
/// - Default: INFO, DEBUG for `snack_*` crates
///
/// Logs go to stderr so they never interleave with shell output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,snack=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Determines the journal file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.snack.pos/journal.jsonl`
/// - **Windows**: `%APPDATA%\snack\pos\data\journal.jsonl`
/// - **Linux**: `~/.local/share/pos/journal.jsonl`
///
/// ## Override
/// `SNACK_JOURNAL_PATH` (read into [`ConfigState::journal_path`]).
fn get_journal_path(config: &ConfigState) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(path) = &config.journal_path {
        return Ok(path.clone());
    }

    let proj_dirs = ProjectDirs::from("com", "snack", "pos")
        .ok_or("Could not determine app data directory")?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("journal.jsonl"))
}
