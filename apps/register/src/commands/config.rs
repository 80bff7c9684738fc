//! # Config Commands

use tracing::debug;

use crate::state::ConfigState;

/// Gets the current register configuration.
///
/// ## When Used
/// - Shell banner (store name)
/// - Currency formatting
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}
