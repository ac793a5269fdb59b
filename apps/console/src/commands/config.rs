//! # Config Commands
//!
//! Command for retrieving the loaded configuration.

use tracing::debug;

use crate::state::{ConfigState, SessionState};

/// Gets the current configuration.
///
/// ## When Used
/// - Screen startup (currency symbol, suggestion limit)
/// - Explaining why a quantity or discount was clamped
pub fn get_config(session: &SessionState) -> ConfigState {
    debug!("get_config command");
    session.config().clone()
}
