//! # Console State
//!
//! - [`ConfigState`]: store, currency and pricing settings (read-only)
//! - [`SessionState`]: the open transaction draft and its lookups

mod config;
mod session;

pub use config::ConfigState;
pub use session::SessionState;
