//! Session-scoped models for the admin panel.

pub mod session;

pub use session::{AUTH_SENTINEL, CurrentOperator, keys as session_keys};
