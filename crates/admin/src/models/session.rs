//! Session-stored authentication state.
//!
//! The authenticated flag is a single string slot. Only the exact sentinel
//! value counts as logged in; a missing slot or any other value is treated
//! as logged out.

use serde::{Deserialize, Serialize};

/// Value written to the auth slot on successful login.
pub const AUTH_SENTINEL: &str = "mock_token";

/// Operator identity shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentOperator {
    /// Email typed on the login form.
    pub email: String,
}

/// Session keys for authentication data.
pub mod keys {
    /// Persisted authenticated flag.
    pub const AUTH_TOKEN: &str = "auth_token";

    /// Operator identity captured at login.
    pub const OPERATOR: &str = "operator";
}

/// Whether a stored flag value marks the session as authenticated.
#[must_use]
pub fn is_sentinel(value: Option<&str>) -> bool {
    value == Some(AUTH_SENTINEL)
}
