//! Route table and the authentication state machine.
//!
//! Every request path is resolved against the caller's [`AuthState`] before
//! a handler runs. Resolution is a pure function so the whole policy can be
//! tested without a server:
//!
//! ```text
//! state            path                 result
//! Unauthenticated  /login               render login
//! Unauthenticated  anything else        redirect /login
//! Authenticated    known route          render it
//! Authenticated    unknown path         redirect /
//! ```
//!
//! `/login` stays reachable after login.

use protein_admin_core::MemberId;

/// Whether the current session is logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticated,
}

impl AuthState {
    /// State after a login attempt.
    #[must_use]
    pub const fn after_login(self, accepted: bool) -> Self {
        if accepted { Self::Authenticated } else { self }
    }

    /// State after logout.
    #[must_use]
    pub const fn after_logout(self) -> Self {
        Self::Unauthenticated
    }

    #[must_use]
    pub const fn is_authenticated(self) -> bool {
        matches!(self, Self::Authenticated)
    }
}

/// A page of the admin panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Logout,
    Dashboard,
    Orders,
    NewOrder,
    Members,
    EditMember(MemberId),
    Shipping,
    NewAddress,
}

impl Route {
    /// Landing page for authenticated sessions.
    pub const DEFAULT: Self = Self::Dashboard;

    /// Match a request path to a route.
    ///
    /// A single trailing slash is ignored, so `/orders/` is `/orders`.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => path,
        };

        let route = match path {
            "/login" => Self::Login,
            "/logout" => Self::Logout,
            "/" => Self::Dashboard,
            "/orders" => Self::Orders,
            "/orders/new" => Self::NewOrder,
            "/members" => Self::Members,
            "/shipping" => Self::Shipping,
            "/shipping/new" => Self::NewAddress,
            other => {
                let id = other.strip_prefix("/members/")?.strip_suffix("/edit")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                Self::EditMember(MemberId::new(id))
            }
        };
        Some(route)
    }

    /// Canonical path for this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Logout => "/logout".to_string(),
            Self::Dashboard => "/".to_string(),
            Self::Orders => "/orders".to_string(),
            Self::NewOrder => "/orders/new".to_string(),
            Self::Members => "/members".to_string(),
            Self::EditMember(id) => format!("/members/{}/edit", urlencoding::encode(id.as_str())),
            Self::Shipping => "/shipping".to_string(),
            Self::NewAddress => "/shipping/new".to_string(),
        }
    }

    /// Routes reachable without logging in.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// Sidebar entry highlighted while this route is shown.
    #[must_use]
    pub fn nav_path(&self) -> &'static str {
        match self {
            Self::Login | Self::Logout | Self::Dashboard => "/",
            Self::Orders => "/orders",
            Self::NewOrder => "/orders/new",
            Self::Members | Self::EditMember(_) => "/members",
            Self::Shipping | Self::NewAddress => "/shipping",
        }
    }
}

/// Outcome of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Serve the page.
    Render(Route),
    /// Send the browser elsewhere.
    Redirect(Route),
}

/// Decide what to do with `path` for a session in `state`.
#[must_use]
pub fn resolve(path: &str, state: AuthState) -> Resolution {
    let route = Route::parse(path);
    match (state, route) {
        (AuthState::Unauthenticated, Some(route)) if route.is_public() => Resolution::Render(route),
        (AuthState::Unauthenticated, _) => Resolution::Redirect(Route::Login),
        (AuthState::Authenticated, Some(route)) => Resolution::Render(route),
        (AuthState::Authenticated, None) => Resolution::Redirect(Route::DEFAULT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROTECTED: &[&str] = &[
        "/",
        "/orders",
        "/orders/new",
        "/members",
        "/members/m1/edit",
        "/shipping",
        "/shipping/new",
        "/logout",
    ];

    #[test]
    fn test_unauthenticated_only_sees_login() {
        assert_eq!(
            resolve("/login", AuthState::Unauthenticated),
            Resolution::Render(Route::Login)
        );
        for path in PROTECTED {
            assert_eq!(
                resolve(path, AuthState::Unauthenticated),
                Resolution::Redirect(Route::Login),
                "{path}"
            );
        }
    }

    #[test]
    fn test_unauthenticated_unknown_path_goes_to_login() {
        assert_eq!(
            resolve("/nope", AuthState::Unauthenticated),
            Resolution::Redirect(Route::Login)
        );
    }

    #[test]
    fn test_authenticated_renders_known_routes() {
        for path in PROTECTED {
            assert!(
                matches!(resolve(path, AuthState::Authenticated), Resolution::Render(_)),
                "{path}"
            );
        }
        assert_eq!(
            resolve("/login", AuthState::Authenticated),
            Resolution::Render(Route::Login)
        );
    }

    #[test]
    fn test_authenticated_unknown_path_goes_home() {
        for path in ["/nope", "/members/m1", "/members//edit", "/orders/ORD-001"] {
            assert_eq!(
                resolve(path, AuthState::Authenticated),
                Resolution::Redirect(Route::Dashboard),
                "{path}"
            );
        }
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        assert_eq!(Route::parse("/orders/"), Some(Route::Orders));
        assert_eq!(Route::parse("/"), Some(Route::Dashboard));
    }

    #[test]
    fn test_edit_member_round_trips_through_path() {
        let route = Route::parse("/members/m3/edit");
        assert_eq!(route, Some(Route::EditMember(MemberId::new("m3"))));
        assert_eq!(route.map(|r| r.path()), Some("/members/m3/edit".to_string()));
    }

    #[test]
    fn test_state_transitions() {
        let state = AuthState::default();
        assert!(!state.is_authenticated());
        assert_eq!(state.after_login(false), AuthState::Unauthenticated);
        let state = state.after_login(true);
        assert!(state.is_authenticated());
        assert_eq!(state.after_logout(), AuthState::Unauthenticated);
    }

    #[test]
    fn test_nav_path_groups_sub_pages() {
        assert_eq!(Route::EditMember(MemberId::new("m1")).nav_path(), "/members");
        assert_eq!(Route::NewAddress.nav_path(), "/shipping");
        assert_eq!(Route::NewOrder.nav_path(), "/orders/new");
    }
}
