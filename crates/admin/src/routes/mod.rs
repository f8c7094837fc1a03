//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check (outside the login guard)
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login form submission
//! GET  /logout                 - Redirect to the dashboard (logout is POST only)
//! POST /logout                 - Logout
//!
//! # Dashboard
//! GET  /                       - Stats, status breakdown, weekly trend, recent orders
//!
//! # Orders
//! GET  /orders                 - Order list (?q=&status=)
//! GET  /orders/new             - New order form (?member_id=&address_id=&status=&memo=)
//! POST /orders/new             - Create order
//!
//! # Members
//! GET  /members                - Member list (?q=)
//! GET  /members/{id}/edit      - Edit member form
//! POST /members/{id}/edit      - Update member
//!
//! # Shipping addresses
//! GET  /shipping               - Address list (?member_id=)
//! GET  /shipping/new           - New address form
//! POST /shipping/new           - Create address
//! ```

use axum::{
    Router,
    http::Uri,
    response::Redirect,
    routing::get,
};

use crate::models::CurrentOperator;
use crate::router::Route;
use crate::state::AppState;

pub mod auth;
pub mod dashboard;
pub mod forms;
pub mod members;
pub mod orders;
pub mod shipping;

/// Build the guarded page router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout_page).post(auth::logout))
        // Dashboard
        .route("/", get(dashboard::index))
        // Orders
        .route("/orders", get(orders::index))
        .route("/orders/new", get(orders::new_order_page).post(orders::create))
        // Members
        .route("/members", get(members::index))
        .route(
            "/members/{id}/edit",
            get(members::edit_page).post(members::update),
        )
        // Shipping addresses
        .route("/shipping", get(shipping::index))
        .route("/shipping/new", get(shipping::new_page).post(shipping::create))
        .fallback(fallback)
}

/// Liveness health check endpoint.
pub async fn health() -> &'static str {
    "ok"
}

/// Paths the guard let through but no handler matched, such as `/orders/`.
async fn fallback(uri: Uri) -> Redirect {
    Redirect::to(&canonical_target(&uri))
}

/// Canonical location for an unmatched path, keeping its query string.
/// Paths that do not name a page go to the dashboard.
fn canonical_target(uri: &Uri) -> String {
    let Some(path) = Route::parse(uri.path())
        .map(|route| route.path())
        .filter(|path| path != uri.path())
    else {
        return Route::DEFAULT.path();
    };

    match uri.query() {
        Some(query) if !query.is_empty() => format!("{path}?{query}"),
        _ => path,
    }
}

// =============================================================================
// Layout
// =============================================================================

/// Sidebar entry.
#[derive(Debug, Clone)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

const NAV: [(&str, &str); 5] = [
    ("/", "ホーム"),
    ("/orders/new", "新規注文"),
    ("/orders", "注文履歴"),
    ("/members", "会員情報"),
    ("/shipping", "配送先"),
];

/// Data every page inside the sidebar layout needs.
#[derive(Debug, Clone)]
pub struct Layout {
    pub operator_email: String,
    pub current_path: &'static str,
}

impl Layout {
    #[must_use]
    pub fn new(operator: &CurrentOperator, route: &Route) -> Self {
        Self {
            operator_email: operator.email.clone(),
            current_path: route.nav_path(),
        }
    }

    /// Sidebar entries with the current section marked.
    #[must_use]
    pub fn nav(&self) -> Vec<NavItem> {
        NAV.iter()
            .map(|&(href, label)| NavItem {
                href,
                label,
                active: href == self.current_path,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use protein_admin_core::MemberId;

    use super::*;

    fn target(uri: &str) -> String {
        canonical_target(&uri.parse::<Uri>().unwrap_or_default())
    }

    #[test]
    fn test_trailing_slash_keeps_query() {
        assert_eq!(target("/orders/?status=COMPLETED"), "/orders?status=COMPLETED");
        assert_eq!(target("/members/?q=sato"), "/members?q=sato");
        assert_eq!(target("/shipping/"), "/shipping");
        assert_eq!(target("/orders/?"), "/orders");
    }

    #[test]
    fn test_unknown_path_goes_home_without_query() {
        assert_eq!(target("/nowhere?status=COMPLETED"), "/");
        assert_eq!(target("/members/m1"), "/");
    }

    #[test]
    fn test_nav_marks_exactly_one_entry() {
        let operator = CurrentOperator {
            email: "ops@example.com".to_string(),
        };
        let layout = Layout::new(&operator, &Route::EditMember(MemberId::new("m1")));
        let active: Vec<_> = layout
            .nav()
            .into_iter()
            .filter(|item| item.active)
            .map(|item| item.href)
            .collect();
        assert_eq!(active, ["/members"]);
    }
}
