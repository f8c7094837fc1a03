//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use protein_admin_core::OrderStatus;

use crate::{
    filters,
    middleware::RequireAuth,
    router::Route,
    routes::{Layout, orders::OrderRowView},
    state::AppState,
    store::Snapshot,
};

/// Orders shown in the recent list.
const RECENT_ORDERS: usize = 5;

/// Weekly order counts shown on the trend chart. Not derived from data.
const WEEKLY_TREND: [(&str, u32); 7] = [
    ("10/01", 12),
    ("10/02", 19),
    ("10/03", 8),
    ("10/04", 24),
    ("10/05", 15),
    ("10/06", 18),
    ("10/07", 22),
];

/// Headline counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardMetrics {
    pub total_orders: usize,
    /// Received plus in progress.
    pub pending_orders: usize,
    pub completed_orders: usize,
    pub members: usize,
    pub active_members: usize,
    pub active_addresses: usize,
}

/// One slice of the status breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSlice {
    pub name: &'static str,
    pub value: usize,
    pub color: &'static str,
    /// Share of all orders, 0-100.
    pub percent: usize,
}

/// One bar of the weekly trend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendBar {
    pub name: &'static str,
    pub count: u32,
    /// Height relative to the tallest bar, 0-100.
    pub height: u32,
}

impl DashboardMetrics {
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let count = |status: OrderStatus| {
            snapshot
                .orders
                .iter()
                .filter(|o| o.status == status)
                .count()
        };
        Self {
            total_orders: snapshot.orders.len(),
            pending_orders: snapshot
                .orders
                .iter()
                .filter(|o| o.status.is_pending())
                .count(),
            completed_orders: count(OrderStatus::Completed),
            members: snapshot.members.len(),
            active_members: snapshot.members.iter().filter(|m| m.is_active).count(),
            active_addresses: snapshot.addresses.iter().filter(|a| a.is_active).count(),
        }
    }
}

/// Order counts per status in declaration order.
#[must_use]
pub fn status_breakdown(snapshot: &Snapshot) -> Vec<StatusSlice> {
    let total = snapshot.orders.len();
    OrderStatus::ALL
        .iter()
        .map(|&status| {
            let value = snapshot.orders.iter().filter(|o| o.status == status).count();
            StatusSlice {
                name: status.label(),
                value,
                color: status.chart_color(),
                percent: if total == 0 { 0 } else { value * 100 / total },
            }
        })
        .collect()
}

/// The fixed weekly trend series.
#[must_use]
pub fn weekly_trend() -> Vec<TrendBar> {
    let max = WEEKLY_TREND.iter().map(|&(_, c)| c).max().unwrap_or(0);
    WEEKLY_TREND
        .iter()
        .map(|&(name, count)| TrendBar {
            name,
            count,
            height: if max == 0 { 0 } else { count * 100 / max },
        })
        .collect()
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub layout: Layout,
    pub metrics: DashboardMetrics,
    pub status_breakdown: Vec<StatusSlice>,
    pub weekly_trend: Vec<TrendBar>,
    pub recent_orders: Vec<OrderRowView>,
}

/// Dashboard page handler.
#[instrument(skip_all)]
pub async fn index(
    RequireAuth(operator): RequireAuth,
    State(state): State<AppState>,
) -> DashboardTemplate {
    let snapshot = state.store().snapshot().await;

    DashboardTemplate {
        layout: Layout::new(&operator, &Route::Dashboard),
        metrics: DashboardMetrics::from_snapshot(&snapshot),
        status_breakdown: status_breakdown(&snapshot),
        weekly_trend: weekly_trend(),
        recent_orders: snapshot
            .orders
            .iter()
            .take(RECENT_ORDERS)
            .map(OrderRowView::from)
            .collect(),
    }
}
