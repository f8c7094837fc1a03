//! Order list and order creation handlers.

pub mod draft;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use protein_admin_core::{AddressId, Member, MemberId, Order, OrderStatus, ShippingAddress};

use crate::{
    filters,
    middleware::RequireAuth,
    router::Route,
    routes::{Layout, forms::non_blank},
    state::AppState,
};

pub use draft::{DraftError, OrderDraft};

// =============================================================================
// View Types
// =============================================================================

/// Order row for tables.
#[derive(Debug, Clone)]
pub struct OrderRowView {
    pub id: String,
    pub member_name: String,
    pub address_label: String,
    pub created_at: String,
    pub status_label: &'static str,
    pub badge_class: &'static str,
    pub memo: Option<String>,
    pub total_amount: Option<u32>,
}

impl From<&Order> for OrderRowView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            member_name: order.member_name.clone(),
            address_label: order.shipping_address_label.clone(),
            created_at: order.created_at.clone(),
            status_label: order.status.label(),
            badge_class: order.status.badge_class(),
            memo: order.memo.clone(),
            total_amount: order.total_amount,
        }
    }
}

/// `<option>` in a select box.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Status options, with `selected` marking `current`.
fn status_options(current: Option<OrderStatus>) -> Vec<SelectOption> {
    OrderStatus::ALL
        .iter()
        .map(|&status| SelectOption {
            value: status.as_str().to_string(),
            label: status.label().to_string(),
            selected: Some(status) == current,
        })
        .collect()
}

// =============================================================================
// Order List
// =============================================================================

/// Status filter on the order list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    /// Parse `all`, a blank value or a wire name.
    ///
    /// Unrecognized values fall back to [`StatusFilter::All`].
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("" | "all") => Self::All,
            Some(raw) => raw.parse::<OrderStatus>().map_or_else(
                |_| {
                    tracing::debug!(status = raw, "Ignoring unknown status filter");
                    Self::All
                },
                Self::Only,
            ),
        }
    }

    #[must_use]
    pub fn matches(self, status: OrderStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }

    const fn selected(self) -> Option<OrderStatus> {
        match self {
            Self::All => None,
            Self::Only(status) => Some(status),
        }
    }
}

/// Orders matching both the search text and the status filter, in list order.
#[must_use]
pub fn filter_orders<'a>(orders: &'a [Order], q: &str, status: StatusFilter) -> Vec<&'a Order> {
    orders
        .iter()
        .filter(|o| o.matches_search(q) && status.matches(o.status))
        .collect()
}

/// Query parameters for the order list.
#[derive(Debug, Default, Deserialize)]
pub struct OrderListQuery {
    pub q: Option<String>,
    pub status: Option<String>,
}

/// Order list template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub layout: Layout,
    pub orders: Vec<OrderRowView>,
    pub q: String,
    pub all_selected: bool,
    pub status_options: Vec<SelectOption>,
}

/// Order list page handler.
#[instrument(skip_all)]
pub async fn index(
    RequireAuth(operator): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> OrdersIndexTemplate {
    let orders = state.store().orders().await;
    let q = query.q.unwrap_or_default();
    let status = StatusFilter::parse(query.status.as_deref());

    OrdersIndexTemplate {
        layout: Layout::new(&operator, &Route::Orders),
        orders: filter_orders(&orders, &q, status)
            .into_iter()
            .map(OrderRowView::from)
            .collect(),
        q,
        all_selected: status == StatusFilter::All,
        status_options: status_options(status.selected()),
    }
}

// =============================================================================
// New Order
// =============================================================================

/// New order form fields, from the query string or the form body.
#[derive(Debug, Default, Deserialize)]
pub struct OrderInput {
    pub member_id: Option<String>,
    pub address_id: Option<String>,
    pub status: Option<String>,
    pub memo: Option<String>,
}

impl OrderInput {
    fn member_id(&self) -> Option<MemberId> {
        non_blank(self.member_id.as_deref()).map(MemberId::new)
    }

    fn address_id(&self) -> Option<AddressId> {
        non_blank(self.address_id.as_deref()).map(AddressId::new)
    }

    /// Submitted status; a missing or blank value means the default.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::UnknownStatus`] for anything that is not a
    /// status wire name.
    pub fn status(&self) -> Result<OrderStatus, DraftError> {
        match non_blank(self.status.as_deref()) {
            None => Ok(OrderStatus::default()),
            Some(raw) => raw
                .parse::<OrderStatus>()
                .map_err(|_| DraftError::UnknownStatus(raw)),
        }
    }

    /// Rebuild the draft for display.
    ///
    /// An address that does not belong to the chosen member is replaced by
    /// the member's first address, which is what happens when the operator
    /// switches member.
    #[must_use]
    pub fn restore(&self, addresses: &[ShippingAddress]) -> OrderDraft {
        let mut draft = OrderDraft::new();
        draft.select_member(self.member_id(), addresses);
        if let Some(Err(e)) = self.address_id().map(|id| draft.select_address(Some(id))) {
            tracing::debug!(error = %e, "Address reset after member change");
        }
        draft.status = self.status().unwrap_or_default();
        draft.set_memo(self.memo.clone().unwrap_or_default());
        draft
    }
}

/// New order form template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/new.html")]
pub struct NewOrderTemplate {
    pub layout: Layout,
    pub members: Vec<SelectOption>,
    pub member_selected: bool,
    pub addresses: Vec<SelectOption>,
    pub status_options: Vec<SelectOption>,
    pub memo: String,
    pub alert: Option<&'static str>,
}

impl NewOrderTemplate {
    fn new(layout: Layout, members: &[Member], draft: &OrderDraft, alert: Option<&'static str>) -> Self {
        Self {
            layout,
            members: members
                .iter()
                .map(|m| SelectOption {
                    value: m.id.to_string(),
                    label: format!("{} ({})", m.name, m.email),
                    selected: draft.member_id() == Some(&m.id),
                })
                .collect(),
            member_selected: draft.member_id().is_some(),
            addresses: draft
                .candidates()
                .iter()
                .map(|a| SelectOption {
                    value: a.id.to_string(),
                    label: a.summary(),
                    selected: draft.address_id() == Some(&a.id),
                })
                .collect(),
            status_options: status_options(Some(draft.status)),
            memo: draft.memo().to_string(),
            alert,
        }
    }
}

/// New order form handler.
///
/// Changing the member reloads this page with the current field values.
#[instrument(skip_all)]
pub async fn new_order_page(
    RequireAuth(operator): RequireAuth,
    State(state): State<AppState>,
    Query(input): Query<OrderInput>,
) -> NewOrderTemplate {
    let snapshot = state.store().snapshot().await;
    let draft = input.restore(&snapshot.addresses);

    NewOrderTemplate::new(
        Layout::new(&operator, &Route::NewOrder),
        &snapshot.members,
        &draft,
        None,
    )
}

/// Create an order from the submitted form.
#[instrument(skip_all)]
pub async fn create(
    RequireAuth(operator): RequireAuth,
    State(state): State<AppState>,
    Form(input): Form<OrderInput>,
) -> Response {
    let snapshot = state.store().snapshot().await;
    let mut draft = input.restore(&snapshot.addresses);
    let now = chrono::Local::now().naive_local();

    let outcome = input
        .status()
        .and_then(|_| draft.select_address(input.address_id()))
        .and_then(|()| {
            let mut rng = rand::rng();
            draft.submit(
                &snapshot.members,
                &snapshot.addresses,
                &snapshot.orders,
                &mut rng,
                now,
            )
        });

    match outcome {
        Ok(order) => {
            tracing::info!(order_id = %order.id, "Order created");
            state.store().add_order(order).await;
            Redirect::to(&Route::Orders.path()).into_response()
        }
        Err(e) => {
            tracing::info!(error = %e, "Order rejected");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                NewOrderTemplate::new(
                    Layout::new(&operator, &Route::NewOrder),
                    &snapshot.members,
                    &draft,
                    Some(e.alert()),
                ),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use crate::seed::Seed;

    use super::*;

    #[test]
    fn test_status_filter_parse() {
        assert_eq!(StatusFilter::parse(None), StatusFilter::All);
        assert_eq!(StatusFilter::parse(Some("all")), StatusFilter::All);
        assert_eq!(StatusFilter::parse(Some("")), StatusFilter::All);
        assert_eq!(
            StatusFilter::parse(Some("COMPLETED")),
            StatusFilter::Only(OrderStatus::Completed)
        );
        assert_eq!(StatusFilter::parse(Some("bogus")), StatusFilter::All);
    }

    #[test]
    fn test_filter_completed_on_seed() {
        let orders = Seed::load().unwrap().orders;
        let ids: Vec<_> = filter_orders(&orders, "", StatusFilter::Only(OrderStatus::Completed))
            .into_iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ids, ["ORD-001", "ORD-002"]);
    }

    #[test]
    fn test_filter_combines_search_and_status() {
        let orders = Seed::load().unwrap().orders;
        let ids: Vec<_> = filter_orders(&orders, "田中", StatusFilter::All)
            .into_iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ids, ["ORD-001", "ORD-003"]);

        let ids: Vec<_> = filter_orders(&orders, "田中", StatusFilter::Only(OrderStatus::InProgress))
            .into_iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ids, ["ORD-003"]);

        assert!(filter_orders(&orders, "ord-999", StatusFilter::All).is_empty());
    }

    #[test]
    fn test_restore_keeps_address_of_same_member() {
        let addresses = Seed::load().unwrap().addresses;
        let input = OrderInput {
            member_id: Some("m1".to_string()),
            address_id: Some("a2".to_string()),
            status: Some("IN_PROGRESS".to_string()),
            memo: Some("午前着".to_string()),
        };
        let draft = input.restore(&addresses);
        assert_eq!(draft.address_id(), Some(&AddressId::new("a2")));
        assert_eq!(draft.status, OrderStatus::InProgress);
        assert_eq!(draft.memo(), "午前着");
    }

    #[test]
    fn test_restore_resets_address_of_other_member() {
        let addresses = Seed::load().unwrap().addresses;
        let input = OrderInput {
            member_id: Some("m2".to_string()),
            address_id: Some("a1".to_string()),
            ..OrderInput::default()
        };
        let draft = input.restore(&addresses);
        assert_eq!(draft.address_id(), Some(&AddressId::new("a3")));
        assert_eq!(draft.status, OrderStatus::Received);
    }

    #[test]
    fn test_submitted_status_must_be_a_wire_name() {
        let input = |status: Option<&str>| OrderInput {
            status: status.map(str::to_string),
            ..OrderInput::default()
        };
        assert_eq!(input(None).status(), Ok(OrderStatus::Received));
        assert_eq!(input(Some(" ")).status(), Ok(OrderStatus::Received));
        assert_eq!(input(Some("COMPLETED")).status(), Ok(OrderStatus::Completed));
        assert_eq!(
            input(Some("BOGUS")).status(),
            Err(DraftError::UnknownStatus("BOGUS".to_string()))
        );
    }

    #[test]
    fn test_row_view_uses_labels() {
        let orders = Seed::load().unwrap().orders;
        let row = OrderRowView::from(&orders[2]);
        assert_eq!(row.id, "ORD-003");
        assert_eq!(row.status_label, "対応中");
        assert_eq!(row.total_amount, Some(3980));
    }
}
