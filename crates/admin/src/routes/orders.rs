//! Order table handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::instrument;

use fresh_harvest_core::order::Order;
use fresh_harvest_core::types::price::format_usd;
use fresh_harvest_core::types::{OrderId, OrderStatus};

use crate::error::Result;
use crate::mirror::OrderStats;
use crate::reconcile::StatusUpdate;
use crate::routes::message_for;
use crate::state::AppState;

/// One selectable status in the inline dropdown.
#[derive(Clone)]
pub struct StatusOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Order display data for the table.
#[derive(Clone)]
pub struct OrderRowView {
    pub id: String,
    pub created_at: String,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub note: Option<String>,
    pub items_summary: String,
    pub total: String,
    pub status: String,
    pub status_options: Vec<StatusOption>,
    pub terminal: bool,
}

impl From<&Order> for OrderRowView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            created_at: order.created_at.format("%Y-%m-%d %H:%M").to_string(),
            customer_name: order.customer_name.clone(),
            phone: order.phone.clone(),
            address: order.address.clone(),
            note: order.note.clone(),
            items_summary: order
                .items
                .iter()
                .map(|i| format!("{}x {}", i.quantity, i.name))
                .collect::<Vec<_>>()
                .join(", "),
            total: format_usd(order.total_amount),
            status: order.status.to_string(),
            status_options: status_options(order.status),
            terminal: order.status.is_terminal(),
        }
    }
}

/// Statistics display data.
#[derive(Clone)]
pub struct StatsView {
    pub total_orders: usize,
    pub total_revenue: String,
    pub pending_orders: usize,
}

impl From<&OrderStats> for StatsView {
    fn from(stats: &OrderStats) -> Self {
        Self {
            total_orders: stats.total_orders,
            total_revenue: format_usd(stats.total_revenue),
            pending_orders: stats.pending_orders,
        }
    }
}

/// The dropdown shows the current status plus every transition the policy
/// allows from it.
fn status_options(current: OrderStatus) -> Vec<StatusOption> {
    OrderStatus::ALL
        .iter()
        .filter(|s| **s == current || current.can_transition_to(**s))
        .map(|s| StatusOption {
            value: s.as_str().to_string(),
            label: status_label(*s).to_string(),
            selected: *s == current,
        })
        .collect()
}

const fn status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "Pending",
        OrderStatus::Shipped => "Shipped",
        OrderStatus::Delivered => "Delivered",
        OrderStatus::Cancelled => "Cancelled",
    }
}

/// Query parameters for the order table.
#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    /// Local search over the loaded mirror.
    pub q: Option<String>,
    /// Toast code after a successful mutation.
    pub notice: Option<String>,
    /// Toast code after a failure.
    pub error: Option<String>,
}

/// Status update form data.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusForm {
    pub status: String,
}

/// Delete form data.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    /// Must be present - rendered by the confirm dialog in the template.
    pub confirm: Option<String>,
}

/// Orders table page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub rows: Vec<OrderRowView>,
    pub stats: StatsView,
    pub search_value: String,
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Orders table.
///
/// Plain view entry reloads the mirror in full; a search request filters
/// the already-loaded mirror without touching the remote store.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Result<OrdersIndexTemplate> {
    let search = query.q.as_deref().filter(|s| !s.trim().is_empty());
    let mut error = query.error.as_deref().and_then(message_for);

    if search.is_none() {
        if let Err(e) = state.reconciler().refresh_orders().await {
            tracing::error!(error = %e, "Failed to load orders");
            error = message_for("load_failed");
        }
    }

    let (orders, stats) = state.reconciler().orders_overview(search).await;

    Ok(OrdersIndexTemplate {
        rows: orders.iter().map(OrderRowView::from).collect(),
        stats: StatsView::from(&stats),
        search_value: query.q.unwrap_or_default(),
        notice: query
            .notice
            .as_deref()
            .and_then(message_for)
            .map(String::from),
        error: error.map(String::from),
    })
}

/// Update an order's status from the inline dropdown.
#[instrument(skip(state))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<UpdateStatusForm>,
) -> Redirect {
    // Validate before any remote call.
    let Ok(status) = form.status.parse::<OrderStatus>() else {
        return Redirect::to("/orders?error=invalid_status");
    };

    match state
        .reconciler()
        .update_order_status(OrderId::new(id), status)
        .await
    {
        Ok(StatusUpdate::Applied) => Redirect::to("/orders?notice=status_updated"),
        Ok(StatusUpdate::Unchanged) => Redirect::to("/orders"),
        Ok(StatusUpdate::NotFound) => Redirect::to("/orders?error=order_missing"),
        Ok(StatusUpdate::Rejected { from }) => {
            tracing::debug!(order_id = id, %from, to = %status, "Rejected status transition");
            Redirect::to("/orders?error=invalid_transition")
        }
        Err(e) => {
            tracing::error!(error = %e, order_id = id, "Failed to update order status");
            Redirect::to("/orders?error=update_failed")
        }
    }
}

/// Delete an order. Requires the confirmation field from the dialog.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<DeleteForm>,
) -> Redirect {
    if !confirmed(form.confirm.as_deref()) {
        return Redirect::to("/orders?error=confirm_required");
    }

    match state.reconciler().delete_order(OrderId::new(id)).await {
        Ok(_) => Redirect::to("/orders?notice=order_deleted"),
        Err(e) => {
            tracing::error!(error = %e, order_id = id, "Failed to delete order");
            Redirect::to("/orders?error=delete_failed")
        }
    }
}

/// Whether a delete form carried its confirmation field.
pub(crate) fn confirmed(value: Option<&str>) -> bool {
    matches!(value, Some("true" | "on"))
}
