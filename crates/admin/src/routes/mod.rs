//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Redirect to /orders
//! GET  /login                  - Login stub (redirects straight in)
//! GET  /health                 - Health check
//!
//! # Orders
//! GET  /orders                 - Order table (reloads mirror; ?q= filters locally)
//! POST /orders/{id}/status     - Update order status
//! POST /orders/{id}/delete     - Delete order (requires confirm field)
//!
//! # Products
//! GET  /products               - Product table (reloads mirror)
//! GET  /products/new           - Blank product form
//! GET  /products/{id}/edit     - Prefilled product form
//! POST /products/save          - Insert or update a product
//! POST /products/{id}/delete   - Delete product (requires confirm field)
//! ```
//!
//! Mutation handlers redirect back with a `notice` or `error` code; the
//! templates map the code to a toast message.

pub mod auth;
pub mod orders;
pub mod products;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::state::AppState;

/// Root redirect into the orders view.
async fn root() -> Redirect {
    Redirect::to("/orders")
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}/status", post(orders::update_status))
        .route("/{id}/delete", post(orders::delete))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/new", get(products::new_form))
        .route("/{id}/edit", get(products::edit_form))
        .route("/save", post(products::save))
        .route("/{id}/delete", post(products::delete))
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/login", get(auth::login))
        .nest("/orders", order_routes())
        .nest("/products", product_routes())
}

/// Map a redirect code to its toast message.
///
/// Codes keep the redirect URLs free of user-controlled text.
#[must_use]
pub fn message_for(code: &str) -> Option<&'static str> {
    match code {
        "status_updated" => Some("Order status updated"),
        "order_deleted" => Some("Order deleted"),
        "order_missing" => Some("That order no longer exists remotely"),
        "invalid_status" => Some("Unknown order status"),
        "invalid_transition" => Some("That status change is not allowed"),
        "update_failed" => Some("Failed to update status - view reloaded from the store"),
        "delete_failed" => Some("Failed to delete - nothing was changed"),
        "confirm_required" => Some("Deletion needs confirmation"),
        "product_saved" => Some("Product saved"),
        "product_deleted" => Some("Product deleted"),
        "invalid_product" => Some("Product fields are incomplete or invalid"),
        "save_failed" => Some("Failed to save product"),
        "load_failed" => Some("Failed to load from the remote store"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_have_messages() {
        assert!(message_for("status_updated").is_some());
        assert!(message_for("delete_failed").is_some());
        assert_eq!(message_for("bogus"), None);
    }
}
