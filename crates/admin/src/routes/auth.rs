//! Admin login stub.
//!
//! There is no real authentication; deployment-level network controls gate
//! access, and the login page redirects straight into the orders view.

use axum::response::Redirect;

/// Login page stub.
pub async fn login() -> Redirect {
    Redirect::to("/orders")
}
