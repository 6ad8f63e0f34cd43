//! Checkout and order submission handlers.
//!
//! Submission is all-or-nothing from the shopper's perspective: validation
//! happens before any remote call, and a failed insert leaves the cart
//! untouched so the order can be retried without re-entering items.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use fresh_harvest_core::order::{CustomerDetails, NewOrder};

use crate::cart_store;
use crate::error::Result;
use crate::filters;
use crate::models::session::{Flash, FlashKind, set_flash, take_flash};
use crate::routes::cart::CartView;
use crate::state::AppState;

/// Checkout form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub note: Option<String>,
}

/// Query parameters for the confirmation page.
#[derive(Debug, Deserialize)]
pub struct SuccessQuery {
    pub id: Option<i64>,
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub cart: CartView,
    pub cart_count: u32,
    pub flash: Option<Flash>,
}

/// Order confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/success.html")]
pub struct SuccessTemplate {
    pub order_id: Option<i64>,
    pub cart_count: u32,
    pub flash: Option<Flash>,
}

/// Display the checkout form with an order summary.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Response> {
    let cart = cart_store::load(&session).await?;
    if cart.is_empty() {
        set_flash(&session, FlashKind::Error, "Your cart is empty").await?;
        return Ok(Redirect::to("/cart").into_response());
    }
    let flash = take_flash(&session).await?;

    Ok(CheckoutTemplate {
        cart_count: cart.item_count(),
        cart: CartView::from(&cart),
        flash,
    }
    .into_response())
}

/// Place the order.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Redirect> {
    let cart = cart_store::load(&session).await?;

    // Reject before touching the remote store.
    let details = match CustomerDetails::new(
        &form.name,
        &form.address,
        &form.phone,
        form.note.as_deref(),
    ) {
        Ok(details) => details,
        Err(e) => {
            set_flash(&session, FlashKind::Error, e.to_string()).await?;
            return Ok(Redirect::to("/checkout"));
        }
    };

    let new_order = match NewOrder::from_cart(&cart, details) {
        Ok(order) => order,
        Err(e) => {
            set_flash(&session, FlashKind::Error, e.to_string()).await?;
            return Ok(Redirect::to("/cart"));
        }
    };

    match state.store().create_order(&new_order).await {
        Ok(order) => {
            // The order is placed; clearing the cart is a separate effect.
            cart_store::clear(&session).await?;
            set_flash(&session, FlashKind::Success, "Order placed, thank you!").await?;
            let order_id = order.id;
            Ok(Redirect::to(&format!("/checkout/success?id={order_id}")))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to place order");
            set_flash(
                &session,
                FlashKind::Error,
                "Failed to place order. Please try again.",
            )
            .await?;
            Ok(Redirect::to("/checkout"))
        }
    }
}

/// Order confirmation page.
#[instrument(skip(session))]
pub async fn success(session: Session, Query(query): Query<SuccessQuery>) -> Result<SuccessTemplate> {
    let cart = cart_store::load(&session).await?;
    let flash = take_flash(&session).await?;

    Ok(SuccessTemplate {
        order_id: query.id,
        cart_count: cart.item_count(),
        flash,
    })
}
