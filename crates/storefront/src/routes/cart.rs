//! Cart route handlers.
//!
//! Every mutation loads the session cart, applies the cart-engine
//! operation, and persists the result before redirecting - the stored cart
//! is never stale relative to what the response reflects.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, header},
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use fresh_harvest_core::cart::{Cart, CartLine};
use fresh_harvest_core::types::ProductId;
use fresh_harvest_core::types::price::format_usd;

use crate::cart_store;
use crate::error::Result;
use crate::filters;
use crate::models::session::{Flash, FlashKind, set_flash, take_flash};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub unit: String,
    pub image: String,
    pub quantity: u32,
    pub line_total: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.to_string(),
            name: line.name.clone(),
            price: format_usd(line.price),
            unit: line.unit.clone(),
            image: line.image.clone(),
            quantity: line.quantity,
            line_total: format_usd(line.line_total()),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let totals = cart.totals();
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            subtotal: format_usd(totals.subtotal),
            shipping: format_usd(totals.shipping),
            total: format_usd(totals.grand_total),
            item_count: cart.item_count(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub quantity: Option<u32>,
}

/// Quantity delta form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub delta: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub cart_count: u32,
    pub flash: Option<Flash>,
}

/// Display the cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CartShowTemplate> {
    let cart = cart_store::load(&session).await?;
    let flash = take_flash(&session).await?;

    Ok(CartShowTemplate {
        cart_count: cart.item_count(),
        cart: CartView::from(&cart),
        flash,
    })
}

/// Add an item to the cart.
///
/// Unknown product ids are silently ignored - the button was rendered from
/// a catalog the admin may have edited since.
#[instrument(skip(state, session, headers))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let id = ProductId::new(form.product_id);
    let quantity = form.quantity.unwrap_or(1);

    match state.catalog().find(&id).await {
        Ok(Some(product)) => {
            let mut cart = cart_store::load(&session).await?;
            cart.add_item(&product, quantity);
            cart_store::save(&session, &cart).await?;
            set_flash(
                &session,
                FlashKind::Success,
                format!("{} added to cart", product.name),
            )
            .await?;
        }
        Ok(None) => {
            tracing::debug!(product_id = %id, "Add to cart for unknown product");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load catalog for add to cart");
            set_flash(&session, FlashKind::Error, "Could not add to cart, try again").await?;
        }
    }

    Ok(redirect_back(&headers, "/products"))
}

/// Apply a signed quantity delta to a line; dropping to zero removes it.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Redirect> {
    let id = ProductId::new(form.product_id);
    let mut cart = cart_store::load(&session).await?;
    if cart.change_quantity(&id, form.delta) {
        cart_store::save(&session, &cart).await?;
    }
    Ok(Redirect::to("/cart"))
}

/// Remove a line from the cart.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    let id = ProductId::new(form.product_id);
    let mut cart = cart_store::load(&session).await?;
    if cart.remove_item(&id) {
        cart_store::save(&session, &cart).await?;
    }
    Ok(Redirect::to("/cart"))
}

/// Redirect to the referring page, falling back to `fallback`.
fn redirect_back(headers: &HeaderMap, fallback: &str) -> Redirect {
    let target = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(fallback);
    Redirect::to(target)
}
