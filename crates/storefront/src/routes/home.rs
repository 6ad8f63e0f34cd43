//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart_store;
use crate::error::Result;
use crate::filters;
use crate::models::session::{Flash, take_flash};
use crate::routes::products::ProductCard;
use crate::state::AppState;

/// Number of featured products shown on the home page.
const FEATURED_COUNT: usize = 4;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductCard>,
    pub cart_count: u32,
    pub flash: Option<Flash>,
}

/// Home page with the first few catalog products featured.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<HomeTemplate> {
    let products = match state.catalog().all().await {
        Ok(products) => products
            .iter()
            .take(FEATURED_COUNT)
            .map(ProductCard::from)
            .collect(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load catalog");
            Vec::new()
        }
    };

    let cart = cart_store::load(&session).await?;
    let flash = take_flash(&session).await?;

    Ok(HomeTemplate {
        products,
        cart_count: cart.item_count(),
        flash,
    })
}
