//! Product listing handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use fresh_harvest_core::product::Product;
use fresh_harvest_core::types::price::format_usd;

use crate::cart_store;
use crate::catalog::{categories, filter_products};
use crate::error::Result;
use crate::filters;
use crate::models::session::{Flash, take_flash};
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub price: String,
    pub category: String,
    pub unit: String,
    pub image: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: format_usd(product.price),
            category: product.category.clone(),
            unit: product.unit.clone(),
            image: product.image.clone(),
        }
    }
}

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    /// Active category filter; absent means "All".
    pub category: Option<String>,
    /// Search term over product names.
    pub q: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductCard>,
    pub categories: Vec<String>,
    pub active_category: String,
    pub search_value: String,
    pub cart_count: u32,
    pub flash: Option<Flash>,
}

/// Product listing page with category filter and search.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ProductsQuery>,
) -> Result<ProductsIndexTemplate> {
    // A failed catalog load renders an empty grid rather than an error page.
    let catalog = match state.catalog().all().await {
        Ok(products) => products,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load catalog");
            std::sync::Arc::new(Vec::new())
        }
    };

    let active_category = query.category.unwrap_or_else(|| "All".to_string());
    let search_value = query.q.unwrap_or_default();
    let search_term = Some(search_value.as_str()).filter(|s| !s.trim().is_empty());
    let products = filter_products(&catalog, Some(active_category.as_str()), search_term)
    .into_iter()
    .map(ProductCard::from)
    .collect();

    let cart = cart_store::load(&session).await?;
    let flash = take_flash(&session).await?;

    Ok(ProductsIndexTemplate {
        products,
        categories: categories(&catalog),
        active_category,
        search_value,
        cart_count: cart.item_count(),
        flash,
    })
}
