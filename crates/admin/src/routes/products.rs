//! Product management handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::instrument;

use fresh_harvest_core::product::{NewProduct, Product};
use fresh_harvest_core::types::ProductId;
use fresh_harvest_core::types::price::format_usd;
use rust_decimal::Decimal;

use crate::error::{AppError, Result};
use crate::routes::message_for;
use crate::routes::orders::confirmed;
use crate::state::AppState;

/// Product display data for the table.
#[derive(Clone)]
pub struct ProductRowView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub category: String,
    pub unit: String,
    pub image: String,
}

impl From<&Product> for ProductRowView {
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

/// Query parameters for the product table.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Save form data - shared by the add and edit paths.
#[derive(Debug, Deserialize)]
pub struct SaveProductForm {
    /// Present when editing, absent when adding.
    pub id: Option<String>,
    pub name: String,
    pub price: String,
    pub category: String,
    pub unit: String,
    pub image: String,
}

/// Delete form data.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub confirm: Option<String>,
}

/// Product table page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub rows: Vec<ProductRowView>,
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Product form page template (add and edit).
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub heading: String,
    /// Empty when adding, the product id when editing.
    pub id: String,
    pub name: String,
    pub price: String,
    pub category: String,
    pub unit: String,
    pub image: String,
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Product table. View entry reloads the mirror in full.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<ProductsIndexTemplate> {
    let mut error = query.error.as_deref().and_then(message_for);

    if let Err(e) = state.reconciler().refresh_products().await {
        tracing::error!(error = %e, "Failed to load products");
        error = message_for("load_failed");
    }

    let products = state.reconciler().products_snapshot().await;

    Ok(ProductsIndexTemplate {
        rows: products.iter().map(ProductRowView::from).collect(),
        notice: query
            .notice
            .as_deref()
            .and_then(message_for)
            .map(String::from),
        error: error.map(String::from),
    })
}

/// Blank form for a new product.
#[instrument]
pub async fn new_form() -> ProductFormTemplate {
    ProductFormTemplate {
        heading: "Add product".to_string(),
        id: String::new(),
        name: String::new(),
        price: String::new(),
        category: String::new(),
        unit: String::new(),
        image: String::new(),
        notice: None,
        error: None,
    }
}

/// Prefilled form for an existing product.
#[instrument(skip(state))]
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ProductFormTemplate> {
    let id = ProductId::new(id);
    let mut product = state.reconciler().find_product(&id).await;
    if product.is_none() {
        // Cold mirror (direct link); reload once before giving up.
        if let Err(e) = state.reconciler().refresh_products().await {
            tracing::error!(error = %e, "Failed to load products");
        }
        product = state.reconciler().find_product(&id).await;
    }
    let product = product.ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(ProductFormTemplate {
        heading: format!("Edit {}", product.name),
        id: product.id.to_string(),
        name: product.name,
        price: product.price.to_string(),
        category: product.category,
        unit: product.unit,
        image: product.image,
        notice: None,
        error: None,
    })
}

/// Insert or update a product, then redirect back to the table.
#[instrument(skip(state, form))]
pub async fn save(State(state): State<AppState>, Form(form): Form<SaveProductForm>) -> Redirect {
    let Some(fields) = validate(&form) else {
        return Redirect::to("/products?error=invalid_product");
    };
    let id = form
        .id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ProductId::new);

    match state.reconciler().save_product(id.as_ref(), &fields).await {
        Ok(()) => Redirect::to("/products?notice=product_saved"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to save product");
            Redirect::to("/products?error=save_failed")
        }
    }
}

/// Delete a product. Requires the confirmation field from the dialog.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DeleteForm>,
) -> Redirect {
    if !confirmed(form.confirm.as_deref()) {
        return Redirect::to("/products?error=confirm_required");
    }

    match state.reconciler().delete_product(&ProductId::new(id)).await {
        Ok(_) => Redirect::to("/products?notice=product_deleted"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete product");
            Redirect::to("/products?error=delete_failed")
        }
    }
}

/// Reject blank fields and unparseable prices before any remote call.
fn validate(form: &SaveProductForm) -> Option<NewProduct> {
    let name = non_blank(&form.name)?;
    let category = non_blank(&form.category)?;
    let unit = non_blank(&form.unit)?;
    let price = form.price.trim().parse::<Decimal>().ok()?;
    if price < Decimal::ZERO {
        return None;
    }

    Some(NewProduct {
        name,
        price,
        category,
        unit,
        image: form.image.trim().to_string(),
    })
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(price: &str) -> SaveProductForm {
        SaveProductForm {
            id: None,
            name: "Kale".to_string(),
            price: price.to_string(),
            category: "Vegetables".to_string(),
            unit: "bunch".to_string(),
            image: " https://img.example/kale.jpg ".to_string(),
        }
    }

    #[test]
    fn valid_form_parses_and_trims() {
        let fields = validate(&form("2.50")).expect("valid");
        assert_eq!(fields.price, Decimal::new(250, 2));
        assert_eq!(fields.image, "https://img.example/kale.jpg");
    }

    #[test]
    fn bad_price_or_blank_name_is_rejected() {
        assert!(validate(&form("two dollars")).is_none());
        assert!(validate(&form("-1")).is_none());

        let mut blank = form("1.00");
        blank.name = "   ".to_string();
        assert!(validate(&blank).is_none());
    }
}
