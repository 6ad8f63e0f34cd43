//! Remote store client for the admin panel.
//!
//! HIGH PRIVILEGE: this client authenticates with the service-role key and
//! exposes the full mutation surface of the `orders` and `products` tables.
//! Endpoints are PostgREST-style, rooted at `/rest/v1`, with row filters
//! passed as `id=eq.{id}` query parameters.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use fresh_harvest_core::order::Order;
use fresh_harvest_core::product::{NewProduct, Product};
use fresh_harvest_core::types::{OrderId, OrderStatus, ProductId};

use crate::config::SupabaseAdminConfig;

/// Per-request timeout for remote store calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when talking to the remote store.
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// HTTP request failed (network, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store rejected the request.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Client for the remote store's admin (service-role) surface.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl AdminClient {
    /// Create a new client from the admin's remote store config.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &SupabaseAdminConfig) -> Result<Self, SupabaseError> {
        let key = config.service_role_key.expose_secret();

        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(key)
                .map_err(|e| SupabaseError::Parse(format!("invalid store key: {e}")))?,
        );
        let bearer = format!("Bearer {key}");
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&bearer)
                .map_err(|e| SupabaseError::Parse(format!("invalid store key: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let base_url = config
            .url
            .join("rest/v1")
            .map(|u| u.to_string())
            .map_err(|e| SupabaseError::Parse(format!("invalid store URL: {e}")))?;

        Ok(Self {
            inner: Arc::new(AdminClientInner { client, base_url }),
        })
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// List all orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, SupabaseError> {
        let base = &self.inner.base_url;
        let response = self
            .inner
            .client
            .get(format!("{base}/orders"))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;
        read_json(response).await
    }

    /// Update the status of a single order.
    ///
    /// Returns the updated row, or `None` when no row matched the id (the
    /// order was deleted remotely since the mirror loaded it).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store rejects the write.
    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, SupabaseError> {
        let base = &self.inner.base_url;
        let response = self
            .inner
            .client
            .patch(format!("{base}/orders"))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await?;
        let rows: Vec<Order> = read_json(response).await?;
        Ok(rows.into_iter().next())
    }

    /// Delete a single order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store rejects the delete.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: OrderId) -> Result<(), SupabaseError> {
        let base = &self.inner.base_url;
        let response = self
            .inner
            .client
            .delete(format!("{base}/orders"))
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;
        check_status(response).await
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// List all products, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, SupabaseError> {
        let base = &self.inner.base_url;
        let response = self
            .inner
            .client
            .get(format!("{base}/products"))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;
        read_json(response).await
    }

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store rejects the write.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn insert_product(&self, product: &NewProduct) -> Result<(), SupabaseError> {
        let base = &self.inner.base_url;
        let response = self
            .inner
            .client
            .post(format!("{base}/products"))
            .json(&[product])
            .send()
            .await?;
        check_status(response).await
    }

    /// Update an existing product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store rejects the write.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        product: &NewProduct,
    ) -> Result<(), SupabaseError> {
        let base = &self.inner.base_url;
        let response = self
            .inner
            .client
            .patch(format!("{base}/products"))
            .query(&[("id", format!("eq.{id}"))])
            .json(product)
            .send()
            .await?;
        check_status(response).await
    }

    /// Delete a single product.
    ///
    /// Past order snapshots keep their copied product fields; deleting the
    /// row never rewrites order history.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store rejects the delete.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), SupabaseError> {
        let base = &self.inner.base_url;
        let response = self
            .inner
            .client
            .delete(format!("{base}/products"))
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;
        check_status(response).await
    }
}

/// Read a success body as JSON, turning error statuses into `Api` errors.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, SupabaseError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(SupabaseError::Api {
            status: status.as_u16(),
            message,
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| SupabaseError::Parse(e.to_string()))
}

/// Discard a success body, turning error statuses into `Api` errors.
async fn check_status(response: reqwest::Response) -> Result<(), SupabaseError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(SupabaseError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(())
}
