//! Remote store client for the storefront.
//!
//! The remote store is a hosted Postgres exposed through PostgREST-style
//! per-table endpoints under `/rest/v1`. The storefront authenticates with
//! the anon key and touches exactly two tables: it reads `products` and
//! inserts into `orders`.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use fresh_harvest_core::order::{NewOrder, Order};
use fresh_harvest_core::product::Product;

use crate::config::SupabaseConfig;

/// Per-request timeout for remote store calls. The source system let a hung
/// call spin forever; here a slow store surfaces as an error instead.
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

    /// An insert with `return=representation` came back empty.
    #[error("insert returned no rows")]
    EmptyInsert,
}

/// Client for the remote store's public (anon key) surface.
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<StoreClientInner>,
}

struct StoreClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl StoreClient {
    /// Create a new client from the storefront's remote store config.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &SupabaseConfig) -> Result<Self, SupabaseError> {
        let key = config.anon_key.expose_secret();
        let client = build_client(key)?;
        let base_url = rest_base(&config.url)?;

        Ok(Self {
            inner: Arc::new(StoreClientInner { client, base_url }),
        })
    }

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

    /// Insert a new order and return the stored row with its assigned id
    /// and creation timestamp.
    ///
    /// The insert is a single request: either the whole row lands or
    /// nothing does.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the store rejects the write,
    /// or the response cannot be parsed.
    #[instrument(skip(self, order), fields(items = order.items.len()))]
    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, SupabaseError> {
        let base = &self.inner.base_url;
        let response = self
            .inner
            .client
            .post(format!("{base}/orders"))
            .header("Prefer", "return=representation")
            .json(&[order])
            .send()
            .await?;
        let rows: Vec<Order> = read_json(response).await?;
        rows.into_iter().next().ok_or(SupabaseError::EmptyInsert)
    }
}

/// Build a reqwest client with the store auth headers installed.
pub(crate) fn build_client(key: &str) -> Result<reqwest::Client, SupabaseError> {
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

    Ok(reqwest::Client::builder()
        .default_headers(headers)
        .timeout(REQUEST_TIMEOUT)
        .build()?)
}

/// Resolve the `/rest/v1` endpoint root from the project base URL.
pub(crate) fn rest_base(url: &url::Url) -> Result<String, SupabaseError> {
    url.join("rest/v1")
        .map(|u| u.to_string())
        .map_err(|e| SupabaseError::Parse(format!("invalid store URL: {e}")))
}

/// Read a success body as JSON, turning error statuses into `Api` errors.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, SupabaseError> {
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
