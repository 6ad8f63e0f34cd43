//! Reconciliation service: remote mutations with mirror upkeep.
//!
//! Order mutations follow an explicit two-phase policy: issue the remote
//! mutation first; on success apply the equivalent local patch; on remote
//! failure discard the orders mirror and reload it in full, so the mirror
//! never keeps an optimistic state the remote store rejected.
//!
//! Product saves take the simpler path the source system used: any
//! successful insert or update triggers a full product reload, no local
//! patching.
//!
//! Mirrors are owned here behind async mutexes - one admin mutation runs to
//! completion (remote round-trip included) before the next one observes the
//! mirror.

use tokio::sync::Mutex;

use fresh_harvest_core::order::Order;
use fresh_harvest_core::product::{NewProduct, Product};
use fresh_harvest_core::types::{OrderId, OrderStatus, ProductId};

use crate::mirror::{OrderMirror, OrderStats};
use crate::supabase::{AdminClient, SupabaseError};

/// Outcome of a status update attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusUpdate {
    /// Remote updated and mirror patched.
    Applied,
    /// The order already had the requested status.
    Unchanged,
    /// No remote row matched the id; the mirror entry is stale.
    NotFound,
    /// The transition is not allowed from the order's current status.
    Rejected { from: OrderStatus },
}

/// Owns the remote client and the local mirrors.
pub struct Reconciler {
    client: AdminClient,
    orders: Mutex<OrderMirror>,
    products: Mutex<Vec<Product>>,
}

impl Reconciler {
    #[must_use]
    pub fn new(client: AdminClient) -> Self {
        Self {
            client,
            orders: Mutex::new(OrderMirror::default()),
            products: Mutex::new(Vec::new()),
        }
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Full reload of the orders mirror (view entry).
    ///
    /// # Errors
    ///
    /// Returns an error if the remote list fails; the mirror keeps its
    /// previous contents in that case.
    pub async fn refresh_orders(&self) -> Result<(), SupabaseError> {
        let orders = self.client.list_orders().await?;
        self.orders.lock().await.replace(orders);
        Ok(())
    }

    /// A snapshot of the mirror for rendering: matching orders plus the
    /// statistics over the full mirror.
    ///
    /// With a search term the rows are filtered locally; the statistics
    /// always reflect the unfiltered mirror.
    pub async fn orders_overview(&self, search: Option<&str>) -> (Vec<Order>, OrderStats) {
        let mirror = self.orders.lock().await;
        let orders = match search {
            Some(term) => mirror.search(term).into_iter().cloned().collect(),
            None => mirror.orders().to_vec(),
        };
        (orders, mirror.stats().clone())
    }

    /// Update an order's status.
    ///
    /// The transition is validated against the mirrored row before any
    /// remote call. On remote success only the matching mirror entry is
    /// patched; on remote failure the mirror is discarded and reloaded.
    ///
    /// # Errors
    ///
    /// Returns the remote error after the mirror has been resynchronized.
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<StatusUpdate, SupabaseError> {
        let mut mirror = self.orders.lock().await;

        if let Some(current) = mirror.status_of(id) {
            if current == status {
                return Ok(StatusUpdate::Unchanged);
            }
            if !current.can_transition_to(status) {
                return Ok(StatusUpdate::Rejected { from: current });
            }
        }

        match self.client.update_order_status(id, status).await {
            Ok(Some(_)) => {
                mirror.patch_status(id, status);
                Ok(StatusUpdate::Applied)
            }
            Ok(None) => Ok(StatusUpdate::NotFound),
            Err(e) => {
                // Failed optimistic update: discard and reload so the mirror
                // reflects whatever the remote store actually holds.
                match self.client.list_orders().await {
                    Ok(orders) => mirror.replace(orders),
                    Err(reload_err) => {
                        tracing::warn!(error = %reload_err, "Reload after failed update also failed");
                        mirror.replace(Vec::new());
                    }
                }
                Err(e)
            }
        }
    }

    /// Delete an order.
    ///
    /// On success the row is removed from the mirror; on failure the mirror
    /// is left unchanged (stale until the next reload).
    ///
    /// # Errors
    ///
    /// Returns an error if the remote delete fails.
    pub async fn delete_order(&self, id: OrderId) -> Result<bool, SupabaseError> {
        let mut mirror = self.orders.lock().await;
        self.client.delete_order(id).await?;
        Ok(mirror.remove(id))
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Full reload of the product mirror (view entry).
    ///
    /// # Errors
    ///
    /// Returns an error if the remote list fails.
    pub async fn refresh_products(&self) -> Result<(), SupabaseError> {
        let fresh = self.client.list_products().await?;
        *self.products.lock().await = fresh;
        Ok(())
    }

    /// The mirrored products.
    pub async fn products_snapshot(&self) -> Vec<Product> {
        self.products.lock().await.clone()
    }

    /// Look up a mirrored product by id.
    pub async fn find_product(&self, id: &ProductId) -> Option<Product> {
        self.products.lock().await.iter().find(|p| &p.id == id).cloned()
    }

    /// Insert (no id) or update (with id) a product.
    ///
    /// Either path triggers a full reload of the product mirror on success -
    /// unlike orders, there is no optimistic local patch here.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote write or the follow-up reload fails.
    pub async fn save_product(
        &self,
        id: Option<&ProductId>,
        fields: &NewProduct,
    ) -> Result<(), SupabaseError> {
        let mut products = self.products.lock().await;
        match id {
            Some(id) => self.client.update_product(id, fields).await?,
            None => self.client.insert_product(fields).await?,
        }
        *products = self.client.list_products().await?;
        Ok(())
    }

    /// Delete a product.
    ///
    /// On success the row is removed from the mirror; on failure the mirror
    /// is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote delete fails.
    pub async fn delete_product(&self, id: &ProductId) -> Result<bool, SupabaseError> {
        let mut products = self.products.lock().await;
        self.client.delete_product(id).await?;
        let before = products.len();
        products.retain(|p| &p.id != id);
        Ok(products.len() != before)
    }
}
