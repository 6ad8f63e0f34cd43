//! Product records as stored in the remote `products` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// A row of the remote `products` table.
///
/// Read-only in the storefront; the admin panel mutates rows through its
/// own client. Editing or deleting a product never touches the snapshots
/// already embedded in carts or orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub category: String,
    /// Display unit, e.g. "1 kg" or "bunch".
    pub unit: String,
    pub image: String,
    /// Assigned by the remote store on insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert/update payload for the `products` table.
///
/// Carries no id and no timestamp - the remote store assigns both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub unit: String,
    pub image: String,
}
