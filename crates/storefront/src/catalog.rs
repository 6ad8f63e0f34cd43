//! Catalog accessor: cached read-only view over the remote product table.
//!
//! Products are immutable for the lifetime of a page session. The whole
//! list is fetched once and cached (5-minute TTL), so admin edits
//! eventually show up without a redeploy.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use fresh_harvest_core::product::Product;
use fresh_harvest_core::types::ProductId;

use crate::supabase::{StoreClient, SupabaseError};

/// Catalog cache TTL.
const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

/// Single cache key - the catalog is one list.
const CACHE_KEY: &str = "products";

/// Cached product catalog.
#[derive(Clone)]
pub struct Catalog {
    store: StoreClient,
    cache: Cache<String, Arc<Vec<Product>>>,
}

impl Catalog {
    /// Create a catalog over the given store client.
    #[must_use]
    pub fn new(store: StoreClient) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(CACHE_TTL)
            .build();
        Self { store, cache }
    }

    /// All products, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache is cold and the remote fetch fails.
    pub async fn all(&self) -> Result<Arc<Vec<Product>>, SupabaseError> {
        if let Some(products) = self.cache.get(CACHE_KEY).await {
            return Ok(products);
        }
        let products = Arc::new(self.store.list_products().await?);
        self.cache
            .insert(CACHE_KEY.to_string(), Arc::clone(&products))
            .await;
        Ok(products)
    }

    /// Look up a product by id. Unknown ids yield `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded at all.
    pub async fn find(&self, id: &ProductId) -> Result<Option<Product>, SupabaseError> {
        Ok(self.all().await?.iter().find(|p| &p.id == id).cloned())
    }
}

/// Filter a product list by category and case-insensitive name search.
///
/// A `None` or `"All"` category matches everything; the search term matches
/// on a lowercase substring of the product name.
#[must_use]
pub fn filter_products<'a>(
    products: &'a [Product],
    category: Option<&str>,
    term: Option<&str>,
) -> Vec<&'a Product> {
    let term = term.map(str::to_lowercase).filter(|t| !t.trim().is_empty());
    products
        .iter()
        .filter(|p| category.is_none_or(|c| c == "All" || p.category == c))
        .filter(|p| {
            term.as_deref()
                .is_none_or(|t| p.name.to_lowercase().contains(t))
        })
        .collect()
}

/// Distinct category names in catalog order.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen = Vec::new();
    for product in products {
        if !seen.contains(&product.category) {
            seen.push(product.category.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: &str, name: &str, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Decimal::ONE,
            category: category.to_string(),
            unit: "1 kg".to_string(),
            image: String::new(),
            created_at: None,
        }
    }

    #[test]
    fn category_all_matches_everything() {
        let products = vec![
            product("1", "Apple", "Fruits"),
            product("2", "Kale", "Vegetables"),
        ];
        assert_eq!(filter_products(&products, Some("All"), None).len(), 2);
        assert_eq!(filter_products(&products, Some("Fruits"), None).len(), 1);
    }

    #[test]
    fn search_is_case_insensitive() {
        let products = vec![
            product("1", "Green Apple", "Fruits"),
            product("2", "Kale", "Vegetables"),
        ];
        let hits = filter_products(&products, None, Some("APPLE"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.first().map(|p| p.name.as_str()), Some("Green Apple"));
    }

    #[test]
    fn categories_are_deduplicated_in_order() {
        let products = vec![
            product("1", "Apple", "Fruits"),
            product("2", "Banana", "Fruits"),
            product("3", "Kale", "Vegetables"),
        ];
        assert_eq!(categories(&products), vec!["Fruits", "Vegetables"]);
    }
}
