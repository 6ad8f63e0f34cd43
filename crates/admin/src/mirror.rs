//! Local mirror of remote order rows and derived statistics.
//!
//! The admin panel keeps an in-memory copy of the order table, refreshed by
//! full reload at view entry and patched after successful remote mutations.
//! Everything here is pure state manipulation; the remote calls and the
//! reload-on-failure policy live in [`crate::reconcile`].

use rust_decimal::Decimal;

use fresh_harvest_core::order::Order;
use fresh_harvest_core::types::{OrderId, OrderStatus};

/// Aggregate statistics over the full (unfiltered) mirror.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderStats {
    /// Total number of mirrored orders.
    pub total_orders: usize,
    /// Revenue across all orders except cancelled ones.
    pub total_revenue: Decimal,
    /// Number of orders still pending.
    pub pending_orders: usize,
}

/// Compute order statistics. Revenue excludes cancelled orders.
#[must_use]
pub fn compute_stats(orders: &[Order]) -> OrderStats {
    OrderStats {
        total_orders: orders.len(),
        total_revenue: orders
            .iter()
            .filter(|o| o.status != OrderStatus::Cancelled)
            .map(|o| o.total_amount)
            .sum(),
        pending_orders: orders
            .iter()
            .filter(|o| o.status == OrderStatus::Pending)
            .count(),
    }
}

/// The mirrored order list plus its statistics.
///
/// Statistics are recomputed on every mutation that changes order count or
/// status, so they are always consistent with the mirrored rows.
#[derive(Debug, Default)]
pub struct OrderMirror {
    orders: Vec<Order>,
    stats: OrderStats,
}

impl OrderMirror {
    /// Replace the whole mirror with freshly loaded rows (full reload).
    pub fn replace(&mut self, orders: Vec<Order>) {
        self.orders = orders;
        self.stats = compute_stats(&self.orders);
    }

    /// The mirrored orders in load order (newest first after a reload).
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub fn stats(&self) -> &OrderStats {
        &self.stats
    }

    /// Current status of a mirrored order.
    #[must_use]
    pub fn status_of(&self, id: OrderId) -> Option<OrderStatus> {
        self.orders.iter().find(|o| o.id == id).map(|o| o.status)
    }

    /// Patch the status of a single mirrored order after a successful
    /// remote update. Returns false when the id is not mirrored.
    pub fn patch_status(&mut self, id: OrderId, status: OrderStatus) -> bool {
        let Some(order) = self.orders.iter_mut().find(|o| o.id == id) else {
            return false;
        };
        order.status = status;
        self.stats = compute_stats(&self.orders);
        true
    }

    /// Remove a mirrored order after a successful remote delete.
    /// Returns false when the id is not mirrored.
    pub fn remove(&mut self, id: OrderId) -> bool {
        let before = self.orders.len();
        self.orders.retain(|o| o.id != id);
        let removed = self.orders.len() != before;
        if removed {
            self.stats = compute_stats(&self.orders);
        }
        removed
    }

    /// Case-insensitive substring search over customer name, phone, and
    /// order id as text.
    ///
    /// Filters the loaded mirror only - no remote call, and the statistics
    /// keep reflecting the full mirror.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Order> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return self.orders.iter().collect();
        }
        self.orders
            .iter()
            .filter(|o| {
                o.customer_name.to_lowercase().contains(&term)
                    || o.phone.contains(&term)
                    || o.id.to_string().contains(&term)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use fresh_harvest_core::order::OrderItem;
    use fresh_harvest_core::types::ProductId;

    fn order(id: i64, name: &str, phone: &str, total: i64, status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(id),
            customer_name: name.to_string(),
            address: "123 Green Street".to_string(),
            phone: phone.to_string(),
            note: None,
            total_amount: Decimal::new(total, 0),
            items: vec![OrderItem {
                id: ProductId::new("p1"),
                name: "Apples".to_string(),
                price: Decimal::new(total, 0),
                quantity: 1,
            }],
            status,
            created_at: Utc.timestamp_opt(1_700_000_000 + id, 0).single().expect("ts"),
        }
    }

    fn loaded() -> OrderMirror {
        let mut mirror = OrderMirror::default();
        mirror.replace(vec![
            order(1, "John Doe", "0170", 17, OrderStatus::Pending),
            order(2, "Jane Roe", "0180", 20, OrderStatus::Shipped),
            order(3, "Max Power", "0190", 50, OrderStatus::Cancelled),
        ]);
        mirror
    }

    #[test]
    fn stats_exclude_cancelled_revenue() {
        let mirror = loaded();
        let stats = mirror.stats();
        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.total_revenue, Decimal::new(37, 0));
        assert_eq!(stats.pending_orders, 1);
    }

    #[test]
    fn patch_status_updates_one_row_and_the_stats() {
        let mut mirror = loaded();
        assert!(mirror.patch_status(OrderId::new(1), OrderStatus::Shipped));
        assert_eq!(mirror.status_of(OrderId::new(1)), Some(OrderStatus::Shipped));
        assert_eq!(mirror.stats().pending_orders, 0);
        // Other rows untouched
        assert_eq!(mirror.status_of(OrderId::new(2)), Some(OrderStatus::Shipped));
    }

    #[test]
    fn patch_status_on_unknown_id_is_a_no_op() {
        let mut mirror = loaded();
        assert!(!mirror.patch_status(OrderId::new(99), OrderStatus::Shipped));
        assert_eq!(mirror.stats().total_orders, 3);
    }

    #[test]
    fn remove_drops_the_row_and_recomputes() {
        let mut mirror = loaded();
        assert!(mirror.remove(OrderId::new(2)));
        assert_eq!(mirror.stats().total_orders, 2);
        assert_eq!(mirror.stats().total_revenue, Decimal::new(17, 0));
        assert!(!mirror.remove(OrderId::new(2)));
    }

    #[test]
    fn search_matches_name_phone_and_id_without_touching_stats() {
        let mirror = loaded();

        let by_name = mirror.search("doe");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name.first().map(|o| o.id), Some(OrderId::new(1)));

        assert_eq!(mirror.search("018").len(), 1);
        assert_eq!(mirror.search("3").len(), 1);
        assert_eq!(mirror.search("   ").len(), 3);

        // Search never changes the aggregates
        assert_eq!(mirror.stats().total_orders, 3);
    }
}
