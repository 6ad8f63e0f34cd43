//! Admin order mirror behavior: statistics, search, patches, and the
//! status transition policy.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use fresh_harvest_admin::mirror::{OrderMirror, compute_stats};
use fresh_harvest_core::order::{Order, OrderItem};
use fresh_harvest_core::types::{OrderId, OrderStatus, ProductId};

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
        created_at: Utc
            .timestamp_opt(1_700_000_000 + id, 0)
            .single()
            .expect("timestamp"),
    }
}

#[test]
fn statistics_follow_every_mutation() {
    let mut mirror = OrderMirror::default();
    mirror.replace(vec![
        order(1, "John Doe", "0170", 17, OrderStatus::Pending),
        order(2, "Jane Roe", "0180", 20, OrderStatus::Pending),
    ]);
    assert_eq!(mirror.stats().pending_orders, 2);
    assert_eq!(mirror.stats().total_revenue, Decimal::new(37, 0));

    // Cancelling removes the order's revenue but not the order
    mirror.patch_status(OrderId::new(2), OrderStatus::Cancelled);
    assert_eq!(mirror.stats().total_orders, 2);
    assert_eq!(mirror.stats().total_revenue, Decimal::new(17, 0));
    assert_eq!(mirror.stats().pending_orders, 1);

    // Deleting removes both
    mirror.remove(OrderId::new(1));
    assert_eq!(mirror.stats().total_orders, 1);
    assert_eq!(mirror.stats().total_revenue, Decimal::ZERO);
}

#[test]
fn failed_update_simulation_reload_reflects_the_remote_truth() {
    // The reconciler's failure path is: discard the mirror, reload from the
    // store. Model it here: the optimistic patch never happened, so after
    // the reload order 7 still holds its remote status.
    let remote_rows = vec![order(7, "John Doe", "0170", 17, OrderStatus::Pending)];

    let mut mirror = OrderMirror::default();
    mirror.replace(remote_rows.clone());

    // Remote PATCH failed -> no local patch; full reload instead
    mirror.replace(remote_rows);

    assert_eq!(mirror.status_of(OrderId::new(7)), Some(OrderStatus::Pending));
    assert_eq!(mirror.stats().pending_orders, 1);
}

#[test]
fn search_by_partial_name_is_case_insensitive() {
    let mut mirror = OrderMirror::default();
    mirror.replace(vec![
        order(1, "John Doe", "0170", 17, OrderStatus::Pending),
        order(2, "Ada Lovelace", "0180", 99, OrderStatus::Shipped),
    ]);

    let hits = mirror.search("doe");
    assert_eq!(hits.len(), 1);
    assert_eq!(
        hits.first().map(|o| o.customer_name.as_str()),
        Some("John Doe")
    );

    // Aggregates keep reflecting the unfiltered mirror
    assert_eq!(mirror.stats().total_orders, 2);
    assert_eq!(mirror.stats().total_revenue, Decimal::new(116, 0));
}

#[test]
fn transition_policy_is_forward_only_with_cancellation() {
    use fresh_harvest_core::types::OrderStatus::{Cancelled, Delivered, Pending, Shipped};

    let allowed = [
        (Pending, Shipped),
        (Pending, Delivered),
        (Pending, Cancelled),
        (Shipped, Delivered),
        (Shipped, Cancelled),
    ];
    for (from, to) in allowed {
        assert!(from.can_transition_to(to), "{from} -> {to} should be allowed");
    }

    let forbidden = [
        (Shipped, Pending),
        (Delivered, Pending),
        (Delivered, Shipped),
        (Delivered, Cancelled),
        (Cancelled, Pending),
        (Cancelled, Delivered),
    ];
    for (from, to) in forbidden {
        assert!(!from.can_transition_to(to), "{from} -> {to} must be rejected");
    }
}

#[test]
fn stats_of_an_empty_mirror_are_zero() {
    let stats = compute_stats(&[]);
    assert_eq!(stats.total_orders, 0);
    assert_eq!(stats.total_revenue, Decimal::ZERO);
    assert_eq!(stats.pending_orders, 0);
}
