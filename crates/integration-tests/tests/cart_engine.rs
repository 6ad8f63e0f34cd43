//! Cart engine behavior across arbitrary operation sequences.
//!
//! These tests pin the invariants the storefront relies on: no line ever
//! has a non-positive quantity, product ids stay unique, and the derived
//! numbers always match the lines.

use rust_decimal::Decimal;

use fresh_harvest_core::cart::{Cart, shipping_surcharge};
use fresh_harvest_core::product::Product;
use fresh_harvest_core::types::ProductId;

fn product(id: &str, price: Decimal) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        price,
        category: "Fruits".to_string(),
        unit: "1 kg".to_string(),
        image: format!("https://img.example/{id}.jpg"),
        created_at: None,
    }
}

/// Invariant check used after every mutation in these tests.
fn assert_invariants(cart: &Cart) {
    for line in cart.lines() {
        assert!(line.quantity > 0, "line with non-positive quantity");
    }
    let mut ids: Vec<_> = cart.lines().iter().map(|l| l.id.clone()).collect();
    ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    ids.dedup();
    assert_eq!(ids.len(), cart.lines().len(), "duplicate product id");

    let quantity_sum: u32 = cart.lines().iter().map(|l| l.quantity).sum();
    assert_eq!(cart.item_count(), quantity_sum);

    let subtotal: Decimal = cart
        .lines()
        .iter()
        .map(|l| l.price * Decimal::from(l.quantity))
        .sum();
    let totals = cart.totals();
    assert_eq!(totals.subtotal, subtotal);
    assert_eq!(totals.grand_total, subtotal + shipping_surcharge());
}

#[test]
fn mixed_operation_sequence_upholds_invariants() {
    let p1 = product("p1", Decimal::new(12, 0));
    let p2 = product("p2", Decimal::new(4, 0));
    let mut cart = Cart::new();

    cart.add_item(&p1, 2);
    assert_invariants(&cart);

    cart.add_item(&p2, 1);
    assert_invariants(&cart);

    cart.add_item(&p1, 1);
    assert_invariants(&cart);
    assert_eq!(cart.lines().len(), 2);
    assert_eq!(cart.totals().subtotal, Decimal::new(40, 0));

    cart.change_quantity(&ProductId::new("p2"), -1);
    assert_invariants(&cart);
    assert_eq!(cart.lines().len(), 1);

    cart.change_quantity(&ProductId::new("p1"), -10);
    assert_invariants(&cart);
    assert!(cart.is_empty());

    // Mutations on the now-empty cart stay no-ops
    assert!(!cart.remove_item(&ProductId::new("p1")));
    assert!(!cart.change_quantity(&ProductId::new("p1"), 1));
    assert_invariants(&cart);
}

#[test]
fn adding_the_same_product_merges_lines() {
    // cart = [{id:"p1", price:12, qty:2}], add p1 qty 1 -> qty 3, subtotal 36
    let p1 = product("p1", Decimal::new(12, 0));
    let mut cart = Cart::new();
    cart.add_item(&p1, 2);
    cart.add_item(&p1, 1);

    assert_eq!(cart.lines().first().map(|l| l.quantity), Some(3));
    assert_eq!(cart.totals().subtotal, Decimal::new(36, 0));
}

#[test]
fn decrementing_the_last_unit_empties_the_cart() {
    // cart = [{id:"p2", price:4, qty:1}], change -1 -> cart empty
    let p2 = product("p2", Decimal::new(4, 0));
    let mut cart = Cart::new();
    cart.add_item(&p2, 1);

    assert!(cart.change_quantity(&ProductId::new("p2"), -1));
    assert!(cart.is_empty());
    assert_eq!(cart.item_count(), 0);
}

#[test]
fn persisted_round_trip_is_identity() {
    let mut cart = Cart::new();
    cart.add_item(&product("pear", Decimal::new(199, 2)), 2);
    cart.add_item(&product("kale", Decimal::new(250, 2)), 1);

    // The cart store serializes the cart as JSON into the session row
    let stored = serde_json::to_string(&cart).expect("serialize");
    let reloaded: Cart = serde_json::from_str(&stored).expect("deserialize");

    assert_eq!(reloaded, cart);
    assert_eq!(
        reloaded
            .lines()
            .iter()
            .map(|l| l.id.as_str())
            .collect::<Vec<_>>(),
        vec!["pear", "kale"],
        "insertion order survives the round trip"
    );
}

#[test]
fn numeric_and_string_ids_from_the_wire_collide_correctly() {
    // A remote row with a numeric id and a form submission with the same id
    // as a string must address the same line.
    let raw = r#"{
        "id": 7,
        "name": "Numeric Apple",
        "price": 3.5,
        "category": "Fruits",
        "unit": "1 kg",
        "image": ""
    }"#;
    let remote: Product = serde_json::from_str(raw).expect("product");

    let mut cart = Cart::new();
    cart.add_item(&remote, 1);
    assert!(cart.change_quantity(&ProductId::new("7"), 2));
    assert_eq!(cart.item_count(), 3);
}
