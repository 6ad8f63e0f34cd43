//! Order submission payload construction.

use rust_decimal::Decimal;

use fresh_harvest_core::cart::Cart;
use fresh_harvest_core::order::{CheckoutError, CustomerDetails, NewOrder};
use fresh_harvest_core::product::Product;
use fresh_harvest_core::types::{OrderStatus, ProductId};

fn product(id: &str, price: Decimal) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        price,
        category: "Fruits".to_string(),
        unit: "1 kg".to_string(),
        image: String::new(),
        created_at: None,
    }
}

#[test]
fn single_item_order_carries_shipping_and_pending_status() {
    // cart [{id:"p1", price:12, qty:1}], shipping 5 -> total 17, pending
    let mut cart = Cart::new();
    cart.add_item(&product("p1", Decimal::new(12, 0)), 1);

    let details =
        CustomerDetails::new("John Doe", "123 Green Street", "01700000000", None).expect("details");
    let order = NewOrder::from_cart(&cart, details).expect("order");

    assert_eq!(order.total_amount, Decimal::new(17, 0));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items.first().map(|i| i.quantity), Some(1));
}

#[test]
fn snapshot_survives_cart_mutation_and_clearing() {
    let p1 = product("p1", Decimal::new(12, 0));
    let mut cart = Cart::new();
    cart.add_item(&p1, 2);

    let details = CustomerDetails::new("Jane", "Street 1", "123", Some("ring twice"))
        .expect("details");
    let order = NewOrder::from_cart(&cart, details).expect("order");

    // Simulate the post-submission flow: cart cleared, user keeps shopping
    cart.clear();
    cart.add_item(&p1, 9);

    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items.first().map(|i| i.quantity), Some(2));
    assert_eq!(order.note.as_deref(), Some("ring twice"));
}

#[test]
fn validation_rejects_before_any_submission() {
    let mut cart = Cart::new();
    cart.add_item(&product("p1", Decimal::ONE), 1);

    let err = CustomerDetails::new("", "addr", "123", None).expect_err("empty name");
    assert_eq!(err, CheckoutError::MissingField("name"));

    let details = CustomerDetails::new("a", "b", "c", None).expect("details");
    let err = NewOrder::from_cart(&Cart::new(), details).expect_err("empty cart");
    assert_eq!(err, CheckoutError::EmptyCart);
}

#[test]
fn payload_serializes_in_the_orders_table_shape() {
    let mut cart = Cart::new();
    cart.add_item(&product("p1", Decimal::new(250, 2)), 2);

    let details = CustomerDetails::new("John Doe", "123 Green Street", "0170", None)
        .expect("details");
    let order = NewOrder::from_cart(&cart, details).expect("order");
    let value = serde_json::to_value(&order).expect("serialize");

    assert_eq!(value["customer_name"], "John Doe");
    assert_eq!(value["status"], "pending");
    assert!(value.get("note").is_none(), "absent note is omitted");
    let items = value["items"].as_array().expect("items array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "p1");
    assert_eq!(items[0]["quantity"], 2);
}
