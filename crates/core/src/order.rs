//! Order records, item snapshots, and checkout validation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{Cart, CartLine};
use crate::types::{OrderId, OrderStatus, ProductId};

/// One entry of an order's item snapshot.
///
/// The snapshot is immutable once the order is created; only the order's
/// status may change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.clone(),
            name: line.name.clone(),
            price: line.price,
            quantity: line.quantity,
        }
    }
}

/// Errors rejected before any remote call is attempted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// A required customer field was empty.
    #[error("please fill in your {0}")]
    MissingField(&'static str),

    /// The cart has no lines.
    #[error("cannot place an order with an empty cart")]
    EmptyCart,
}

/// Validated customer checkout fields.
///
/// Name, address, and phone must be non-empty after trimming. The note is
/// optional; a blank note is stored as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    customer_name: String,
    address: String,
    phone: String,
    note: Option<String>,
}

impl CustomerDetails {
    /// Validate raw form input into customer details.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingField`] naming the first empty
    /// required field.
    pub fn new(
        name: &str,
        address: &str,
        phone: &str,
        note: Option<&str>,
    ) -> Result<Self, CheckoutError> {
        Ok(Self {
            customer_name: require(name, "name")?,
            address: require(address, "address")?,
            phone: require(phone, "phone")?,
            note: note
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(String::from),
        })
    }

    #[must_use]
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }
}

fn require(value: &str, field: &'static str) -> Result<String, CheckoutError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CheckoutError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// Insert payload for the remote `orders` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    pub customer_name: String,
    pub address: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub total_amount: Decimal,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
}

impl NewOrder {
    /// Build a pending order from the current cart.
    ///
    /// The item list is a deep copy of the cart lines, so mutating the cart
    /// afterwards does not affect the payload. The total is the cart grand
    /// total (subtotal plus the shipping surcharge).
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] when the cart has no lines.
    pub fn from_cart(cart: &Cart, details: CustomerDetails) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let totals = cart.totals();
        Ok(Self {
            customer_name: details.customer_name,
            address: details.address,
            phone: details.phone,
            note: details.note,
            total_amount: totals.grand_total,
            items: cart.lines().iter().map(OrderItem::from).collect(),
            status: OrderStatus::Pending,
        })
    }
}

/// An order row read back from the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub note: Option<String>,
    pub total_amount: Decimal,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Product;

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

    fn details() -> CustomerDetails {
        CustomerDetails::new("John Doe", "123 Green Street", "01700000000", None)
            .expect("valid details")
    }

    #[test]
    fn required_fields_must_be_non_blank() {
        let err = CustomerDetails::new("  ", "addr", "123", None).expect_err("blank name");
        assert_eq!(err, CheckoutError::MissingField("name"));

        let err = CustomerDetails::new("a", "addr", "  ", None).expect_err("blank phone");
        assert_eq!(err, CheckoutError::MissingField("phone"));
    }

    #[test]
    fn blank_note_is_stored_as_absent() {
        let details =
            CustomerDetails::new("a", "b", "c", Some("   ")).expect("valid details");
        let mut cart = Cart::new();
        cart.add_item(&product("p1", Decimal::ONE), 1);
        let order = NewOrder::from_cart(&cart, details).expect("order");
        assert_eq!(order.note, None);
    }

    #[test]
    fn empty_cart_is_rejected() {
        let err = NewOrder::from_cart(&Cart::new(), details()).expect_err("empty cart");
        assert_eq!(err, CheckoutError::EmptyCart);
    }

    #[test]
    fn total_is_subtotal_plus_shipping_and_status_is_pending() {
        let mut cart = Cart::new();
        cart.add_item(&product("p1", Decimal::new(12, 0)), 1);

        let order = NewOrder::from_cart(&cart, details()).expect("order");
        assert_eq!(order.total_amount, Decimal::new(17, 0));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items.len(), 1);
    }

    #[test]
    fn snapshot_is_independent_of_later_cart_mutation() {
        let p1 = product("p1", Decimal::new(12, 0));
        let mut cart = Cart::new();
        cart.add_item(&p1, 2);

        let order = NewOrder::from_cart(&cart, details()).expect("order");
        cart.add_item(&p1, 5);
        cart.clear();

        assert_eq!(order.items.first().map(|i| i.quantity), Some(2));
    }
}
