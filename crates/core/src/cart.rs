//! Cart engine: ordered line items with derived totals.
//!
//! The cart is an ordered sequence of product snapshots with quantities.
//! Invariants: every quantity is positive and product ids are unique.
//! Everything here is pure, synchronous state manipulation - persisting the
//! cart and recomputing the badge after a mutation is the caller's job.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::types::ProductId;

/// Flat shipping surcharge added to every order total.
#[must_use]
pub fn shipping_surcharge() -> Decimal {
    Decimal::new(500, 2)
}

/// One cart line: a product snapshot plus quantity.
///
/// The product fields are copied at add time, so a later admin edit of the
/// product never changes what is already in a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub unit: String,
    pub image: String,
    pub quantity: u32,
}

impl CartLine {
    fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            category: product.category.clone(),
            unit: product.unit.clone(),
            image: product.image.clone(),
            quantity,
        }
    }

    /// price × quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Derived cart totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub grand_total: Decimal,
}

/// An ordered cart.
///
/// Serializes as a plain array of lines, which is the format the cart store
/// persists. Rehydration goes through the `From<Vec<CartLine>>` conversion,
/// which re-establishes the invariants against a possibly hand-edited
/// stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::default();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            if let Some(pos) = cart.lines.iter().position(|l| l.id == line.id) {
                if let Some(existing) = cart.lines.get_mut(pos) {
                    existing.quantity += line.quantity;
                }
            } else {
                cart.lines.push(line);
            }
        }
        cart
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `quantity` of `product`.
    ///
    /// Merges into the existing line when the product is already carted,
    /// otherwise appends a new snapshot line. Adding zero is a no-op.
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(pos) = self.lines.iter().position(|l| l.id == product.id) {
            if let Some(line) = self.lines.get_mut(pos) {
                line.quantity += quantity;
            }
        } else {
            self.lines.push(CartLine::from_product(product, quantity));
        }
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| &l.id != id);
        self.lines.len() != before
    }

    /// Apply a signed quantity delta to the line for `id`.
    ///
    /// A resulting quantity of zero or less removes the line entirely - the
    /// cart never retains a zero-quantity line. Unknown ids are a no-op.
    /// Returns whether the cart changed.
    pub fn change_quantity(&mut self, id: &ProductId, delta: i64) -> bool {
        let Some(pos) = self.lines.iter().position(|l| &l.id == id) else {
            return false;
        };
        let current = self.lines.get(pos).map_or(0, |l| l.quantity);
        let updated = i64::from(current) + delta;
        if updated <= 0 {
            self.lines.remove(pos);
        } else if let Some(line) = self.lines.get_mut(pos) {
            line.quantity = u32::try_from(updated).unwrap_or(u32::MAX);
        }
        true
    }

    /// Total unit count across all lines - the cart badge number.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Subtotal and grand total including the shipping surcharge.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        let subtotal: Decimal = self.lines.iter().map(CartLine::line_total).sum();
        let shipping = shipping_surcharge();
        CartTotals {
            subtotal,
            shipping,
            grand_total: subtotal + shipping,
        }
    }

    /// Empty the cart (after a successful order submission).
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price,
            category: "Vegetables".to_string(),
            unit: "1 kg".to_string(),
            image: format!("https://img.example/{id}.jpg"),
            created_at: None,
        }
    }

    #[test]
    fn add_merges_existing_line() {
        let mut cart = Cart::new();
        let p1 = product("p1", Decimal::new(12, 0));
        cart.add_item(&p1, 2);
        cart.add_item(&p1, 1);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.totals().subtotal, Decimal::new(36, 0));
    }

    #[test]
    fn add_zero_is_a_no_op() {
        let mut cart = Cart::new();
        cart.add_item(&product("p1", Decimal::ONE), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn negative_delta_to_zero_removes_the_line() {
        let mut cart = Cart::new();
        cart.add_item(&product("p2", Decimal::new(4, 0)), 1);

        assert!(cart.change_quantity(&ProductId::new("p2"), -1));
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn delta_on_unknown_id_is_a_no_op() {
        let mut cart = Cart::new();
        cart.add_item(&product("p1", Decimal::ONE), 1);
        assert!(!cart.change_quantity(&ProductId::new("ghost"), 2));
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn totals_include_the_shipping_surcharge() {
        let mut cart = Cart::new();
        cart.add_item(&product("p1", Decimal::new(12, 0)), 1);

        let totals = cart.totals();
        assert_eq!(totals.subtotal, Decimal::new(12, 0));
        assert_eq!(totals.shipping, shipping_surcharge());
        assert_eq!(totals.grand_total, Decimal::new(17, 0));
    }

    #[test]
    fn rehydration_sanitizes_stored_lines() {
        let p1 = product("p1", Decimal::new(3, 0));
        let mut zero = CartLine::from_product(&product("p9", Decimal::ONE), 1);
        zero.quantity = 0;
        let lines = vec![
            CartLine::from_product(&p1, 1),
            zero,
            CartLine::from_product(&p1, 2),
        ];

        let cart = Cart::from(lines);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn serde_round_trip_preserves_order() {
        let mut cart = Cart::new();
        cart.add_item(&product("b", Decimal::new(2, 0)), 1);
        cart.add_item(&product("a", Decimal::new(1, 0)), 4);

        let json = serde_json::to_string(&cart).expect("serialize");
        let back: Cart = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, cart);
        assert_eq!(
            back.lines().iter().map(|l| l.id.as_str()).collect::<Vec<_>>(),
            vec!["b", "a"]
        );
    }
}
