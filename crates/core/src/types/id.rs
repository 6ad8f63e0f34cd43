//! Newtype identifiers for remote-store entities.
//!
//! The remote store is loosely typed: product ids arrive as JSON strings or
//! JSON numbers depending on how the row was seeded. [`ProductId`] normalizes
//! both forms to a trimmed string at the deserialization boundary so every
//! internal comparison is exact equality. [`OrderId`] wraps the bigint the
//! remote store assigns on insert.

use serde::{Deserialize, Deserializer, Serialize};

/// Canonical product identifier.
///
/// Always a string internally. Numeric ids from the remote store are
/// stringified on the way in; ids read from form input are trimmed. Two
/// `ProductId`s are equal iff their normalized strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product id from any string-like value, trimming whitespace.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    /// The normalized string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Accept both wire forms the remote store produces.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Self::from(n),
            Raw::Text(s) => Self::new(s),
        })
    }
}

/// Order identifier, assigned by the remote store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i64);

impl OrderId {
    /// Create a new order id from an i64 value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<OrderId> for i64 {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_normalizes_numbers_and_strings() {
        let from_number: ProductId = serde_json::from_str("7").expect("number id");
        let from_string: ProductId = serde_json::from_str("\"7\"").expect("string id");
        assert_eq!(from_number, from_string);
        assert_eq!(from_number.as_str(), "7");
    }

    #[test]
    fn product_id_trims_form_input() {
        assert_eq!(ProductId::new(" p1 "), ProductId::new("p1"));
    }

    #[test]
    fn order_id_round_trips_as_bare_integer() {
        let id = OrderId::new(42);
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "42");
        let back: OrderId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}
