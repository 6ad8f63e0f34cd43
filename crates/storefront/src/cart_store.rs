//! Persistent cart store backed by the session.
//!
//! The cart is serialized under a fixed session key as a plain array of
//! lines and survives page reloads for the lifetime of the session cookie.
//! Writes happen synchronously after every cart mutation, so the persisted
//! form is never stale relative to what the handler just computed.

use tower_sessions::Session;

use fresh_harvest_core::cart::Cart;

use crate::models::session::keys;

/// Load the cart, or an empty cart when none is stored.
///
/// Rehydration goes through the cart's sanitizing constructor, so a
/// corrupted stored value cannot violate the cart invariants.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn load(session: &Session) -> Result<Cart, tower_sessions::session::Error> {
    Ok(session.get::<Cart>(keys::CART).await?.unwrap_or_default())
}

/// Persist the cart.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART, cart).await
}

/// Drop the stored cart (after a successful order submission).
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn clear(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<Cart>(keys::CART).await.map(|_| ())
}
