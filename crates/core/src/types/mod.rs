//! Core types for Fresh Harvest.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod status;

pub use id::{OrderId, ProductId};
pub use price::format_usd;
pub use status::OrderStatus;
