//! Fresh Harvest Admin library.
//!
//! This crate provides the admin functionality as a library,
//! allowing it to be tested and reused.
//!
//! # Security
//!
//! This crate holds the remote store's service-role key and can read,
//! update, and delete any order or product row. Only deploy it on internal
//! infrastructure; the storefront never links against it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod mirror;
pub mod reconcile;
pub mod routes;
pub mod state;
pub mod supabase;
