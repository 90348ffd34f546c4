//! Repuestos Core - Catalog and cart types.
//!
//! This crate provides the domain types shared by the storefront binary and
//! its integration tests:
//! - catalog records (products, variations, the catalog mapping)
//! - the cart state machine (line identity, quantity rules, persistence format)
//! - price formatting per currency
//!
//! # Architecture
//!
//! The core crate contains only types and pure transforms - no I/O, no HTTP,
//! no session access. Cart mutations can therefore be tested without a
//! browser or a server.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, prices, catalog records and the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
