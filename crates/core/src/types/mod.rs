//! Core types for the storefront.
//!
//! This module provides type-safe wrappers for the catalog and cart domain.

pub mod cart;
pub mod catalog;
pub mod id;
pub mod price;
pub mod product;

pub use cart::{Cart, CartError, CartLine, LineChange, LineKey, NewLine};
pub use catalog::Catalog;
pub use id::ProductId;
pub use price::{CurrencyCode, UnknownCurrency};
pub use product::{Product, Selection, UnknownVariation, Variation};
