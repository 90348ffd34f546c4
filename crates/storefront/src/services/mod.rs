//! Business logic services for storefront.
//!
//! # Services
//!
//! - `catalog` - One-time catalog loading from the inline document, a file or a URL
//! - `cart` - Session-backed cart store (load, save, index-addressed mutations)

pub mod cart;
pub mod catalog;

pub use cart::CartStore;
pub use catalog::{CatalogError, CatalogSource};
