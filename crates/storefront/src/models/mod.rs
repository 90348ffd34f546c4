//! Domain models for storefront.
//!
//! Catalog and cart types live in `repuestos-core`; this module only holds
//! what is specific to the HTTP layer.

pub mod session;

pub use session::keys as session_keys;
