//! Session-related types.
//!
//! The session stands in for the browser's local storage: one value per key,
//! scoped to the visitor's cookie.

/// Session keys for storefront data.
pub mod keys {
    /// Key for the serialized cart (a JSON array of cart lines stored as text).
    pub const CART: &str = "cart";
}
