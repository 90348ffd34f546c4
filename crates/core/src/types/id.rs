//! Newtype ID for type-safe catalog references.
//!
//! Catalog keys are short slugs such as `"filtro-aceite"`. Wrapping them keeps
//! product identifiers from being mixed up with display names or variation
//! names, which are plain strings too.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a product in the catalog.
///
/// Serialized transparently as its string value, so persisted carts and
/// catalog documents stay plain JSON.
///
/// # Example
///
/// ```rust
/// # use repuestos_core::ProductId;
/// let id = ProductId::new("bujia");
/// assert_eq!(id.as_str(), "bujia");
/// assert_eq!(id.to_string(), "bujia");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from a slug.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying slug.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

// Lets keyed collections be queried with `&str`.
impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
