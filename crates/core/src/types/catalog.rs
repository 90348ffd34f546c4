//! The product catalog: a static mapping from product ID to product record.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::Product;

/// Static mapping of product identifier to product record.
///
/// Keeps document order so the product grid lists products the way the
/// catalog file declares them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: IndexMap<ProductId, Product>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog document.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the document is not an object of product
    /// records.
    pub fn from_json(document: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(document)
    }

    /// Look up a product.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.get(id)
    }

    /// Look up a product together with its stored key.
    #[must_use]
    pub fn get_key_value(&self, id: &str) -> Option<(&ProductId, &Product)> {
        self.products.get_key_value(id)
    }

    /// Products in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, &Product)> {
        self.products.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    const DOCUMENT: &str = r#"{
        "filtro-aceite": {
            "name": "Filtro de aceite",
            "price": 19990,
            "available": true,
            "description": "Filtro de aceite",
            "img": "Imagen1.png",
            "model": "Peugeot 2019"
        },
        "amortiguador": {
            "name": "Amortiguador",
            "price": 10000,
            "available": true,
            "img": "Imagen1.png",
            "variations": [
                { "name": "Delantero", "price": 10000, "available": true },
                { "name": "Trasero", "price": 9500, "available": false }
            ]
        }
    }"#;

    #[test]
    fn test_parse_document() {
        let catalog = Catalog::from_json(DOCUMENT).unwrap();
        assert_eq!(catalog.len(), 2);

        let filter = catalog.get("filtro-aceite").unwrap();
        assert_eq!(filter.price, Decimal::from(19990));
        assert_eq!(filter.model.as_deref(), Some("Peugeot 2019"));
        assert!(filter.variations.is_empty());

        let shock = catalog.get("amortiguador").unwrap();
        assert_eq!(shock.description, "");
        assert_eq!(shock.variations.len(), 2);
    }

    #[test]
    fn test_iteration_keeps_document_order() {
        let catalog = Catalog::from_json(DOCUMENT).unwrap();
        let ids: Vec<&str> = catalog.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["filtro-aceite", "amortiguador"]);
    }

    #[test]
    fn test_missing_product_is_absent() {
        let catalog = Catalog::from_json(DOCUMENT).unwrap();
        assert!(catalog.get("bujia").is_none());
        assert!(Catalog::new().get("filtro-aceite").is_none());
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(Catalog::from_json("[1, 2, 3]").is_err());
        assert!(Catalog::from_json(r#"{"x": {"name": "no price"}}"#).is_err());
    }
}
