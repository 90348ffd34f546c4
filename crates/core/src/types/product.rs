//! Product and variation records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A product in the catalog.
///
/// Field names on the wire follow the catalog document (`img`, `available`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Display name.
    pub name: String,
    /// Base price in the store currency.
    pub price: Decimal,
    /// Whether the base product can be bought.
    pub available: bool,
    #[serde(default)]
    pub description: String,
    /// Image reference (URL or path under the static root).
    #[serde(rename = "img")]
    pub image: String,
    /// Vehicle model the part fits, shown as "Para: ...".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Priced/stocked options; the first one is the default selection.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<Variation>,
}

/// A priced/stocked option of a product (size, fitment, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    pub name: String,
    /// Overrides the product price when selected.
    pub price: Decimal,
    /// Overrides the product availability when selected.
    pub available: bool,
}

/// The variation named on a request does not exist on the product.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("product has no variation named {0:?}")]
pub struct UnknownVariation(pub String);

/// Effective price and availability for a product with an optional variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<'a> {
    pub variation: Option<&'a Variation>,
    pub price: Decimal,
    pub available: bool,
}

impl Selection<'_> {
    /// Name of the selected variation, if any.
    #[must_use]
    pub fn variation_name(&self) -> Option<&str> {
        self.variation.map(|v| v.name.as_str())
    }
}

impl Product {
    /// Whether the product exposes a variation selector.
    #[must_use]
    pub fn has_variations(&self) -> bool {
        !self.variations.is_empty()
    }

    /// The variation a selector starts on.
    #[must_use]
    pub fn default_variation(&self) -> Option<&Variation> {
        self.variations.first()
    }

    /// Look up a variation by name.
    ///
    /// Names are expected to be unique within a product; when they are not,
    /// the first declared match wins.
    #[must_use]
    pub fn variation(&self, name: &str) -> Option<&Variation> {
        self.variations.iter().find(|v| v.name == name)
    }

    /// Resolve what an add-to-cart for `variation` would capture.
    ///
    /// `None` selects the default variation when the product has any, and the
    /// base product otherwise.
    ///
    /// # Errors
    ///
    /// Returns `UnknownVariation` if a name is given that the product does not
    /// declare (including any name on a product without variations).
    pub fn select(&self, variation: Option<&str>) -> Result<Selection<'_>, UnknownVariation> {
        match variation {
            Some(name) => self
                .variation(name)
                .map(Self::selection_for)
                .ok_or_else(|| UnknownVariation(name.to_string())),
            None => Ok(self.default_selection()),
        }
    }

    /// Like [`Product::select`], but unknown names fall back to the default.
    ///
    /// Used for display, where a stale or hand-edited query string should not
    /// break the page.
    #[must_use]
    pub fn select_or_default(&self, variation: Option<&str>) -> Selection<'_> {
        self.select(variation)
            .unwrap_or_else(|_| self.default_selection())
    }

    fn default_selection(&self) -> Selection<'_> {
        self.default_variation().map_or(
            Selection {
                variation: None,
                price: self.price,
                available: self.available,
            },
            Self::selection_for,
        )
    }

    const fn selection_for(variation: &Variation) -> Selection<'_> {
        Selection {
            variation: Some(variation),
            price: variation.price,
            available: variation.available,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tire() -> Product {
        Product {
            name: "Neumático".to_string(),
            price: Decimal::from(30000),
            available: false,
            description: String::new(),
            image: "Imagen1.png".to_string(),
            model: None,
            variations: vec![
                Variation {
                    name: "175/65 R14".to_string(),
                    price: Decimal::from(42990),
                    available: true,
                },
                Variation {
                    name: "185/60 R15".to_string(),
                    price: Decimal::from(48990),
                    available: false,
                },
            ],
        }
    }

    #[test]
    fn test_default_selection_is_first_variation() {
        let product = tire();
        let selection = product.select(None).unwrap();
        assert_eq!(selection.variation_name(), Some("175/65 R14"));
        assert_eq!(selection.price, Decimal::from(42990));
        assert!(selection.available);
    }

    #[test]
    fn test_named_selection_overrides_price_and_availability() {
        let product = tire();
        let selection = product.select(Some("185/60 R15")).unwrap();
        assert_eq!(selection.price, Decimal::from(48990));
        assert!(!selection.available);
    }

    #[test]
    fn test_unknown_variation_is_rejected() {
        let product = tire();
        let err = product.select(Some("205/55 R16")).unwrap_err();
        assert_eq!(err, UnknownVariation("205/55 R16".to_string()));
    }

    #[test]
    fn test_select_or_default_falls_back() {
        let product = tire();
        let selection = product.select_or_default(Some("205/55 R16"));
        assert_eq!(selection.variation_name(), Some("175/65 R14"));
    }

    #[test]
    fn test_product_without_variations_uses_base_values() {
        let mut product = tire();
        product.variations.clear();

        let selection = product.select(None).unwrap();
        assert_eq!(selection.variation, None);
        assert_eq!(selection.price, Decimal::from(30000));
        assert!(!selection.available);
        assert!(product.select(Some("175/65 R14")).is_err());
    }

    #[test]
    fn test_duplicate_variation_names_first_match_wins() {
        let mut product = tire();
        product.variations.push(Variation {
            name: "175/65 R14".to_string(),
            price: Decimal::from(1),
            available: false,
        });

        let selection = product.select(Some("175/65 R14")).unwrap();
        assert_eq!(selection.price, Decimal::from(42990));
    }
}
