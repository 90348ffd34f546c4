//! Product card, product detail and purchase panel projections.

use askama::Template;
use askama_web::WebTemplate;
use repuestos_core::{Catalog, CurrencyCode, Product, ProductId, Selection};

/// One entry of the variation selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariationOption {
    pub name: String,
    pub selected: bool,
    pub available: bool,
}

/// Price, availability and add-to-cart controls for the current selection.
///
/// Rendered inside cards and the detail panel, and on its own when the
/// variation selector changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurchaseView {
    pub product_id: String,
    pub price: String,
    pub available: bool,
    pub availability_label: &'static str,
    pub availability_class: &'static str,
    /// Empty when the product has no variations (no selector is shown).
    pub options: Vec<VariationOption>,
}

/// Product grid card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub model: Option<String>,
    pub purchase: PurchaseView,
}

/// Product detail panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductDetailView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub model: Option<String>,
    pub purchase: PurchaseView,
}

/// Purchase panel fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/purchase.html")]
pub struct PurchaseTemplate {
    pub purchase: PurchaseView,
}

/// Label and CSS class for an availability flag.
const fn availability(available: bool) -> (&'static str, &'static str) {
    if available {
        ("Disponible", "in-stock")
    } else {
        ("Agotado", "out-of-stock")
    }
}

impl PurchaseView {
    fn project(
        id: &ProductId,
        product: &Product,
        selection: &Selection<'_>,
        currency: CurrencyCode,
    ) -> Self {
        let (availability_label, availability_class) = availability(selection.available);
        let options = product
            .variations
            .iter()
            .map(|variation| VariationOption {
                name: variation.name.clone(),
                selected: selection
                    .variation
                    .is_some_and(|selected| std::ptr::eq(selected, variation)),
                available: variation.available,
            })
            .collect();

        Self {
            product_id: id.to_string(),
            price: currency.format(selection.price),
            available: selection.available,
            availability_label,
            availability_class,
            options,
        }
    }
}

impl ProductCardView {
    fn project(id: &ProductId, product: &Product, currency: CurrencyCode) -> Self {
        let selection = product.select_or_default(None);
        Self {
            id: id.to_string(),
            name: product.name.clone(),
            image: product.image.clone(),
            model: product.model.clone(),
            purchase: PurchaseView::project(id, product, &selection, currency),
        }
    }
}

/// Cards for every product, in catalog order.
#[must_use]
pub fn product_cards(catalog: &Catalog, currency: CurrencyCode) -> Vec<ProductCardView> {
    catalog
        .iter()
        .map(|(id, product)| ProductCardView::project(id, product, currency))
        .collect()
}

/// Cards for the given IDs, in the given order.
///
/// IDs missing from the catalog produce no card.
#[must_use]
pub fn featured_cards<'a>(
    catalog: &Catalog,
    ids: impl IntoIterator<Item = &'a str>,
    currency: CurrencyCode,
) -> Vec<ProductCardView> {
    ids.into_iter()
        .filter_map(|id| catalog.get_key_value(id))
        .map(|(id, product)| ProductCardView::project(id, product, currency))
        .collect()
}

/// Detail panel for a product, with `variation` preselected when it exists.
///
/// Returns `None` when the product is not in the catalog; the page then hides
/// the panel.
#[must_use]
pub fn product_detail(
    catalog: &Catalog,
    id: &str,
    variation: Option<&str>,
    currency: CurrencyCode,
) -> Option<ProductDetailView> {
    let (id, product) = catalog.get_key_value(id)?;
    let selection = product.select_or_default(variation);

    Some(ProductDetailView {
        id: id.to_string(),
        name: product.name.clone(),
        description: product.description.clone(),
        image: product.image.clone(),
        model: product.model.clone(),
        purchase: PurchaseView::project(id, product, &selection, currency),
    })
}

/// Purchase panel for a product and selected variation.
#[must_use]
pub fn purchase(
    catalog: &Catalog,
    id: &str,
    variation: Option<&str>,
    currency: CurrencyCode,
) -> Option<PurchaseView> {
    let (id, product) = catalog.get_key_value(id)?;
    let selection = product.select_or_default(variation);
    Some(PurchaseView::project(id, product, &selection, currency))
}
