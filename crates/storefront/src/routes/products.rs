//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;
use crate::views::{self, ProductCardView, ProductDetailView, PurchaseTemplate};

/// Selected variation query parameter.
#[derive(Debug, Deserialize)]
pub struct VariationQuery {
    pub variation: Option<String>,
}

impl VariationQuery {
    fn variation(&self) -> Option<&str> {
        self.variation.as_deref().filter(|name| !name.is_empty())
    }
}

/// Legacy `product.html?id=...` style query.
#[derive(Debug, Deserialize)]
pub struct LegacyProductQuery {
    pub id: Option<String>,
    pub variation: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductCardView>,
}

/// Product detail page template.
///
/// `product` is `None` when the ID is not in the catalog; the detail panel is
/// then left out of the page.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: Option<ProductDetailView>,
}

/// Display product listing page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog().await;

    ProductsIndexTemplate {
        products: views::product_cards(catalog, state.currency()),
    }
}

/// Display product detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<VariationQuery>,
) -> Response {
    render_detail(&state, &id, query.variation()).await
}

/// Display product detail page addressed by query string.
#[instrument(skip(state))]
pub async fn show_by_query(
    State(state): State<AppState>,
    Query(query): Query<LegacyProductQuery>,
) -> Response {
    let id = query.id.as_deref().unwrap_or_default();
    let variation = query.variation.as_deref().filter(|name| !name.is_empty());
    render_detail(&state, id, variation).await
}

async fn render_detail(state: &AppState, id: &str, variation: Option<&str>) -> Response {
    let catalog = state.catalog().await;
    let product = views::product_detail(catalog, id, variation, state.currency());

    if product.is_none() {
        tracing::debug!(product_id = id, "Product not in catalog, hiding detail panel");
        return (StatusCode::NOT_FOUND, ProductShowTemplate { product }).into_response();
    }

    ProductShowTemplate { product }.into_response()
}

/// Purchase panel for a selected variation (HTMX).
///
/// Swapped in place when the variation selector changes so price,
/// availability and the add-to-cart button follow the selection.
#[instrument(skip(state))]
pub async fn purchase(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<VariationQuery>,
) -> Result<PurchaseTemplate> {
    let catalog = state.catalog().await;

    views::purchase(catalog, &id, query.variation(), state.currency())
        .map(|purchase| PurchaseTemplate { purchase })
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use repuestos_core::{Catalog, CurrencyCode};

    use super::*;

    const DOCUMENT: &str = r#"{
        "amortiguador": {
            "name": "Amortiguador", "price": 10000, "available": true,
            "img": "/static/images/repuesto.svg", "model": "Chevrolet Onix 2021",
            "variations": [
                { "name": "Delantero", "price": 10000, "available": true },
                { "name": "Trasero", "price": 9500, "available": true }
            ]
        }
    }"#;

    fn catalog() -> Catalog {
        Catalog::from_json(DOCUMENT).unwrap()
    }

    #[test]
    fn test_listing_page_renders_cards_with_purchase_panel() {
        let html = ProductsIndexTemplate {
            products: views::product_cards(&catalog(), CurrencyCode::CLP),
        }
        .render()
        .unwrap();

        assert!(html.contains(r#"data-id="amortiguador""#));
        assert!(html.contains(r#"id="purchase-amortiguador""#));
        assert!(html.contains("Para: Chevrolet Onix 2021"));
    }

    #[test]
    fn test_detail_page_renders_panel_and_description() {
        let product =
            views::product_detail(&catalog(), "amortiguador", Some("Trasero"), CurrencyCode::CLP);
        let html = ProductShowTemplate { product }.render().unwrap();

        assert!(html.contains(r#"class="product-detail""#));
        assert!(html.contains("$9.500"));
        assert!(html.contains(r#"<option value="Trasero" selected>"#));
    }

    #[test]
    fn test_detail_page_without_product_omits_panel() {
        let html = ProductShowTemplate { product: None }.render().unwrap();

        assert!(!html.contains("product-detail"));
        assert!(html.contains("product-missing"));
    }
}
