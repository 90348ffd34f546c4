//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::state::AppState;
use crate::views::{ProductCardView, featured_cards};

/// Products shown on the home page, in display order.
///
/// IDs missing from the loaded catalog are skipped.
const FEATURED_PRODUCTS: [&str; 5] = [
    "filtro-aceite",
    "otro-producto",
    "neumatico",
    "amortiguador",
    "bujia",
];

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductCardView>,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog().await;

    HomeTemplate {
        products: featured_cards(catalog, FEATURED_PRODUCTS, state.currency()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use repuestos_core::{Catalog, CurrencyCode};

    use super::*;

    #[test]
    fn test_home_renders_featured_cards() {
        let catalog = Catalog::from_json(
            r#"{ "bujia": { "name": "Bujía", "price": 3990, "available": true, "img": "/x.svg" } }"#,
        )
        .unwrap();
        let html = HomeTemplate {
            products: featured_cards(&catalog, FEATURED_PRODUCTS, CurrencyCode::CLP),
        }
        .render()
        .unwrap();

        assert!(html.contains(r#"data-id="bujia""#));
        assert!(html.contains("$3.990"));
        assert!(html.contains("add-to-cart"));
    }
}
