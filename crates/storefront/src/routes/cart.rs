//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Each mutation saves the cart to the session and answers with the fragment
//! for the surface that issued it, plus an `HX-Trigger: cart-updated` event
//! that makes every other mounted surface (badge, dropdown, cart page list)
//! re-fetch itself in the same interaction.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use repuestos_core::{Cart, NewLine};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::services::CartStore;
use crate::state::AppState;
use crate::views::{
    BadgeView, CartCountTemplate, CartDropdownTemplate, CartItemsTemplate, CartView,
};

/// Event name other cart surfaces listen for.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    /// Selected variation; absent or empty means the default selection.
    pub variation: Option<String>,
}

/// Which rendered surface issued a line mutation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartSurface {
    #[default]
    Dropdown,
    Page,
}

/// Index-addressed line mutation form data.
#[derive(Debug, Deserialize)]
pub struct LineForm {
    pub index: usize,
    #[serde(default)]
    pub view: CartSurface,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Display cart page.
#[instrument(skip(state, store))]
pub async fn show(State(state): State<AppState>, store: CartStore) -> Result<CartShowTemplate> {
    let cart = store.load().await?;

    Ok(CartShowTemplate {
        cart: CartView::project(&cart, state.currency()),
    })
}

/// Cart page list fragment (HTMX).
#[instrument(skip(state, store))]
pub async fn items(State(state): State<AppState>, store: CartStore) -> Result<CartItemsTemplate> {
    let cart = store.load().await?;

    Ok(CartItemsTemplate {
        cart: CartView::project(&cart, state.currency()),
    })
}

/// Cart dropdown fragment (HTMX).
#[instrument(skip(state, store))]
pub async fn dropdown(
    State(state): State<AppState>,
    store: CartStore,
) -> Result<CartDropdownTemplate> {
    let cart = store.load().await?;

    Ok(CartDropdownTemplate {
        cart: CartView::project(&cart, state.currency()),
    })
}

/// Cart count badge fragment (HTMX).
#[instrument(skip(store))]
pub async fn count(store: CartStore) -> Result<CartCountTemplate> {
    let cart = store.load().await?;

    Ok(CartCountTemplate {
        badge: BadgeView::project(&cart),
    })
}

/// Add one unit of a product to the cart (HTMX).
///
/// Captures the price and name of the selected variation (or the default
/// one). Returns the updated badge along with `cart-updated` and `toast`
/// events.
#[instrument(skip(state, store))]
pub async fn add(
    State(state): State<AppState>,
    store: CartStore,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let catalog = state.catalog().await;
    let (id, product) = catalog
        .get_key_value(&form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let selection = product.select(form.variation.as_deref().filter(|v| !v.is_empty()))?;
    if !selection.available {
        return Err(AppError::BadRequest(format!(
            "{} is out of stock",
            selection.variation_name().unwrap_or(product.name.as_str())
        )));
    }

    let cart = store
        .add_line(NewLine::from_selection(id, product, &selection))
        .await?;

    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", id.as_str())]));

    let message = selection.variation_name().map_or_else(
        || format!("{} añadido al carrito", product.name),
        |variation| format!("{} ({variation}) añadido al carrito", product.name),
    );
    let trigger = json!({ CART_UPDATED_EVENT: null, "toast": { "message": message } });

    Ok((
        AppendHeaders([("HX-Trigger", ascii_json(&trigger))]),
        CartCountTemplate {
            badge: BadgeView::project(&cart),
        },
    )
        .into_response())
}

/// Add one unit to a line (HTMX).
#[instrument(skip(state, store))]
pub async fn increment(
    State(state): State<AppState>,
    store: CartStore,
    Form(form): Form<LineForm>,
) -> Result<Response> {
    let cart = store.increment_line(form.index).await?;
    Ok(surface_response(&state, &cart, form.view))
}

/// Take one unit off a line, removing it at quantity 1 (HTMX).
#[instrument(skip(state, store))]
pub async fn decrement(
    State(state): State<AppState>,
    store: CartStore,
    Form(form): Form<LineForm>,
) -> Result<Response> {
    let cart = store.decrement_line(form.index).await?;
    Ok(surface_response(&state, &cart, form.view))
}

/// Remove a line (HTMX).
#[instrument(skip(state, store))]
pub async fn remove(
    State(state): State<AppState>,
    store: CartStore,
    Form(form): Form<LineForm>,
) -> Result<Response> {
    let cart = store.remove_line(form.index).await?;
    Ok(surface_response(&state, &cart, form.view))
}

/// Re-render the surface that issued a mutation and notify the others.
fn surface_response(state: &AppState, cart: &Cart, surface: CartSurface) -> Response {
    let cart = CartView::project(cart, state.currency());
    let headers = AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]);

    match surface {
        CartSurface::Dropdown => (headers, CartDropdownTemplate { cart }).into_response(),
        CartSurface::Page => (headers, CartItemsTemplate { cart }).into_response(),
    }
}

/// Serialize JSON with every non-ASCII character escaped.
///
/// Header values must be visible ASCII; product names are not.
fn ascii_json(value: &serde_json::Value) -> String {
    let json = value.to_string();
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        if ch.is_ascii() {
            out.push(ch);
        } else {
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    out
}
