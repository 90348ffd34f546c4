//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Home page (featured products)
//! GET  /health                    - Liveness check
//! GET  /health/ready              - Readiness check (catalog loaded)
//!
//! # Products
//! GET  /products                  - Product listing
//! GET  /products/{id}             - Product detail (?variation= preselects)
//! GET  /products/{id}/purchase    - Purchase panel fragment (HTMX)
//! GET  /product?id=...            - Product detail addressed by query
//!
//! # Cart (HTMX fragments)
//! GET  /cart                      - Cart page
//! GET  /cart/items                - Cart page list fragment
//! GET  /cart/dropdown             - Header dropdown fragment
//! GET  /cart/count                - Cart count badge fragment
//! POST /cart/add                  - Add to cart (returns badge, triggers cart-updated)
//! POST /cart/increment            - Increase a line (returns the issuing surface)
//! POST /cart/decrement            - Decrease a line (returns the issuing surface)
//! POST /cart/remove               - Remove a line (returns the issuing surface)
//! ```

pub mod cart;
pub mod health;
pub mod home;
pub mod products;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::{create_session_layer, make_request_span, request_id_middleware};
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
        .route("/{id}/purchase", get(products::purchase))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/items", get(cart::items))
        .route("/dropdown", get(cart::dropdown))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/increment", post(cart::increment))
        .route("/decrement", post(cart::decrement))
        .route("/remove", post(cart::remove))
}

/// Create all page and fragment routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        .route("/product", get(products::show_by_query))
        // Cart routes
        .nest("/cart", cart_routes())
}

/// Build the complete application: routes, static files and middleware.
///
/// Sentry layers are added by the binary on top of this router.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());
    let static_files = ServeDir::new(&state.config().static_dir);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(routes())
        .nest_service("/static", static_files)
        .layer(session_layer)
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .with_state(state)
}
