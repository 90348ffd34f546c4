//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. `TraceLayer` (request span with method, path and request ID)
//! 3. Request ID (add unique ID to each request and response)
//! 4. Session layer (tower-sessions, holds the cart)

pub mod request_id;
pub mod session;

pub use request_id::{REQUEST_ID_HEADER, make_request_span, request_id_middleware};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
