//! Integration tests for the Repuestos storefront.
//!
//! Requests are driven through the full router (sessions, request IDs,
//! tracing) with `tower::ServiceExt::oneshot`, no socket involved.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p repuestos-integration-tests
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let mut visitor = TestApp::new().visitor();
//! visitor.post_form("/cart/add", "product_id=bujia").await;
//! assert!(visitor.get("/cart/count").await.body.contains(">1<"));
//! ```

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use repuestos_core::Catalog;
use repuestos_storefront::{config::StorefrontConfig, routes, state::AppState};
use tower::ServiceExt;

/// Upper bound on response bodies read by the tests.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// A storefront application under test.
///
/// Visitors created from the same app share its session store, so separate
/// visitors model separate browsers talking to one server.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// App serving the catalog compiled into the storefront.
    #[must_use]
    pub fn new() -> Self {
        Self::from_state(AppState::new(StorefrontConfig::default()))
    }

    /// App serving the given catalog document.
    ///
    /// # Panics
    ///
    /// Panics if the document is not a valid catalog.
    #[must_use]
    pub fn with_catalog_json(document: &str) -> Self {
        let catalog = Catalog::from_json(document).expect("test catalog should parse");
        Self::from_state(AppState::with_catalog(StorefrontConfig::default(), catalog))
    }

    fn from_state(state: AppState) -> Self {
        Self {
            router: routes::app(state),
        }
    }

    /// A new browser with no cookies.
    #[must_use]
    pub fn visitor(&self) -> Visitor {
        Visitor {
            router: self.router.clone(),
            cookie: None,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// One browser: carries the session cookie between requests.
pub struct Visitor {
    router: Router,
    cookie: Option<String>,
}

/// A fully read response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Value of a response header as text.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The `HX-Trigger` header parsed as JSON, or wrapped as a JSON string
    /// when it is a bare event name.
    ///
    /// # Panics
    ///
    /// Panics if the header is missing.
    #[must_use]
    pub fn hx_trigger(&self) -> serde_json::Value {
        let raw = self.header("hx-trigger").expect("HX-Trigger header");
        serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
    }

    /// Byte offset of `needle` in the body.
    ///
    /// # Panics
    ///
    /// Panics if the body does not contain it.
    #[must_use]
    pub fn position(&self, needle: &str) -> usize {
        self.body
            .find(needle)
            .unwrap_or_else(|| panic!("body should contain {needle:?}:\n{}", self.body))
    }
}

impl Visitor {
    /// Send a GET request.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = Request::get(uri);
        self.send(request, Body::empty()).await
    }

    /// Send a form-encoded POST request, as HTMX does.
    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("hx-request", "true");
        self.send(request, Body::from(form.to_string())).await
    }

    async fn send(&mut self, mut request: axum::http::request::Builder, body: Body) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let request = request.body(body).expect("request should build");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
        {
            self.cookie = Some(cookie.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .expect("body should be readable");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}
