//! Application state shared across handlers.

use std::sync::Arc;

use repuestos_core::{Catalog, CurrencyCode};
use tokio::sync::OnceCell;

use crate::config::StorefrontConfig;
use crate::services::catalog;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the catalog.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: OnceCell<Catalog>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The catalog is not loaded yet; see [`AppState::start_catalog_loading`].
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        Self::build(config, OnceCell::new())
    }

    /// Create a state with an already loaded catalog.
    #[must_use]
    pub fn with_catalog(config: StorefrontConfig, catalog: Catalog) -> Self {
        Self::build(config, OnceCell::new_with(Some(catalog)))
    }

    fn build(config: StorefrontConfig, catalog: OnceCell<Catalog>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Store currency, used by every price on the page.
    #[must_use]
    pub fn currency(&self) -> CurrencyCode {
        self.inner.config.currency
    }

    /// Get the catalog, loading it on first use.
    ///
    /// Concurrent first callers wait on the same load. Failures resolve to an
    /// empty catalog, so this never errors.
    pub async fn catalog(&self) -> &Catalog {
        self.inner
            .catalog
            .get_or_init(|| {
                let config = &self.inner.config;
                catalog::load(&config.catalog, config.catalog_timeout)
            })
            .await
    }

    /// Whether the catalog load has completed.
    #[must_use]
    pub fn is_catalog_ready(&self) -> bool {
        self.inner.catalog.initialized()
    }

    /// Start loading the catalog in the background.
    ///
    /// Product pages wait for it; routes that do not need products (health,
    /// static files, cart fragments) are served immediately.
    pub fn start_catalog_loading(&self) {
        let state = self.clone();
        tokio::spawn(async move {
            let catalog = state.catalog().await;
            tracing::debug!(products = catalog.len(), "Catalog ready");
        });
    }
}
