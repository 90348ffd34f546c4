//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `STOREFRONT_CATALOG_URL` - Fetch the catalog document from this URL at startup
//! - `STOREFRONT_CATALOG_PATH` - Read the catalog document from this file at startup
//! - `STOREFRONT_CATALOG_TIMEOUT_SECS` - Timeout for the catalog fetch (default: 10)
//! - `STOREFRONT_CURRENCY` - Store currency: CLP, USD or EUR (default: CLP)
//! - `STOREFRONT_STATIC_DIR` - Directory served under `/static` (default: the crate's `static/`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)
//!
//! When neither catalog variable is set, the catalog compiled into the binary
//! is used. Setting both is a configuration error.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use repuestos_core::CurrencyCode;
use thiserror::Error;
use url::Url;

use crate::services::catalog::CatalogSource;

/// Static assets shipped with the crate.
const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Conflicting environment variables: {0}")]
    Conflict(String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Where the catalog document comes from
    pub catalog: CatalogSource,
    /// Upper bound on the remote catalog fetch
    pub catalog_timeout: Duration,
    /// Currency prices are displayed in
    pub currency: CurrencyCode,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            catalog: CatalogSource::Inline,
            catalog_timeout: Duration::from_secs(10),
            currency: CurrencyCode::CLP,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed, or
    /// if both catalog sources are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = parse_or(&lookup, "STOREFRONT_HOST", defaults.host)?;
        let port = parse_or(&lookup, "STOREFRONT_PORT", defaults.port)?;
        let base_url = lookup("STOREFRONT_BASE_URL").unwrap_or(defaults.base_url);
        Url::parse(&base_url).map_err(|e| invalid("STOREFRONT_BASE_URL", &e))?;

        let catalog = catalog_source(&lookup)?;
        let catalog_timeout = Duration::from_secs(parse_or(
            &lookup,
            "STOREFRONT_CATALOG_TIMEOUT_SECS",
            defaults.catalog_timeout.as_secs(),
        )?);
        let currency = parse_or(&lookup, "STOREFRONT_CURRENCY", defaults.currency)?;
        let static_dir = lookup("STOREFRONT_STATIC_DIR").map_or(defaults.static_dir, PathBuf::from);

        Ok(Self {
            host,
            port,
            base_url,
            catalog,
            catalog_timeout,
            currency,
            static_dir,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_or(&lookup, "SENTRY_SAMPLE_RATE", defaults.sentry_sample_rate)?,
            sentry_traces_sample_rate: parse_or(
                &lookup,
                "SENTRY_TRACES_SAMPLE_RATE",
                defaults.sentry_traces_sample_rate,
            )?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the public URL is served over HTTPS (secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn invalid(key: &str, err: &impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), err.to_string())
}

/// Parse a variable if present, otherwise return the default.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: ToString,
{
    lookup(key).map_or(Ok(default), |value| {
        value.trim().parse().map_err(|e| invalid(key, &e))
    })
}

/// Resolve the catalog source from the URL / path variables.
fn catalog_source(lookup: &impl Fn(&str) -> Option<String>) -> Result<CatalogSource, ConfigError> {
    let url = lookup("STOREFRONT_CATALOG_URL").filter(|v| !v.is_empty());
    let path = lookup("STOREFRONT_CATALOG_PATH").filter(|v| !v.is_empty());

    match (url, path) {
        (Some(_), Some(_)) => Err(ConfigError::Conflict(
            "set only one of STOREFRONT_CATALOG_URL and STOREFRONT_CATALOG_PATH".to_string(),
        )),
        (Some(url), None) => Url::parse(&url)
            .map(CatalogSource::Url)
            .map_err(|e| invalid("STOREFRONT_CATALOG_URL", &e)),
        (None, Some(path)) => Ok(CatalogSource::File(PathBuf::from(path))),
        (None, None) => Ok(CatalogSource::Inline),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.catalog, CatalogSource::Inline);
        assert_eq!(config.currency, CurrencyCode::CLP);
        assert_eq!(config.catalog_timeout, Duration::from_secs(10));
        assert!(config.sentry_dsn.is_none());
        assert!(!config.is_secure());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STOREFRONT_HOST", "0.0.0.0"),
            ("STOREFRONT_PORT", "8080"),
            ("STOREFRONT_BASE_URL", "https://repuestos.example.cl"),
            ("STOREFRONT_CURRENCY", "usd"),
            ("STOREFRONT_CATALOG_PATH", "/srv/catalog.json"),
            ("STOREFRONT_CATALOG_TIMEOUT_SECS", "3"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert!(config.is_secure());
        assert_eq!(config.currency, CurrencyCode::USD);
        assert_eq!(
            config.catalog,
            CatalogSource::File(PathBuf::from("/srv/catalog.json"))
        );
        assert_eq!(config.catalog_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_catalog_url() {
        let config = load(&[("STOREFRONT_CATALOG_URL", "https://cdn.example.cl/products.json")])
            .unwrap();
        assert!(matches!(config.catalog, CatalogSource::Url(url) if url.path() == "/products.json"));
    }

    #[test]
    fn test_both_catalog_sources_conflict() {
        let err = load(&[
            ("STOREFRONT_CATALOG_URL", "https://cdn.example.cl/products.json"),
            ("STOREFRONT_CATALOG_PATH", "products.json"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Conflict(_)));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("STOREFRONT_PORT", "not-a-port")]).unwrap_err(),
            ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_PORT"
        ));
        assert!(load(&[("STOREFRONT_CURRENCY", "ARS")]).is_err());
        assert!(load(&[("STOREFRONT_BASE_URL", "not a url")]).is_err());
        assert!(load(&[("STOREFRONT_CATALOG_URL", "relative/path.json")]).is_err());
    }
}
