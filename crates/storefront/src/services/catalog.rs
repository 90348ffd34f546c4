//! Catalog loading.
//!
//! The catalog is read once per process from one of three sources. Any
//! failure (network, I/O, malformed JSON) is logged and yields an empty
//! catalog: product pages then render without products instead of failing.
//! There is no retry and no merging with a previous catalog.

use std::path::PathBuf;
use std::time::Duration;

use repuestos_core::Catalog;
use thiserror::Error;
use tracing::instrument;
use url::Url;

/// Catalog document compiled into the binary.
const INLINE_CATALOG: &str = include_str!("../../data/catalog.json");

/// Where the catalog document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// The document compiled into the binary.
    Inline,
    /// A JSON file on disk.
    File(PathBuf),
    /// A JSON document fetched over HTTP(S).
    Url(Url),
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inline => f.write_str("inline"),
            Self::File(path) => write!(f, "file:{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reading the catalog file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not a catalog.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load the catalog, falling back to an empty one on any failure.
#[instrument(skip_all, fields(source = %source))]
pub async fn load(source: &CatalogSource, timeout: Duration) -> Catalog {
    match try_load(source, timeout).await {
        Ok(catalog) => {
            tracing::info!(products = catalog.len(), "Catalog loaded");
            catalog
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load catalog, continuing with an empty catalog");
            Catalog::new()
        }
    }
}

/// Load the catalog, reporting failures.
///
/// # Errors
///
/// Returns `CatalogError` if the document cannot be fetched, read or parsed.
pub async fn try_load(source: &CatalogSource, timeout: Duration) -> Result<Catalog, CatalogError> {
    let document = match source {
        CatalogSource::Inline => return Ok(Catalog::from_json(INLINE_CATALOG)?),
        CatalogSource::File(path) => tokio::fs::read_to_string(path).await?,
        CatalogSource::Url(url) => fetch(url, timeout).await?,
    };

    Ok(Catalog::from_json(&document)?)
}

/// Fetch the catalog document.
async fn fetch(url: &Url, timeout: Duration) -> Result<String, reqwest::Error> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;

    let response = client
        .get(url.clone())
        .header("Accept", "application/json")
        .send()
        .await?
        .error_for_status()?;

    response.text().await
}
