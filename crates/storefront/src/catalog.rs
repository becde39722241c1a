//! Catalog loading.
//!
//! The catalog is read exactly once at startup. Any failure leaves the
//! storefront running with an empty catalog and an inline message in place of
//! the product grid; the load is not retried.

use dessert_shop_core::{Catalog, CatalogError};
use thiserror::Error;
use tracing::instrument;

use crate::config::CatalogSource;

/// Message shown in place of the product grid when loading fails.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load products. Please refresh the page.";

/// Errors that can occur while reading the catalog.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Local file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Content is not a valid catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Result of the startup catalog load.
#[derive(Debug, Clone, Default)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    /// User-visible message when loading failed.
    pub error: Option<String>,
}

impl LoadedCatalog {
    /// A successfully loaded catalog.
    #[must_use]
    pub const fn loaded(catalog: Catalog) -> Self {
        Self {
            catalog,
            error: None,
        }
    }

    /// An empty catalog carrying the failure message.
    #[must_use]
    pub fn failed() -> Self {
        Self {
            catalog: Catalog::empty(),
            error: Some(LOAD_FAILURE_MESSAGE.to_string()),
        }
    }
}

/// Load the catalog, converting any failure into an empty catalog.
#[instrument(skip_all, fields(source = %source))]
pub async fn load_catalog(source: &CatalogSource) -> LoadedCatalog {
    match fetch_catalog(source).await {
        Ok(catalog) => {
            tracing::info!(products = catalog.len(), "Catalog loaded");
            LoadedCatalog::loaded(catalog)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load catalog");
            LoadedCatalog::failed()
        }
    }
}

/// Read and parse the catalog resource.
///
/// # Errors
///
/// Returns `CatalogLoadError` on transport, status, I/O, or parse failure.
pub async fn fetch_catalog(source: &CatalogSource) -> Result<Catalog, CatalogLoadError> {
    let bytes = match source {
        CatalogSource::Remote(url) => reqwest::get(url.clone())
            .await?
            .error_for_status()?
            .bytes()
            .await?
            .to_vec(),
        CatalogSource::File(path) => tokio::fs::read(path).await?,
    };

    Ok(Catalog::from_json_slice(&bytes)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    const CATALOG_JSON: &str = r#"[
        {
            "image": { "thumbnail": "/t/waffle.jpg", "desktop": "/d/waffle.jpg" },
            "name": "Waffle with Berries",
            "category": "Waffle",
            "price": 6.5
        },
        {
            "image": { "thumbnail": "/t/creme.jpg", "desktop": "/d/creme.jpg" },
            "name": "Vanilla Bean Crème Brûlée",
            "category": "Crème Brûlée",
            "price": 7.0
        }
    ]"#;

    async fn write_temp(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("catalog-{}.json", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, contents).await.unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_valid_file() {
        let path = write_temp(CATALOG_JSON).await;
        let loaded = load_catalog(&CatalogSource::File(path.clone())).await;
        tokio::fs::remove_file(path).await.unwrap();

        assert!(loaded.error.is_none());
        let names: Vec<&str> = loaded
            .catalog
            .products()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["Waffle with Berries", "Vanilla Bean Crème Brûlée"]);
    }

    #[tokio::test]
    async fn test_missing_file_yields_empty_catalog() {
        let path = std::env::temp_dir().join(format!("missing-{}.json", uuid::Uuid::new_v4()));
        let loaded = load_catalog(&CatalogSource::File(path)).await;

        assert!(loaded.catalog.is_empty());
        assert_eq!(loaded.error.as_deref(), Some(LOAD_FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn test_malformed_file_yields_empty_catalog() {
        let path = write_temp("[{\"name\": \"Half a record\"").await;
        let err = fetch_catalog(&CatalogSource::File(path.clone()))
            .await
            .unwrap_err();
        let loaded = load_catalog(&CatalogSource::File(path.clone())).await;
        tokio::fs::remove_file(path).await.unwrap();

        assert!(matches!(err, CatalogLoadError::Catalog(CatalogError::Parse(_))));
        assert!(loaded.catalog.is_empty());
        assert!(loaded.error.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_names_yield_empty_catalog() {
        let duplicated = r#"[
            { "image": { "thumbnail": "t", "desktop": "d" }, "name": "Tiramisu", "category": "Tiramisu", "price": 5.5 },
            { "image": { "thumbnail": "t", "desktop": "d" }, "name": "Tiramisu", "category": "Tiramisu", "price": 5.5 }
        ]"#;
        let path = write_temp(duplicated).await;
        let loaded = load_catalog(&CatalogSource::File(path.clone())).await;
        tokio::fs::remove_file(path).await.unwrap();

        assert!(loaded.catalog.is_empty());
        assert!(loaded.error.is_some());
    }

    #[tokio::test]
    async fn test_unreachable_remote_yields_empty_catalog() {
        // Port 9 (discard) on loopback is not expected to serve HTTP.
        let url = url::Url::parse("http://127.0.0.1:9/data.json").unwrap();
        let loaded = load_catalog(&CatalogSource::Remote(url)).await;

        assert!(loaded.catalog.is_empty());
        assert_eq!(loaded.error.as_deref(), Some(LOAD_FAILURE_MESSAGE));
    }
}
