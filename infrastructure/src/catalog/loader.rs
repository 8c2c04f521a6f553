//! Catalog loading from TOML/JSON files and the built-in collection

use aurelio_domain::{Catalog, DomainError, Product};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const BUILTIN_CATALOG: &str = include_str!("aurelio.toml");

/// Errors raised while loading a catalog at session start
#[derive(Error, Debug)]
pub enum CatalogLoadError {
    #[error("Failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported catalog format: {0} (expected .toml or .json)")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// On-disk layout: a list of products under `products`
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<Product>,
}

/// Loads the session catalog
pub struct CatalogLoader;

impl CatalogLoader {
    /// The built-in Aurelio collection.
    pub fn builtin() -> Result<Catalog, CatalogLoadError> {
        Self::parse_toml(BUILTIN_CATALOG)
    }

    /// Load from `path` when given, otherwise the built-in collection.
    pub fn load(path: Option<&Path>) -> Result<Catalog, CatalogLoadError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::builtin(),
        }
    }

    /// Load a `.toml` or `.json` catalog file.
    pub fn from_path(path: &Path) -> Result<Catalog, CatalogLoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let catalog = match extension.as_str() {
            "toml" => Self::parse_toml(&content)?,
            "json" => Self::parse_json(&content)?,
            other => return Err(CatalogLoadError::UnsupportedFormat(other.to_string())),
        };

        info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    pub fn parse_toml(content: &str) -> Result<Catalog, CatalogLoadError> {
        let file: CatalogFile = toml::from_str(content)?;
        Ok(Catalog::new(file.products)?)
    }

    pub fn parse_json(content: &str) -> Result<Catalog, CatalogLoadError> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Ok(Catalog::new(file.products)?)
    }
}
