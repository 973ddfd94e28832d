//! Loading the product catalog from disk.

use std::path::{Path, PathBuf};

use thiserror::Error;
use verde_core::Catalog;
use verde_core::catalog::CatalogError;

/// Errors loading the catalog file.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Read and validate a JSON catalog file.
///
/// # Errors
///
/// Returns `CatalogLoadError` if the file can't be read, isn't valid JSON, or
/// fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogLoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = Catalog::from_json(&json)?;
    tracing::info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
    Ok(catalog)
}
