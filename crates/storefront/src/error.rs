//! Unified error handling.
//!
//! Provides a unified `AppError` type for the fallible edges of the
//! storefront: configuration, storage, catalog loading, and product input.
//! Cart and page operations themselves never fail; they degrade to no-ops
//! and log instead.

use dewdrop_core::ProductError;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog file could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Product input was malformed.
    #[error("Invalid product: {0}")]
    Product(#[from] ProductError),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(ProductError::MissingId);
        assert_eq!(err.to_string(), "Invalid product: product record is missing an id");
    }

    #[test]
    fn test_storage_error_converts() {
        let err = AppError::from(StorageError::InvalidKey("../x".to_string()));
        assert!(matches!(err, AppError::Storage(_)));
    }
}
