//! Integration tests for Dewdrop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p dewdrop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart and theme state across sessions on disk
//! - `storefront_flow` - Catalog, filters, search hand-off, and page load
//!
//! Each test gets its own [`TestContext`]: a temporary data directory with
//! a file store and a small catalog.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use dewdrop_storefront::config::StorefrontConfig;
use dewdrop_storefront::notify::OverlapPolicy;
use dewdrop_storefront::storage::{FileStore, KeyValueStore, StorageError};
use tempfile::TempDir;

/// Catalog written into every test context.
pub const CATALOG_JSON: &str = r#"[
  {"id": "serum-01", "name": "Vitamin C Serum", "category": "serums", "price": "30.00", "rating": "4.5", "tags": ["Oily", "Combination"], "image": "img/serum-01.jpg"},
  {"id": "clean-01", "name": "Gentle Cleanser", "category": "cleansers", "price": "12.50", "rating": "4.0", "tags": ["Dry", "Sensitive"]},
  {"id": "toner-01", "name": "Hydrating Toner", "category": "toners", "price": "18.00", "rating": "4.8", "tags": ["Dry"]},
  {"id": "serum-02", "name": "Night Serum", "category": "serums", "price": "45.00", "rating": "3.9", "tags": ["Sensitive"]},
  {"id": "mask-01", "name": "Clay Mask", "category": "masks", "price": "call us", "rating": "", "tags": ["Oily"]}
]"#;

/// A temporary data directory with a catalog and file stores.
pub struct TestContext {
    dir: TempDir,
    pub config: StorefrontConfig,
}

impl TestContext {
    /// Create a fresh context.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory or catalog cannot be
    /// written.
    pub fn new() -> std::io::Result<Self> {
        let dir = TempDir::new()?;
        let catalog_path = dir.path().join("catalog.json");
        std::fs::write(&catalog_path, CATALOG_JSON)?;

        let config = StorefrontConfig {
            data_dir: dir.path().join("data"),
            catalog_path,
            toast_lifetime: Duration::from_millis(3000),
            toast_overlap: OverlapPolicy::Stack,
            ..StorefrontConfig::default()
        };
        Ok(Self { dir, config })
    }

    /// Open the persistent store. Each call opens a new handle on the same
    /// directory, like a new page load.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn storage(&self) -> Result<Arc<dyn KeyValueStore>, StorageError> {
        Ok(Arc::new(FileStore::open(&self.config.data_dir)?))
    }

    /// Open the session store.
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn session(&self) -> Result<Arc<dyn KeyValueStore>, StorageError> {
        Ok(Arc::new(FileStore::open(self.dir.path().join("session"))?))
    }

    /// The temporary root directory.
    #[must_use]
    pub fn root(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }
}
