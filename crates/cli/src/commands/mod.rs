//! CLI command implementations.
//!
//! Each command writes its results to the writer it is given (stdout in
//! the binary); diagnostics go to the log.

pub mod cart;
pub mod products;
pub mod search;
pub mod theme;

use std::sync::Arc;

use dewdrop_storefront::catalog::Catalog;
use dewdrop_storefront::config::StorefrontConfig;
use dewdrop_storefront::error::Result;
use dewdrop_storefront::storage::{FileStore, KeyValueStore};

/// Result of running a command.
pub type CommandResult = std::result::Result<(), Box<dyn std::error::Error>>;

/// Subdirectory of the data directory that stands in for session storage.
const SESSION_DIR: &str = "session";

/// Configuration and stores shared by every command.
pub struct Session {
    pub config: StorefrontConfig,
    pub storage: Arc<dyn KeyValueStore>,
    pub session: Arc<dyn KeyValueStore>,
}

impl Session {
    /// Load configuration from the environment and open the stores.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or the data directory
    /// cannot be created.
    pub fn open() -> Result<Self> {
        Self::with_config(StorefrontConfig::from_env()?)
    }

    /// Open the file stores under `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn with_config(config: StorefrontConfig) -> Result<Self> {
        let storage = FileStore::open(&config.data_dir)?;
        let session = FileStore::open(config.data_dir.join(SESSION_DIR))?;
        tracing::debug!(data_dir = %storage.dir().display(), "Session opened");

        Ok(Self {
            config,
            storage: Arc::new(storage),
            session: Arc::new(session),
        })
    }

    /// Load the product catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be read or parsed.
    pub fn catalog(&self) -> Result<Catalog> {
        Ok(Catalog::load(&self.config.catalog_path)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use tempfile::TempDir;

    use super::*;

    const CATALOG_JSON: &str = r#"[
      {"id": "serum-01", "name": "Vitamin C Serum", "category": "serums", "price": "30.00", "rating": "4.5", "tags": ["Oily"]},
      {"id": "clean-01", "name": "Gentle Cleanser", "category": "cleansers", "price": "12.50", "rating": "4.0", "tags": ["Dry"]},
      {"id": 7, "name": "Night Serum", "category": "serums", "price": "45.00", "rating": "3.9", "tags": ["Dry", "Sensitive"]}
    ]"#;

    /// A session over a temporary data directory with a small catalog.
    pub(crate) fn session() -> (TempDir, Session) {
        let dir = TempDir::new().unwrap();
        let catalog_path = dir.path().join("catalog.json");
        std::fs::write(&catalog_path, CATALOG_JSON).unwrap();
        let config = StorefrontConfig {
            data_dir: dir.path().join("data"),
            catalog_path,
            ..StorefrontConfig::default()
        };
        let session = Session::with_config(config).unwrap();
        (dir, session)
    }

    /// Run a command and return what it wrote.
    pub(crate) fn output(
        run: impl FnOnce(&mut dyn std::io::Write) -> CommandResult,
    ) -> String {
        let mut out = Vec::new();
        run(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_stores_live_under_data_dir() {
        let (dir, session) = session();
        session.storage.set("cart", "[]").unwrap();
        session.session.set("searchQuery", "serum").unwrap();

        assert!(dir.path().join("data/cart").exists());
        assert!(dir.path().join("data/session/searchQuery").exists());
    }

    #[test]
    fn test_missing_catalog_is_an_error() {
        let (dir, mut session) = session();
        session.config.catalog_path = dir.path().join("missing.json");
        assert!(session.catalog().is_err());
    }
}
