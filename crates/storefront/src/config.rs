//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `DEWDROP_DATA_DIR` - Directory for persisted cart and theme (default: `.dewdrop`)
//! - `DEWDROP_CATALOG` - Path to the product catalog JSON (default: `catalog.json`)
//! - `DEWDROP_TOAST_MS` - Notification lifetime in milliseconds (default: 3000)
//! - `DEWDROP_TOAST_OVERLAP` - `stack` or `replace` (default: `stack`)
//! - `DEWDROP_DEFAULT_THEME` - `light` or `dark` (default: `light`)

use std::path::PathBuf;
use std::time::Duration;

use dewdrop_core::Theme;
use thiserror::Error;

use crate::notify::OverlapPolicy;

const DEFAULT_DATA_DIR: &str = ".dewdrop";
const DEFAULT_CATALOG: &str = "catalog.json";
const DEFAULT_TOAST_MS: u64 = 3000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory backing the persistent key-value store
    pub data_dir: PathBuf,
    /// Product catalog JSON file
    pub catalog_path: PathBuf,
    /// How long a notification stays on screen
    pub toast_lifetime: Duration,
    /// What happens when a notification arrives while another is showing
    pub toast_overlap: OverlapPolicy,
    /// Theme used when none has been saved
    pub default_theme: Theme,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog_path: PathBuf::from(DEFAULT_CATALOG),
            toast_lifetime: Duration::from_millis(DEFAULT_TOAST_MS),
            toast_overlap: OverlapPolicy::default(),
            default_theme: Theme::default(),
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
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = lookup("DEWDROP_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);
        let catalog_path = lookup("DEWDROP_CATALOG").map_or(defaults.catalog_path, PathBuf::from);

        let toast_lifetime = match lookup("DEWDROP_TOAST_MS") {
            Some(raw) => parse_toast_ms(&raw)?,
            None => defaults.toast_lifetime,
        };

        let toast_overlap = match lookup("DEWDROP_TOAST_OVERLAP") {
            Some(raw) => raw
                .parse::<OverlapPolicy>()
                .map_err(|e| invalid("DEWDROP_TOAST_OVERLAP", e))?,
            None => defaults.toast_overlap,
        };

        let default_theme = match lookup("DEWDROP_DEFAULT_THEME") {
            Some(raw) => raw
                .parse::<Theme>()
                .map_err(|e| invalid("DEWDROP_DEFAULT_THEME", e))?,
            None => defaults.default_theme,
        };

        Ok(Self {
            data_dir,
            catalog_path,
            toast_lifetime,
            toast_overlap,
            default_theme,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn invalid(key: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), reason.to_string())
}

/// Parse a positive millisecond count.
fn parse_toast_ms(raw: &str) -> Result<Duration, ConfigError> {
    let ms = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| invalid("DEWDROP_TOAST_MS", e))?;
    if ms == 0 {
        return Err(invalid("DEWDROP_TOAST_MS", "must be greater than zero"));
    }
    Ok(Duration::from_millis(ms))
}
