//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `FISHMARKET_DATA_DIR` - Directory holding the cart snapshot
//!   (default: `<local data dir>/fishmarket`, or `.fishmarket` if the platform
//!   has none)
//! - `FISHMARKET_CART_KEY` - Storage key of the snapshot (default: `cart`)
//! - `FISHMARKET_LOG_JSON` - Emit logs as JSON when `1` or `true`

use std::path::PathBuf;

use thiserror::Error;

use crate::persistence::{DEFAULT_CART_KEY, FileStorage, PersistenceAdapter};
use crate::store::CartStore;

const MAX_CART_KEY_LENGTH: usize = 64;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Directory holding the snapshot file
    pub data_dir: PathBuf,
    /// Storage key of the snapshot
    pub cart_key: String,
    /// Emit logs as JSON
    pub log_json: bool,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            cart_key: DEFAULT_CART_KEY.to_string(),
            log_json: false,
        }
    }
}

impl CartConfig {
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

        let data_dir = get_optional_env("FISHMARKET_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(default_data_dir, PathBuf::from);
        let cart_key = get_env_or_default("FISHMARKET_CART_KEY", DEFAULT_CART_KEY);
        validate_cart_key(&cart_key, "FISHMARKET_CART_KEY")?;
        let log_json = parse_flag(
            &get_env_or_default("FISHMARKET_LOG_JSON", "false"),
            "FISHMARKET_LOG_JSON",
        )?;

        Ok(Self {
            data_dir,
            cart_key,
            log_json,
        })
    }

    /// Replace the storage key, validating it like `FISHMARKET_CART_KEY`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the key is not a usable file stem.
    pub fn set_cart_key(&mut self, key: impl Into<String>) -> Result<(), ConfigError> {
        let key = key.into();
        validate_cart_key(&key, "FISHMARKET_CART_KEY")?;
        self.cart_key = key;
        Ok(())
    }

    /// File storage rooted at the configured directory.
    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.data_dir)
    }

    /// Open a file-backed cart store for this configuration.
    #[must_use]
    pub fn open_store(&self) -> CartStore<FileStorage> {
        CartStore::open(PersistenceAdapter::new(self.storage(), &self.cart_key))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map_or_else(|| PathBuf::from(".fishmarket"), |dir| dir.join("fishmarket"))
}

/// Validate that a cart key is usable as a file stem.
fn validate_cart_key(key: &str, var_name: &str) -> Result<(), ConfigError> {
    if key.is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must not be empty".to_string(),
        ));
    }
    if key.len() > MAX_CART_KEY_LENGTH {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("must be at most {MAX_CART_KEY_LENGTH} characters"),
        ));
    }
    if let Some(c) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_')))
    {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("invalid character '{c}' (allowed: A-Z, a-z, 0-9, '-', '_')"),
        ));
    }
    Ok(())
}

/// Parse a boolean flag value.
fn parse_flag(value: &str, var_name: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}
