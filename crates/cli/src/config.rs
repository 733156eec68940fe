//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `AQUASTORE_CART_DIR` - Directory holding the cart file (default: .aquastore)
//! - `AQUASTORE_CART_KEY` - Storage key, also the file stem (default: localCart)
//! - `AQUASTORE_CURRENCY` - Currency used when printing prices (default: INR)
//! - `RUST_LOG` - Log filter (default: `aquastore_cart=info,aquastore_cli=info`)

use std::path::PathBuf;

use aquastore_cart::DEFAULT_STORAGE_KEY;
use aquastore_cart::storage::validate_key;
use aquastore_core::CurrencyCode;
use thiserror::Error;

const DEFAULT_CART_DIR: &str = ".aquastore";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid argument {0}: {1}")]
    InvalidArgument(String, String),
}

/// Cart CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Directory the file-backed cart lives in
    pub storage_dir: PathBuf,
    /// Key the cart is persisted under
    pub storage_key: String,
    /// Currency for human-readable totals
    pub currency: CurrencyCode,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_CART_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: CurrencyCode::default(),
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
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage_dir = lookup("AQUASTORE_CART_DIR")
            .filter(|dir| !dir.is_empty())
            .map_or(defaults.storage_dir, PathBuf::from);

        let storage_key = match lookup("AQUASTORE_CART_KEY") {
            Some(key) => {
                validate_key(&key).map_err(|e| {
                    ConfigError::InvalidEnvVar("AQUASTORE_CART_KEY".to_string(), e.to_string())
                })?;
                key
            }
            None => defaults.storage_key,
        };

        let currency = match lookup("AQUASTORE_CURRENCY") {
            Some(code) => code
                .parse::<CurrencyCode>()
                .map_err(|e| ConfigError::InvalidEnvVar("AQUASTORE_CURRENCY".to_string(), e))?,
            None => defaults.currency,
        };

        Ok(Self {
            storage_dir,
            storage_key,
            currency,
        })
    }

    /// Apply command-line overrides on top of the loaded values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the override key is invalid.
    pub fn with_overrides(
        mut self,
        dir: Option<PathBuf>,
        key: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(dir) = dir {
            self.storage_dir = dir;
        }
        if let Some(key) = key {
            validate_key(&key)
                .map_err(|e| ConfigError::InvalidArgument("--key".to_string(), e.to_string()))?;
            self.storage_key = key;
        }
        Ok(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CartConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CartConfig::default());
        assert_eq!(config.storage_key, "localCart");
        assert_eq!(config.storage_dir, PathBuf::from(".aquastore"));
        assert_eq!(config.currency, CurrencyCode::INR);
    }

    #[test]
    fn test_reads_variables() {
        let config = CartConfig::from_lookup(lookup(&[
            ("AQUASTORE_CART_DIR", "/tmp/carts"),
            ("AQUASTORE_CART_KEY", "guestCart"),
            ("AQUASTORE_CURRENCY", "usd"),
        ]))
        .unwrap();

        assert_eq!(config.storage_dir, PathBuf::from("/tmp/carts"));
        assert_eq!(config.storage_key, "guestCart");
        assert_eq!(config.currency, CurrencyCode::USD);
    }

    #[test]
    fn test_rejects_bad_key() {
        let err = CartConfig::from_lookup(lookup(&[("AQUASTORE_CART_KEY", "../cart")]))
            .unwrap_err();
        assert!(err.to_string().contains("AQUASTORE_CART_KEY"));
    }

    #[test]
    fn test_rejects_bad_currency() {
        let err = CartConfig::from_lookup(lookup(&[("AQUASTORE_CURRENCY", "DOGE")]))
            .unwrap_err();
        assert!(err.to_string().contains("AQUASTORE_CURRENCY"));
    }

    #[test]
    fn test_overrides() {
        let config = CartConfig::default()
            .with_overrides(Some(PathBuf::from("carts")), Some("other".to_string()))
            .unwrap();
        assert_eq!(config.storage_dir, PathBuf::from("carts"));
        assert_eq!(config.storage_key, "other");

        assert!(
            CartConfig::default()
                .with_overrides(None, Some("a/b".to_string()))
                .is_err()
        );
    }

    #[test]
    fn test_bad_key_override_names_the_argument() {
        let err = CartConfig::default()
            .with_overrides(None, Some("a/b".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidArgument(..)));
        let message = err.to_string();
        assert!(message.starts_with("Invalid argument --key"));
        assert!(!message.contains("environment variable"));
    }
}
