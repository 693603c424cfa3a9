//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CATALOG_BASE_URL` - Catalog service base URL (default: `http://localhost:3333`)
//! - `CATALOG_ACCESS_TOKEN` - Bearer token for the catalog service
//! - `CART_STORAGE_PATH` - Local store file path (default: `.rocketshoes/storage.json`)

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Development catalog served by the local API server.
const DEFAULT_CATALOG_BASE_URL: &str = "http://localhost:3333";

const DEFAULT_STORAGE_PATH: &str = ".rocketshoes/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct CartConfig {
    /// Catalog service base URL
    pub catalog_base_url: Url,
    /// Bearer token for the catalog service, if it requires one
    pub catalog_access_token: Option<SecretString>,
    /// Path of the local store file holding the persisted cart
    pub storage_path: PathBuf,
}

impl std::fmt::Debug for CartConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartConfig")
            .field("catalog_base_url", &self.catalog_base_url.as_str())
            .field(
                "catalog_access_token",
                &self.catalog_access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("storage_path", &self.storage_path)
            .finish()
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `CATALOG_BASE_URL` is present but not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog_base_url = parse_base_url(&get_env_or_default(
            "CATALOG_BASE_URL",
            DEFAULT_CATALOG_BASE_URL,
        ))?;
        let catalog_access_token = get_optional_env("CATALOG_ACCESS_TOKEN").map(SecretString::from);
        let storage_path =
            PathBuf::from(get_env_or_default("CART_STORAGE_PATH", DEFAULT_STORAGE_PATH));

        Ok(Self {
            catalog_base_url,
            catalog_access_token,
            storage_path,
        })
    }
}

/// Parse and validate a catalog base URL.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    raw.parse::<Url>()
        .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_BASE_URL".to_string(), e.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_valid() {
        let url = parse_base_url("http://localhost:3333").unwrap();
        assert_eq!(url.host_str(), Some("localhost"));
        assert_eq!(url.port(), Some(3333));
    }

    #[test]
    fn test_parse_base_url_invalid() {
        let result = parse_base_url("not a url");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_default_base_url_parses() {
        assert!(parse_base_url(DEFAULT_CATALOG_BASE_URL).is_ok());
    }

    #[test]
    fn test_debug_redacts_access_token() {
        let config = CartConfig {
            catalog_base_url: parse_base_url(DEFAULT_CATALOG_BASE_URL).unwrap(),
            catalog_access_token: Some(SecretString::from("super_secret_token")),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token"));
    }
}
