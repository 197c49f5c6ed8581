//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `MERCADO_API_URL` - Base URL of the catalog server (default: http://localhost:3000)
//! - `MERCADO_CART_DIR` - Directory holding the cart storage file (default: .mercado)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_CART_DIR: &str = ".mercado";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the catalog API
    pub api_url: Url,
    /// Directory for the file-backed cart storage
    pub cart_dir: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `MERCADO_API_URL` is not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let raw_url = get_env_or_default("MERCADO_API_URL", DEFAULT_API_URL);
        let api_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("MERCADO_API_URL".to_string(), e.to_string()))?;

        Ok(Self {
            api_url,
            cart_dir: PathBuf::from(get_env_or_default("MERCADO_CART_DIR", DEFAULT_CART_DIR)),
        })
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
