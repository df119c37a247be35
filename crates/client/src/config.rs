//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CLEMENTINE_API_URL` - Base URL of the shop API (e.g., `https://shop.example.com/api`)
//!
//! ## Optional
//! - `CLEMENTINE_DATA_DIR` - Directory for persisted state (default: `.clementine`)
//! - `CLEMENTINE_TIMEOUT_SECS` - Request timeout in seconds (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_DATA_DIR: &str = ".clementine";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the shop API, including the `/api` path prefix.
    pub api_url: Url,
    /// Directory where credentials and the cart are persisted.
    pub data_dir: PathBuf,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = get_required_env("CLEMENTINE_API_URL")?;
        let api_url = parse_api_url(&api_url)
            .map_err(|e| ConfigError::InvalidEnvVar("CLEMENTINE_API_URL".to_string(), e))?;

        let data_dir = PathBuf::from(get_env_or_default("CLEMENTINE_DATA_DIR", DEFAULT_DATA_DIR));

        let timeout_secs = get_env_or_default(
            "CLEMENTINE_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("CLEMENTINE_TIMEOUT_SECS".to_string(), e.to_string())
        })?;

        Ok(Self {
            api_url,
            data_dir,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Build a configuration directly, for embedders and tests.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `api_url` is not a valid base URL.
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        let api_url = parse_api_url(api_url)
            .map_err(|e| ConfigError::InvalidEnvVar("api_url".to_string(), e))?;
        Ok(Self {
            api_url,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }
}

/// Parse and normalize the API base URL.
///
/// A trailing slash is enforced so `Url::join` treats the final path segment
/// as a directory; without it, joining `products/` onto `/api` would drop
/// the prefix.
fn parse_api_url(raw: &str) -> Result<Url, String> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    let url = Url::parse(&normalized).map_err(|e| e.to_string())?;
    if url.cannot_be_a_base() {
        return Err("URL cannot be used as a base".to_string());
    }
    Ok(url)
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
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
    fn test_parse_api_url_appends_trailing_slash() {
        let url = parse_api_url("http://localhost:8000/api").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/");
    }

    #[test]
    fn test_parse_api_url_keeps_existing_slash() {
        let url = parse_api_url("http://localhost:8000/api/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/");
    }

    #[test]
    fn test_parse_api_url_join_preserves_prefix() {
        let url = parse_api_url("http://localhost:8000/api").unwrap();
        let joined = url.join("products/featured/").unwrap();
        assert_eq!(joined.as_str(), "http://localhost:8000/api/products/featured/");
    }

    #[test]
    fn test_parse_api_url_rejects_garbage() {
        assert!(parse_api_url("not a url").is_err());
    }

    #[test]
    fn test_config_new_defaults() {
        let config = StoreConfig::new("http://localhost:8000/api").unwrap();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.data_dir, PathBuf::from(".clementine"));
    }
}
