//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `TIENDA_API_URL` - Backend origin every request is sent to
//!   (e.g. `https://shop.example.com`)
//!
//! ## Optional
//! - `TIENDA_USER_AGENT` - `User-Agent` header (default: `tienda/<version>`)

use thiserror::Error;
use url::Url;

/// Environment variable holding the backend origin.
pub const API_URL_VAR: &str = "TIENDA_API_URL";

/// Environment variable overriding the `User-Agent` header.
pub const USER_AGENT_VAR: &str = "TIENDA_USER_AGENT";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// API client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin; request paths are appended to it verbatim.
    pub base_url: Url,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
}

impl ClientConfig {
    /// Build a configuration for the given backend origin.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` (attributed to `TIENDA_API_URL`)
    /// if the URL does not parse or is not `http`/`https`.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(API_URL_VAR, base_url)?,
            user_agent: default_user_agent(),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `TIENDA_API_URL` is missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let raw = get_required_env(API_URL_VAR)?;
        let base_url = parse_base_url(API_URL_VAR, &raw)?;
        let user_agent = get_optional_env(USER_AGENT_VAR).unwrap_or_else(default_user_agent);

        Ok(Self {
            base_url,
            user_agent,
        })
    }

    /// Replace the `User-Agent` header value.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn default_user_agent() -> String {
    format!("tienda/{}", env!("CARGO_PKG_VERSION"))
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse and check a backend origin.
fn parse_base_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}' (expected http or https)", url.scheme()),
        ));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "URL must include a host".to_string(),
        ));
    }

    Ok(url)
}
