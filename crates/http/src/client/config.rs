//! Client configuration

use super::error::ClientError;
use std::time::Duration;

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "PUBLIC_API_URL";

/// Base URL used when [`API_URL_ENV`] is not set
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Storage key of the bearer token slot
pub const DEFAULT_TOKEN_KEY: &str = "token";

/// Settings the client is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL, without trailing slash
    pub base_url: String,
    /// Storage key holding the bearer token
    pub token_key: String,
    /// Request timeout (ignored on WASM)
    pub timeout: Option<Duration>,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            timeout: None,
            user_agent: concat!("booking-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Resolve the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the configuration from an arbitrary variable source
    ///
    /// Only the base URL is environment driven; a blank value counts as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(API_URL_ENV)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            base_url: normalize_base_url(&base_url),
            ..Self::default()
        }
    }

    /// Check that the base URL is an absolute http(s) URL
    pub fn validate(&self) -> Result<(), ClientError> {
        let url = url::Url::parse(&self.base_url).map_err(|err| {
            ClientError::Configuration(format!("invalid base_url '{}': {err}", self.base_url))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Configuration(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.token_key.is_empty() {
            return Err(ClientError::Configuration(
                "token_key must not be empty".into(),
            ));
        }

        Ok(())
    }
}

pub(crate) fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
