//! CLI settings

use anyhow::Result;
use booking_http::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix of environment overrides, e.g. `BOOKING__API__TIMEOUT_SECS`
const ENV_PREFIX: &str = "BOOKING";

/// Settings of the `booking` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// API connection settings
    pub api: ApiSettings,
    /// Local token storage
    pub storage: StorageSettings,
}

/// API connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the API gateway
    pub base_url: String,
    /// Request timeout in seconds (0 disables the timeout)
    pub timeout_secs: u64,
    /// Storage key of the bearer token
    pub token_key: String,
}

/// Local token storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// JSON file holding the stored token
    pub path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        let client = ClientConfig::from_env();
        Self {
            api: ApiSettings {
                base_url: client.base_url,
                timeout_secs: 30,
                token_key: client.token_key,
            },
            storage: StorageSettings {
                path: default_storage_path(),
            },
        }
    }
}

fn default_storage_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "booking")
        .map(|dirs| dirs.data_dir().join("storage.json"))
        .unwrap_or_else(|| PathBuf::from(".booking").join("storage.json"))
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment
    ///
    /// Later sources win: built-in defaults (which honour `PUBLIC_API_URL`),
    /// then the file, then `BOOKING__*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = config::Config::builder()
            .set_default("api.base_url", defaults.api.base_url)?
            .set_default("api.timeout_secs", defaults.api.timeout_secs)?
            .set_default("api.token_key", defaults.api.token_key)?
            .set_default(
                "storage.path",
                defaults.storage.path.to_string_lossy().to_string(),
            )?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Client configuration derived from these settings
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api.base_url.trim_end_matches('/').to_string(),
            token_key: self.api.token_key.clone(),
            timeout: (self.api.timeout_secs > 0)
                .then(|| Duration::from_secs(self.api.timeout_secs)),
            ..ClientConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("booking.toml");
        std::fs::write(
            &path,
            r#"
[api]
base_url = "https://booking.example.com/"
timeout_secs = 0

[storage]
path = "/tmp/booking-test/storage.json"
"#,
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.api.base_url, "https://booking.example.com/");
        assert_eq!(settings.api.token_key, "token");
        assert_eq!(
            settings.storage.path,
            PathBuf::from("/tmp/booking-test/storage.json")
        );

        let client = settings.client_config();
        assert_eq!(client.base_url, "https://booking.example.com");
        assert_eq!(client.timeout, None);
    }

    #[test]
    fn defaults_without_file() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.api.timeout_secs, 30);
        assert_eq!(
            settings.client_config().timeout,
            Some(Duration::from_secs(30))
        );
        assert!(settings.storage.path.ends_with("storage.json"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
