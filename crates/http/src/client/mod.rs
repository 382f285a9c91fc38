//! Booking API client

pub mod bookings;
pub mod config;
pub mod error;
pub mod interceptor;
pub mod notifications;
pub mod users;

pub use config::ClientConfig;
use error::ClientError;
use interceptor::{BearerAuth, EvictOnUnauthorized, Interceptor, UnauthorizedCallback};

use booking_core::Storage;
use reqwest::{Client, ClientBuilder, header};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Booking API client
///
/// Requests carry `Content-Type: application/json` and, when a token is
/// stored, `Authorization: Bearer <token>`. A 401 response removes the stored
/// token before the error is returned.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token_key: String,
    storage: Option<Arc<dyn Storage>>,
    interceptors: Arc<[Arc<dyn Interceptor>]>,
}

impl ApiClient {
    /// Create a client from the environment, without token storage
    pub fn new() -> Result<Self, ClientError> {
        Self::builder().build()
    }

    /// Create a new client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether token storage is available
    pub fn has_storage(&self) -> bool {
        self.storage.is_some()
    }

    /// Currently stored bearer token
    pub fn token(&self) -> Option<String> {
        interceptor::read_token(self.storage.as_deref(), &self.token_key)
    }

    /// Store a bearer token for subsequent requests
    ///
    /// Without storage the call is a no-op.
    pub fn set_token(&self, token: &str) -> Result<(), ClientError> {
        if let Some(storage) = &self.storage {
            storage.set_item(&self.token_key, token)?;
        }
        Ok(())
    }

    /// Forget the stored bearer token
    pub fn clear_token(&self) -> Result<(), ClientError> {
        if let Some(storage) = &self.storage {
            storage.remove_item(&self.token_key)?;
        }
        Ok(())
    }

    /// Create a request builder and run the request hooks on it
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.interceptors
            .iter()
            .fold(self.client.request(method, url), |request, hook| {
                hook.on_request(request)
            })
    }

    /// Execute a request and decode the JSON response
    ///
    /// Failures are passed to every error hook, then returned unchanged.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        match self.send(request).await {
            Ok(value) => Ok(value),
            Err(error) => {
                for hook in self.interceptors.iter() {
                    hook.on_error(&error);
                }
                Err(error)
            }
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await.inspect_err(|err| {
            debug!(error = %err, "request could not be sent");
        })?;
        let status = response.status();
        let url = response.url().path().to_string();

        if status.is_success() {
            let body = response.text().await?;
            debug!(%status, path = %url, "request succeeded");
            // Empty bodies decode as `null` so `()` and `Option<T>` work
            let body = if body.trim().is_empty() {
                "null"
            } else {
                body.as_str()
            };
            Ok(serde_json::from_str(body)?)
        } else {
            // The status decides the error; an unreadable body is treated as empty
            let body = response.text().await.unwrap_or_else(|err| {
                debug!(%status, path = %url, error = %err, "error body could not be read");
                String::new()
            });
            debug!(%status, path = %url, "request rejected by backend");
            Err(ClientError::from_status(status, &body))
        }
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token_key", &self.token_key)
            .field("has_storage", &self.storage.is_some())
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}

/// Builder for ApiClient
pub struct ApiClientBuilder {
    config: ClientConfig,
    storage: Option<Arc<dyn Storage>>,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self {
            config: ClientConfig::from_env(),
            storage: None,
            interceptors: Vec::new(),
        }
    }
}

impl ApiClientBuilder {
    /// Replace the whole configuration
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = config::normalize_base_url(&url.into());
        self
    }

    /// Set the storage key of the token slot
    pub fn token_key(mut self, key: impl Into<String>) -> Self {
        self.config.token_key = key.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set the storage holding the bearer token
    pub fn storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Register an additional hook, run after the built-in ones
    pub fn interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Run `callback` whenever the backend answers 401, after token eviction
    pub fn on_unauthorized(self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.interceptor(Arc::new(UnauthorizedCallback::new(callback)))
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let config = self.config;
        config.validate()?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let mut client_builder = ClientBuilder::new()
            .default_headers(headers)
            .user_agent(config.user_agent.as_str());

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build()?;

        let mut interceptors: Vec<Arc<dyn Interceptor>> = vec![
            Arc::new(BearerAuth::new(self.storage.clone(), &config.token_key)),
            Arc::new(EvictOnUnauthorized::new(
                self.storage.clone(),
                &config.token_key,
            )),
        ];
        interceptors.extend(self.interceptors);

        debug!(
            base_url = %config.base_url,
            has_storage = self.storage.is_some(),
            "api client configured"
        );

        Ok(ApiClient {
            client,
            base_url: config.base_url,
            token_key: config.token_key,
            storage: self.storage,
            interceptors: interceptors.into(),
        })
    }
}
