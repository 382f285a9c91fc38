//! Request and error hooks
//!
//! Every request built by [`ApiClient`](super::ApiClient) passes through each
//! registered interceptor's [`Interceptor::on_request`], and every failed
//! request through [`Interceptor::on_error`] before the error is returned to
//! the caller. Hooks observe and decorate; they cannot swallow an error.

use super::error::ClientError;
use booking_core::Storage;
use reqwest::RequestBuilder;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Hook invoked around every request
pub trait Interceptor: Send + Sync {
    /// Decorate an outbound request
    fn on_request(&self, request: RequestBuilder) -> RequestBuilder {
        request
    }

    /// Observe a failed request; the error is propagated afterwards
    fn on_error(&self, _error: &ClientError) {}
}

/// Read the bearer token from `storage`
///
/// Missing storage, an empty slot and read failures all count as "no token".
pub(crate) fn read_token(storage: Option<&dyn Storage>, token_key: &str) -> Option<String> {
    match storage?.get_item(token_key) {
        Ok(token) => token.filter(|token| !token.is_empty()),
        Err(err) => {
            warn!(error = %err, "failed to read auth token from storage");
            None
        }
    }
}

/// Attaches `Authorization: Bearer <token>` when a token is stored
pub struct BearerAuth {
    storage: Option<Arc<dyn Storage>>,
    token_key: String,
}

impl BearerAuth {
    /// Create the hook; without storage it leaves requests untouched
    pub fn new(storage: Option<Arc<dyn Storage>>, token_key: impl Into<String>) -> Self {
        Self {
            storage,
            token_key: token_key.into(),
        }
    }
}

impl fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuth")
            .field("has_storage", &self.storage.is_some())
            .field("token_key", &self.token_key)
            .finish()
    }
}

impl Interceptor for BearerAuth {
    fn on_request(&self, request: RequestBuilder) -> RequestBuilder {
        let Some(token) = read_token(self.storage.as_deref(), &self.token_key) else {
            return request;
        };

        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.header(AUTHORIZATION, value)
            }
            Err(_) => {
                warn!("stored auth token is not a valid header value, sending request without it");
                request
            }
        }
    }
}

/// Removes the stored token when the backend answers 401
pub struct EvictOnUnauthorized {
    storage: Option<Arc<dyn Storage>>,
    token_key: String,
}

impl EvictOnUnauthorized {
    /// Create the hook; without storage it does nothing
    pub fn new(storage: Option<Arc<dyn Storage>>, token_key: impl Into<String>) -> Self {
        Self {
            storage,
            token_key: token_key.into(),
        }
    }
}

impl fmt::Debug for EvictOnUnauthorized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvictOnUnauthorized")
            .field("has_storage", &self.storage.is_some())
            .field("token_key", &self.token_key)
            .finish()
    }
}

impl Interceptor for EvictOnUnauthorized {
    fn on_error(&self, error: &ClientError) {
        if !error.is_unauthorized() {
            return;
        }
        let Some(storage) = &self.storage else {
            debug!("unauthorized response without token storage, nothing to evict");
            return;
        };

        match storage.remove_item(&self.token_key) {
            Ok(()) => info!("backend rejected credentials, stored auth token removed"),
            Err(err) => warn!(error = %err, "failed to remove auth token from storage"),
        }
    }
}

/// Runs a caller-supplied callback on every 401
///
/// This is where a UI hooks its redirect to the login screen.
pub struct UnauthorizedCallback {
    callback: Box<dyn Fn() + Send + Sync>,
}

impl UnauthorizedCallback {
    pub fn new(callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            callback: Box::new(callback),
        }
    }
}

impl fmt::Debug for UnauthorizedCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnauthorizedCallback").finish_non_exhaustive()
    }
}

impl Interceptor for UnauthorizedCallback {
    fn on_error(&self, error: &ClientError) {
        if error.is_unauthorized() {
            (self.callback)();
        }
    }
}
