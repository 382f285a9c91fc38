//! Client error types

use crate::error_messages::{extract_error_code, normalize_error};
use booking_core::CoreError;
use serde_json::{Value, json};
use std::fmt;
use thiserror::Error;

/// Body and status of a non-2xx response
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPayload {
    /// HTTP status code
    pub status: u16,
    /// Parsed JSON body, the raw text as a JSON string when the body is not
    /// JSON, or `null` when it is empty
    pub data: Value,
}

impl ErrorPayload {
    /// Build a payload from a raw response body
    pub fn from_body(status: u16, body: &str) -> Self {
        let data = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
        };
        Self { status, data }
    }

    /// The untyped view consumed by [`normalize_error`]
    pub fn to_error_value(&self) -> Value {
        json!({
            "message": format!("Request failed with status code {}", self.status),
            "response": {
                "status": self.status,
                "data": self.data,
            },
        })
    }

    fn reason(&self) -> &'static str {
        reqwest::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("Request failed")
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&normalize_error(&self.to_error_value(), self.reason()))
    }
}

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Bad request (400, 422 and other 4xx without a dedicated variant)
    #[error("Bad request: {0}")]
    BadRequest(ErrorPayload),

    /// Authentication failed (401)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(ErrorPayload),

    /// Forbidden (403)
    #[error("Forbidden: {0}")]
    Forbidden(ErrorPayload),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(ErrorPayload),

    /// Server returned an error status
    #[error("Server error {}: {}", .0.status, .0)]
    ServerError(ErrorPayload),

    /// Response body could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Token storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] CoreError),
}

impl ClientError {
    /// Create error from HTTP status code and raw response body
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let payload = ErrorPayload::from_body(status.as_u16(), body);
        match status.as_u16() {
            401 => Self::AuthenticationFailed(payload),
            403 => Self::Forbidden(payload),
            404 => Self::NotFound(payload),
            400..=499 => Self::BadRequest(payload),
            _ => Self::ServerError(payload),
        }
    }

    /// Response payload, for errors reported by the backend
    pub fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            Self::BadRequest(payload)
            | Self::AuthenticationFailed(payload)
            | Self::Forbidden(payload)
            | Self::NotFound(payload)
            | Self::ServerError(payload) => Some(payload),
            _ => None,
        }
    }

    /// HTTP status of the failed response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request(err) => err.status().map(|status| status.as_u16()),
            _ => self.payload().map(|payload| payload.status),
        }
    }

    /// Whether the backend rejected the credentials (401)
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Untyped view of this error: `{ message, response?: { status, data } }`
    pub fn to_error_value(&self) -> Value {
        if let Some(payload) = self.payload() {
            return payload.to_error_value();
        }

        let message = match self {
            Self::Request(err) => transport_message(err),
            Self::Serialization(_) => "Unexpected response from server".to_string(),
            Self::Configuration(message) => message.clone(),
            Self::Storage(err) => err.to_string(),
            _ => String::new(),
        };
        json!({ "message": message })
    }

    /// Display-safe message, falling back to `default_message`
    pub fn user_message(&self, default_message: &str) -> String {
        normalize_error(&self.to_error_value(), default_message)
    }

    /// Machine-readable error code sent by the backend
    pub fn code(&self) -> Option<String> {
        self.payload()
            .and_then(|payload| extract_error_code(&payload.to_error_value()))
    }
}

fn transport_message(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "Request timed out".to_string()
    } else if err.is_connect() {
        "Network Error".to_string()
    } else {
        err.to_string()
    }
}
