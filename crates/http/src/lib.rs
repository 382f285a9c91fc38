//! Booking API client
//!
//! A thin wrapper over `reqwest` that attaches the stored bearer token to
//! every request, evicts it when the backend answers 401, and turns any
//! failure into a message that is safe to show to end users.

pub mod error_messages;
pub mod types;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "client")]
pub use client::{ApiClient, ApiClientBuilder, ClientConfig, error::ClientError};
pub use error_messages::{extract_error_code, normalize_error};
