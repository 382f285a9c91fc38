//! User account client methods

use super::{ApiClient, ClientError};
use crate::types::{LoginRequest, RegisterRequest, TokenResponse};
use reqwest::Method;
use serde_json::Value;
use tracing::info;

impl ApiClient {
    /// Register a new account
    pub async fn register(&self, request: &RegisterRequest) -> Result<Value, ClientError> {
        let req = self.request(Method::POST, "/users/register").json(request);
        self.execute(req).await
    }

    /// Log in and store the issued access token
    ///
    /// Without storage the token is only returned to the caller.
    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ClientError> {
        let req = self.request(Method::POST, "/users/login").json(request);
        let token: TokenResponse = self.execute(req).await?;
        self.set_token(&token.access_token)?;
        info!(stored = self.has_storage(), "logged in");
        Ok(token)
    }

    /// Forget the stored access token
    pub fn logout(&self) -> Result<(), ClientError> {
        self.clear_token()?;
        info!("logged out");
        Ok(())
    }
}
