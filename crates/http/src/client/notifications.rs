//! Notification client methods

use super::{ApiClient, ClientError};
use reqwest::Method;
use serde_json::Value;

impl ApiClient {
    /// Notifications addressed to a user
    pub async fn user_notifications(&self, user_id: i64) -> Result<Vec<Value>, ClientError> {
        let request = self.request(Method::GET, &format!("/notifications/user/{user_id}"));
        self.execute(request).await
    }
}
