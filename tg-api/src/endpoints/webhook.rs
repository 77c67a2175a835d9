//! Webhook registration endpoints.

use serde::Serialize;
use tg_core::error::TgResult;
use crate::client::ApiClient;

#[derive(Serialize)]
struct SetWebhookParams<'a> {
    url: &'a str,
}

impl ApiClient {
    /// Register an HTTPS url that receives updates via an outgoing webhook.
    pub async fn set_webhook(&self, url: &str) -> TgResult<serde_json::Value> {
        self.request("setWebhook", &SetWebhookParams { url }).await
    }

    /// Remove the webhook by registering an empty url.
    pub async fn remove_webhook(&self) -> TgResult<serde_json::Value> {
        self.set_webhook("").await
    }
}
