//! Webhook registration for push delivery.

use super::TelegramClient;
use crate::transport::{ApiResponse, Params};
use dadabot_core::error::BotError;
use tracing::{info, warn};

impl TelegramClient {
    /// Register `https://{app_name}.{webhook_host}/{api_key}` as the callback URL.
    pub async fn set_webhook(&self) -> Result<ApiResponse, BotError> {
        let url = self.config.webhook_url();
        info!(
            "Setting webhook: https://{}.{}/<api_key>",
            self.config.app_name, self.config.webhook_host
        );

        let params: Params = vec![("url", url)];
        let resp = self.transport.post("setWebhook", &params).await?;
        info!("setWebhook response: {}", resp.body);
        if !resp.is_success() {
            warn!("setWebhook status code: {}", resp.status);
        }
        Ok(resp)
    }

    /// Remove the webhook. Returns the `result` flag, `false` when absent.
    pub async fn delete_webhook(&self) -> Result<bool, BotError> {
        let resp = self.transport.get("deleteWebhook", &Vec::new()).await?;
        let envelope = resp.envelope()?;
        let removed = envelope
            .result
            .as_ref()
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        info!("deleteWebhook result: {removed}");
        Ok(removed)
    }
}
