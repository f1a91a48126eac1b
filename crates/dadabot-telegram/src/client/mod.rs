//! Telegram Bot API client.
//!
//! Outbound calls are thin passthroughs; inbound updates arrive either by
//! draining `getUpdates` or by feeding pushed webhook payloads one at a time.
//! Docs: <https://core.telegram.org/bots/api>

mod polling;
mod send;
mod webhook;


use crate::tracker::UpdateTracker;
use crate::transport::{ReqwestTransport, Transport};
use dadabot_core::config::TelegramConfig;
use dadabot_core::error::BotError;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Bot API client owning the update offset and dedup state.
pub struct TelegramClient {
    config: TelegramConfig,
    transport: Arc<dyn Transport>,
    /// Offset and seen ids change together, so one lock guards both.
    tracker: Mutex<UpdateTracker>,
}

impl TelegramClient {
    /// Create a client talking to the configured Bot API over HTTPS.
    pub fn new(config: TelegramConfig) -> Result<Self, BotError> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config.api_base_url, &config.api_key);
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over an arbitrary transport.
    pub fn with_transport(config: TelegramConfig, transport: Arc<dyn Transport>) -> Self {
        let tracker = UpdateTracker::new(config.seen_window);
        Self {
            config,
            transport,
            tracker: Mutex::new(tracker),
        }
    }

    pub fn config(&self) -> &TelegramConfig {
        &self.config
    }

    /// Smallest update id not yet acknowledged.
    pub async fn next_offset(&self) -> i64 {
        self.tracker.lock().await.next_offset()
    }
}
