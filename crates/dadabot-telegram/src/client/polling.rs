//! Inbound updates: the `getUpdates` drain loop and pushed payloads.

use super::TelegramClient;
use crate::tracker::Admission;
use crate::transport::Params;
use crate::types::Update;
use dadabot_core::error::BotError;
use serde_json::Value;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// One `getUpdates` round.
#[derive(Debug, Default)]
struct Batch {
    /// Raw elements in the result, parseable or not.
    fetched: usize,
    updates: Vec<Update>,
}

impl TelegramClient {
    /// Fetch one batch from `getUpdates` and advance the offset past it.
    ///
    /// The first request carries no offset. An `ok: false` answer is logged
    /// and treated as an empty batch.
    pub async fn get_updates(&self) -> Result<Vec<Update>, BotError> {
        Ok(self.fetch_batch().await?.updates)
    }

    async fn fetch_batch(&self) -> Result<Batch, BotError> {
        let offset = self.tracker.lock().await.poll_offset();
        let mut params: Params = Vec::new();
        if let Some(off) = offset {
            params.push(("offset", off.to_string()));
        }

        let resp = self.transport.get("getUpdates", &params).await?;
        let envelope = resp.envelope()?;

        if !envelope.ok {
            error!(
                "Cannot get updates: {}",
                envelope.description.as_deref().unwrap_or("No reason")
            );
            return Ok(Batch::default());
        }

        let items = match envelope.result {
            Some(Value::Array(items)) => items,
            Some(other) => {
                error!("getUpdates result is not an array: {other}");
                return Ok(Batch::default());
            }
            None => return Ok(Batch::default()),
        };

        // Updates that fail to parse are still acknowledged when their id is
        // readable, otherwise the service keeps returning them.
        let mut tracker = self.tracker.lock().await;
        for id in items.iter().filter_map(Update::raw_id) {
            tracker.acknowledge(id);
        }
        info!("Current offset: {}", tracker.next_offset());
        drop(tracker);

        Ok(Batch {
            fetched: items.len(),
            updates: Update::parse_batch(&items),
        })
    }

    /// Drain buffered updates, calling `handler` for each in arrival order.
    ///
    /// Returns once `getUpdates` comes back empty or `cancel` fires, with the
    /// number of updates handed to `handler`.
    pub async fn process_updates<F, Fut>(
        &self,
        cancel: &CancellationToken,
        mut handler: F,
    ) -> Result<usize, BotError>
    where
        F: FnMut(Update) -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut delivered = 0;

        loop {
            if cancel.is_cancelled() {
                info!("update polling cancelled");
                break;
            }

            let batch = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("update polling cancelled");
                    break;
                }
                batch = self.fetch_batch() => batch?,
            };

            info!("Updates: {} ({} fetched)", batch.updates.len(), batch.fetched);
            if batch.fetched == 0 {
                break;
            }

            for update in batch.updates {
                handler(update).await;
                delivered += 1;
            }
        }

        Ok(delivered)
    }

    /// Handle one pushed webhook body. Returns whether `handler` ran.
    pub async fn process_update_json<F, Fut>(
        &self,
        payload: &str,
        handler: F,
    ) -> Result<bool, BotError>
    where
        F: FnOnce(Update) -> Fut,
        Fut: Future<Output = ()>,
    {
        let update = Update::from_json(payload)?;
        Ok(self.process_update(update, handler).await)
    }

    /// Like [`Self::process_update_json`] for an already decoded body.
    pub async fn process_update_value<F, Fut>(
        &self,
        payload: &Value,
        handler: F,
    ) -> Result<bool, BotError>
    where
        F: FnOnce(Update) -> Fut,
        Fut: Future<Output = ()>,
    {
        let update = Update::try_from(payload)?;
        Ok(self.process_update(update, handler).await)
    }

    async fn process_update<F, Fut>(&self, update: Update, handler: F) -> bool
    where
        F: FnOnce(Update) -> Fut,
        Fut: Future<Output = ()>,
    {
        let (admission, offset) = {
            let mut tracker = self.tracker.lock().await;
            let admission = tracker.admit(update.id);
            (admission, tracker.next_offset())
        };

        match admission {
            Admission::Duplicate => {
                warn!(
                    "Discarded update with id: {}. Already processed. offset is: {offset}",
                    update.id
                );
                false
            }
            Admission::Fresh => {
                debug!("handling pushed update {} (offset {offset})", update.id);
                handler(update).await;
                true
            }
        }
    }
}
