//! Webhook receiver: Telegram POSTs each update to `/{api_key}`.

use crate::bot;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use dadabot_telegram::TelegramClient;
use std::sync::Arc;
use tracing::{error, warn};

/// Build the webhook router.
pub fn router(client: Arc<TelegramClient>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/{token}", post(receive))
        .with_state(client)
}

async fn health() -> &'static str {
    "ok"
}

async fn receive(
    State(client): State<Arc<TelegramClient>>,
    Path(token): Path<String>,
    body: String,
) -> StatusCode {
    if !constant_time_eq(&token, &client.config().api_key) {
        warn!("webhook call with unknown token rejected");
        return StatusCode::NOT_FOUND;
    }

    // Telegram redelivers on non-2xx, so bad payloads are acknowledged anyway.
    if let Err(e) = client
        .process_update_json(&body, |update| bot::respond(&client, update))
        .await
    {
        error!("webhook payload rejected: {e}");
    }
    StatusCode::OK
}

/// Constant-time string comparison for the webhook path token.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
