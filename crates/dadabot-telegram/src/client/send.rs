//! Outbound messages: text and media resends by file id.

use super::TelegramClient;
use crate::transport::{ApiResponse, Params};
use crate::types::MediaKind;
use dadabot_core::error::BotError;
use tracing::{error, info, warn};

impl TelegramClient {
    /// Send `text` to `chat_id`. A non-zero `reply_to_id` makes it a reply.
    ///
    /// Non-success statuses are logged and returned, not raised.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_to_id: i64,
    ) -> Result<ApiResponse, BotError> {
        let mut params: Params = vec![("chat_id", chat_id.to_string()), ("text", text.to_string())];
        push_reply(&mut params, reply_to_id);

        let resp = self.transport.post("sendMessage", &params).await?;
        log_response("sendMessage", &resp);
        Ok(resp)
    }

    /// Resend an already uploaded file by id.
    ///
    /// `media_type` must be "sticker", "photo" or "animation". Anything else is
    /// logged and skipped without a network call, yielding `Ok(None)`.
    pub async fn send_media(
        &self,
        chat_id: i64,
        media_type: &str,
        file_id: &str,
        reply_to_id: i64,
    ) -> Result<Option<ApiResponse>, BotError> {
        let kind: MediaKind = match media_type.parse() {
            Ok(k) => k,
            Err(e) => {
                error!("send_media: {e}");
                return Ok(None);
            }
        };
        self.send_media_kind(chat_id, kind, file_id, reply_to_id)
            .await
            .map(Some)
    }

    pub async fn send_media_kind(
        &self,
        chat_id: i64,
        kind: MediaKind,
        file_id: &str,
        reply_to_id: i64,
    ) -> Result<ApiResponse, BotError> {
        let mut params: Params = vec![
            ("chat_id", chat_id.to_string()),
            (kind.param(), file_id.to_string()),
        ];
        push_reply(&mut params, reply_to_id);

        let resp = self.transport.post(kind.method(), &params).await?;
        log_response(kind.method(), &resp);
        Ok(resp)
    }
}

fn push_reply(params: &mut Params, reply_to_id: i64) {
    if reply_to_id != 0 {
        params.push(("reply_to_message_id", reply_to_id.to_string()));
    }
}

fn log_response(method: &str, resp: &ApiResponse) {
    info!("{method} response: {}", resp.body);
    if !resp.is_success() {
        warn!("{method} status code: {}", resp.status);
    }
}
