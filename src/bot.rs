//! Echo behaviour: answer each message with its own text or media.

use dadabot_telegram::types::{MediaKind, Message, Update};
use dadabot_telegram::TelegramClient;
use tracing::{debug, error};

/// What the bot sends back for one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Media(MediaKind, String),
}

/// Media wins over text; an empty message gets no reply.
pub fn reply_for(msg: &Message) -> Option<Reply> {
    if let (Some(kind), Some(file_id)) = (msg.media_kind(), msg.media.file_id()) {
        return Some(Reply::Media(kind, file_id.to_string()));
    }
    if msg.text.is_empty() {
        return None;
    }
    Some(Reply::Text(msg.text.clone()))
}

/// Update handler shared by polling and webhook delivery.
pub async fn respond(client: &TelegramClient, update: Update) {
    let Some(msg) = update.message else {
        debug!("update {} carries no message", update.id);
        return;
    };
    match msg.timestamp() {
        Some(sent) => debug!("{msg} ({} chat, sent {sent})", msg.chat.chat_type),
        None => debug!("{msg} ({} chat)", msg.chat.chat_type),
    }

    let Some(reply) = reply_for(&msg) else {
        return;
    };

    let result = match reply {
        Reply::Text(text) => client.send_message(msg.chat.id, &text, msg.id).await,
        Reply::Media(kind, file_id) => {
            client
                .send_media_kind(msg.chat.id, kind, &file_id, msg.id)
                .await
        }
    };

    if let Err(e) = result {
        error!("reply to message {} in chat {} failed: {e}", msg.id, msg.chat.id);
    }
}
