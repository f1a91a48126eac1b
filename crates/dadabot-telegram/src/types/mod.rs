//! Typed Bot API entities built from decoded JSON.
//!
//! Every entity is constructed once from a `serde_json::Value` and never
//! mutated afterwards. Required fields fail with [`MalformedPayload`];
//! optional fields fall back to their defaults.

mod fields;

#[cfg(test)]
mod tests;

use chrono::{DateTime, Utc};
use dadabot_core::error::{BotError, MalformedPayload};
use fields::Fields;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::error;

/// A message sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
}

impl TryFrom<&Value> for User {
    type Error = MalformedPayload;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let f = Fields::of("User", value)?;
        Ok(Self {
            id: f.required_i64("id")?,
            first_name: f.required_str("first_name")?,
            last_name: f.optional_str("last_name"),
            username: f.optional_str("username"),
        })
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "USER: {} {} {} {}",
            self.id, self.first_name, self.last_name, self.username
        )
    }
}

/// The conversation a message belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
    pub id: i64,
    /// "private", "group", "supergroup", or "channel".
    pub chat_type: String,
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub every1_admin: bool,
}

impl TryFrom<&Value> for Chat {
    type Error = MalformedPayload;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let f = Fields::of("Chat", value)?;
        Ok(Self {
            id: f.required_i64("id")?,
            chat_type: f.required_str("type")?,
            title: f.optional_str("title"),
            first_name: f.optional_str("first_name"),
            last_name: f.optional_str("last_name"),
            username: f.optional_str("username"),
            every1_admin: f.optional_bool("all_members_are_administrators"),
        })
    }
}

impl fmt::Display for Chat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CHAT: {} {} {} {}",
            self.id, self.chat_type, self.title, self.first_name
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sticker {
    pub file_id: String,
}

impl TryFrom<&Value> for Sticker {
    type Error = MalformedPayload;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let f = Fields::of("Sticker", value)?;
        Ok(Self {
            file_id: f.optional_str("file_id"),
        })
    }
}

/// A photo, reduced to its largest size variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub file_id: String,
}

impl TryFrom<&Value> for Photo {
    type Error = MalformedPayload;

    /// Expects the `photo` array. Sizes arrive in ascending resolution order,
    /// so the last element is the largest.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let sizes = value
            .as_array()
            .ok_or_else(|| MalformedPayload::wrong_type("Photo", "photo", "an array"))?;
        let largest = sizes
            .last()
            .ok_or_else(|| MalformedPayload::empty("Photo", "photo"))?;
        let f = Fields::of("PhotoSize", largest)?;
        Ok(Self {
            file_id: f.optional_str("file_id"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animation {
    pub file_id: String,
}

impl TryFrom<&Value> for Animation {
    type Error = MalformedPayload;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let f = Fields::of("Animation", value)?;
        Ok(Self {
            file_id: f.optional_str("file_id"),
        })
    }
}

/// The single media attachment a message may carry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Media {
    #[default]
    None,
    Sticker(Sticker),
    Photo(Photo),
    Animation(Animation),
}

impl Media {
    pub fn kind(&self) -> Option<MediaKind> {
        match self {
            Self::None => None,
            Self::Sticker(_) => Some(MediaKind::Sticker),
            Self::Photo(_) => Some(MediaKind::Photo),
            Self::Animation(_) => Some(MediaKind::Animation),
        }
    }

    pub fn file_id(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Sticker(s) => Some(&s.file_id),
            Self::Photo(p) => Some(&p.file_id),
            Self::Animation(a) => Some(&a.file_id),
        }
    }
}

impl fmt::Display for Media {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("NO MEDIA"),
            Self::Sticker(s) => write!(f, "STICKER: {}", s.file_id),
            Self::Photo(p) => write!(f, "PHOTO: {}", p.file_id),
            Self::Animation(a) => write!(f, "ANIM: {}", a.file_id),
        }
    }
}

/// Media types that can be sent back with `send_media`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Sticker,
    Photo,
    Animation,
}

impl MediaKind {
    /// Form parameter carrying the file id.
    pub fn param(&self) -> &'static str {
        match self {
            Self::Sticker => "sticker",
            Self::Photo => "photo",
            Self::Animation => "animation",
        }
    }

    /// Bot API method that sends this kind.
    pub fn method(&self) -> &'static str {
        match self {
            Self::Sticker => "sendSticker",
            Self::Photo => "sendPhoto",
            Self::Animation => "sendAnimation",
        }
    }
}

/// A media type name outside {"sticker", "photo", "animation"}.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown media type: {0}")]
pub struct UnknownMediaType(pub String);

impl FromStr for MediaKind {
    type Err = UnknownMediaType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sticker" => Ok(Self::Sticker),
            "photo" => Ok(Self::Photo),
            "animation" => Ok(Self::Animation),
            other => Err(UnknownMediaType(other.to_string())),
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: i64,
    /// Absent for channel posts.
    pub sender: Option<User>,
    /// Unix epoch seconds, `-1` when the payload has no date.
    pub date: i64,
    pub chat: Chat,
    pub text: String,
    pub media: Media,
}

impl Message {
    pub fn is_sticker(&self) -> bool {
        matches!(self.media, Media::Sticker(_))
    }

    pub fn is_photo(&self) -> bool {
        matches!(self.media, Media::Photo(_))
    }

    pub fn is_animation(&self) -> bool {
        matches!(self.media, Media::Animation(_))
    }

    pub fn is_media(&self) -> bool {
        self.media != Media::None
    }

    pub fn media_kind(&self) -> Option<MediaKind> {
        self.media.kind()
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        if self.date < 0 {
            return None;
        }
        DateTime::from_timestamp(self.date, 0)
    }
}

impl TryFrom<&Value> for Message {
    type Error = MalformedPayload;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let f = Fields::of("Message", value)?;

        let sender = f.get("from").map(User::try_from).transpose()?;
        let chat = Chat::try_from(f.required_object("chat")?)?;

        // Telegram also attaches `document` to animations; only one kind is kept.
        let media = if let Some(v) = f.get("sticker") {
            Media::Sticker(Sticker::try_from(v)?)
        } else if let Some(v) = f.get("animation") {
            Media::Animation(Animation::try_from(v)?)
        } else if let Some(v) = f.get("photo") {
            Media::Photo(Photo::try_from(v)?)
        } else {
            Media::None
        };

        Ok(Self {
            id: f.required_i64("message_id")?,
            sender,
            date: f.optional_i64("date", -1),
            chat,
            text: f.optional_str("text"),
            media,
        })
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sender = self.sender.as_ref().map_or("-", |u| u.first_name.as_str());
        write!(f, "MESSAGE: {} {} {}", self.id, sender, self.text)
    }
}

/// One unit of the Bot API update stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    /// Monotonically issued sequence number.
    pub id: i64,
    /// Other update kinds (edits, callbacks, ...) leave this empty.
    pub message: Option<Message>,
}

impl Update {
    pub fn has_message(&self) -> bool {
        self.message.is_some()
    }

    /// Parse a single update from raw JSON text.
    pub fn from_json(json: &str) -> Result<Self, BotError> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::try_from(&value)?)
    }

    /// The `update_id` of a raw update, even when the rest does not parse.
    pub fn raw_id(value: &Value) -> Option<i64> {
        Fields::of("Update", value)
            .and_then(|f| f.required_i64("update_id"))
            .ok()
    }

    /// Parse a `getUpdates` result array, skipping elements that fail to parse.
    pub fn parse_batch(values: &[Value]) -> Vec<Self> {
        values
            .iter()
            .filter_map(|v| match Self::try_from(v) {
                Ok(update) => Some(update),
                Err(e) => {
                    error!("skipping malformed update: {e}");
                    None
                }
            })
            .collect()
    }
}

impl TryFrom<&Value> for Update {
    type Error = MalformedPayload;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let f = Fields::of("Update", value)?;
        Ok(Self {
            id: f.required_i64("update_id")?,
            message: f.get("message").map(Message::try_from).transpose()?,
        })
    }
}

impl fmt::Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Update: {}", self.id)
    }
}
