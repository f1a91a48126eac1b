//! Tests for Bot API entity construction.

use super::*;
use dadabot_core::error::PayloadProblem;
use serde_json::json;

fn private_chat() -> Value {
    json!({"id": 100, "type": "private", "first_name": "Ada"})
}

#[test]
fn test_user_required_and_optional_fields() {
    let user = User::try_from(&json!({"id": 7, "first_name": "Ada"})).unwrap();
    assert_eq!(user.id, 7);
    assert_eq!(user.first_name, "Ada");
    assert_eq!(user.last_name, "");
    assert_eq!(user.username, "");

    let err = User::try_from(&json!({"first_name": "Ada"})).unwrap_err();
    assert_eq!(err, MalformedPayload::missing("User", "id"));
}

#[test]
fn test_id_coerces_numeric_strings() {
    let user = User::try_from(&json!({"id": "42", "first_name": "Ada"})).unwrap();
    assert_eq!(user.id, 42);

    let err = User::try_from(&json!({"id": "forty-two", "first_name": "Ada"})).unwrap_err();
    assert_eq!(
        err.problem,
        PayloadProblem::WrongType {
            expected: "an integer"
        }
    );
}

#[test]
fn test_chat_requires_type() {
    let err = Chat::try_from(&json!({"id": 1})).unwrap_err();
    assert_eq!(err, MalformedPayload::missing("Chat", "type"));

    let chat = Chat::try_from(&json!({
        "id": -100123,
        "type": "supergroup",
        "title": "Dada",
        "all_members_are_administrators": true
    }))
    .unwrap();
    assert_eq!(chat.chat_type, "supergroup");
    assert_eq!(chat.title, "Dada");
    assert!(chat.every1_admin);
}

#[test]
fn test_chat_every1_admin_defaults_false() {
    let chat = Chat::try_from(&private_chat()).unwrap();
    assert_eq!(chat.chat_type, "private");
    assert!(!chat.every1_admin);
    assert_eq!(chat.username, "");
}

#[test]
fn test_message_text_only() {
    let msg = Message::try_from(&json!({
        "message_id": 2,
        "from": {"id": 7, "first_name": "Ada"},
        "date": 1_700_000_000,
        "chat": private_chat(),
        "text": "hello"
    }))
    .unwrap();
    assert_eq!(msg.text, "hello");
    assert_eq!(msg.date, 1_700_000_000);
    assert!(msg.timestamp().is_some());
    assert!(!msg.is_media());
    assert_eq!(msg.media_kind(), None);
    assert_eq!(msg.sender.unwrap().first_name, "Ada");
}

#[test]
fn test_message_defaults_when_optional_fields_missing() {
    let msg = Message::try_from(&json!({"message_id": 3, "chat": private_chat()})).unwrap();
    assert!(msg.sender.is_none());
    assert_eq!(msg.date, -1);
    assert!(msg.timestamp().is_none());
    assert_eq!(msg.text, "");
    assert_eq!(msg.media, Media::None);
}

#[test]
fn test_message_requires_chat() {
    let err = Message::try_from(&json!({"message_id": 3})).unwrap_err();
    assert_eq!(err, MalformedPayload::missing("Message", "chat"));
}

#[test]
fn test_message_photo_selects_last_size() {
    let msg = Message::try_from(&json!({
        "message_id": 4,
        "chat": private_chat(),
        "photo": [
            {"file_id": "small", "width": 90, "height": 90},
            {"file_id": "medium", "width": 320, "height": 320},
            {"file_id": "large", "width": 800, "height": 800}
        ]
    }))
    .unwrap();
    assert!(msg.is_photo());
    assert!(msg.is_media());
    assert_eq!(msg.media.file_id(), Some("large"));
}

#[test]
fn test_photo_empty_sequence_is_malformed() {
    let err = Photo::try_from(&json!([])).unwrap_err();
    assert_eq!(err, MalformedPayload::empty("Photo", "photo"));

    let err = Message::try_from(&json!({
        "message_id": 5,
        "chat": private_chat(),
        "photo": []
    }))
    .unwrap_err();
    assert_eq!(err.problem, PayloadProblem::Empty);
}

#[test]
fn test_message_sticker_and_animation() {
    let sticker = Message::try_from(&json!({
        "message_id": 6,
        "chat": private_chat(),
        "sticker": {"file_id": "stk"}
    }))
    .unwrap();
    assert!(sticker.is_sticker());
    assert_eq!(sticker.media_kind(), Some(MediaKind::Sticker));

    let anim = Message::try_from(&json!({
        "message_id": 7,
        "chat": private_chat(),
        "animation": {"file_id": "gif"},
        "document": {"file_id": "gif"}
    }))
    .unwrap();
    assert!(anim.is_animation());
    assert!(!anim.is_sticker());
    assert_eq!(anim.media, Media::Animation(Animation { file_id: "gif".into() }));
}

#[test]
fn test_update_with_and_without_message() {
    let upd = Update::try_from(&json!({
        "update_id": 10,
        "message": {"message_id": 1, "chat": private_chat(), "text": "hi"}
    }))
    .unwrap();
    assert!(upd.has_message());

    let edit = Update::try_from(&json!({
        "update_id": 11,
        "edited_message": {"message_id": 1, "chat": private_chat()}
    }))
    .unwrap();
    assert!(!edit.has_message());

    let err = Update::try_from(&json!({"message": null})).unwrap_err();
    assert_eq!(err, MalformedPayload::missing("Update", "update_id"));
}

#[test]
fn test_update_from_json_text() {
    let upd = Update::from_json(r#"{"update_id": 12}"#).unwrap();
    assert_eq!(upd.id, 12);

    assert!(matches!(
        Update::from_json("not json"),
        Err(BotError::Serialization(_))
    ));
    assert!(matches!(
        Update::from_json("[1, 2]"),
        Err(BotError::MalformedPayload(_))
    ));
}

#[test]
fn test_parse_batch_skips_malformed() {
    let batch = vec![
        json!({"update_id": 1}),
        json!({"no_id": true}),
        json!({"update_id": 3, "message": {"message_id": 1}}),
        json!({"update_id": 4}),
    ];
    let ids: Vec<i64> = Update::parse_batch(&batch).iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 4]);
}

#[test]
fn test_raw_id_survives_malformed_body() {
    let bad = json!({"update_id": 2, "message": {"message_id": 5}});
    assert!(Update::try_from(&bad).is_err());
    assert_eq!(Update::raw_id(&bad), Some(2));
    assert_eq!(Update::raw_id(&json!({"update_id": "7"})), Some(7));
    assert_eq!(Update::raw_id(&json!({"message": {}})), None);
    assert_eq!(Update::raw_id(&json!([1])), None);
}

#[test]
fn test_media_kind_from_str() {
    assert_eq!("sticker".parse::<MediaKind>(), Ok(MediaKind::Sticker));
    assert_eq!("photo".parse::<MediaKind>().unwrap().method(), "sendPhoto");
    assert_eq!(
        "animation".parse::<MediaKind>().unwrap().param(),
        "animation"
    );
    assert_eq!(
        "video".parse::<MediaKind>(),
        Err(UnknownMediaType("video".into()))
    );
}

#[test]
fn test_display_summaries() {
    let msg = Message::try_from(&json!({
        "message_id": 8,
        "chat": {"id": -5, "type": "channel", "title": "news"},
        "text": "post"
    }))
    .unwrap();
    assert_eq!(msg.to_string(), "MESSAGE: 8 - post");
    assert_eq!(msg.chat.to_string(), "CHAT: -5 channel news ");
    assert_eq!(Update { id: 3, message: None }.to_string(), "Update: 3");
    assert_eq!(
        Media::Photo(Photo { file_id: "p".into() }).to_string(),
        "PHOTO: p"
    );
}
