//! Telegram Bot API payloads.
//!
//! Only the fields the bot reads are modelled. Unknown fields in responses are
//! ignored; missing required fields fail decoding.

use serde::{Deserialize, Serialize};

/// Envelope wrapping every Bot API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

impl<T> ApiResponse<Vec<T>> {
    /// Items of a list result, empty when the call failed or returned nothing.
    pub fn items(&self) -> &[T] {
        self.result.as_deref().unwrap_or(&[])
    }
}

/// A single inbound event from `getUpdates`.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
    /// Forum topic the message belongs to, if any.
    pub message_thread_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
    /// Chat type: "private", "group", "supergroup", or "channel".
    #[serde(default, rename = "type")]
    pub chat_type: String,
}

/// Body of a `sendMessage` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub chat_id: i64,
    pub text: String,
    /// Forum topic to post into. Zero means the chat's main thread.
    #[serde(rename = "message_thread_id", skip_serializing_if = "no_thread")]
    pub thread_id: i64,
}

impl OutboundMessage {
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            thread_id: 0,
        }
    }

    /// Post into a forum topic. Ids of zero or below leave the message in the main thread.
    pub fn in_thread(mut self, thread_id: i64) -> Self {
        self.thread_id = thread_id;
        self
    }
}

fn no_thread(thread_id: &i64) -> bool {
    *thread_id <= 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outbound_without_thread_omits_field() {
        let body = serde_json::to_value(OutboundMessage::new(42, "hola")).unwrap();
        assert_eq!(body, json!({"chat_id": 42, "text": "hola"}));
    }

    #[test]
    fn test_outbound_with_thread_includes_field() {
        let body = serde_json::to_value(OutboundMessage::new(42, "hola").in_thread(5)).unwrap();
        assert_eq!(
            body,
            json!({"chat_id": 42, "text": "hola", "message_thread_id": 5})
        );
    }

    #[test]
    fn test_outbound_negative_thread_is_omitted() {
        let body = serde_json::to_value(OutboundMessage::new(1, "x").in_thread(-3)).unwrap();
        assert!(body.get("message_thread_id").is_none());
    }

    #[test]
    fn test_update_with_text_message() {
        let json = r#"{
            "update_id": 1000,
            "message": {
                "message_id": 7,
                "from": {"id": 9, "is_bot": false, "first_name": "Ana", "username": "ana"},
                "chat": {"id": -100, "type": "supergroup"},
                "date": 1700000000,
                "text": "/hora"
            }
        }"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert_eq!(update.update_id, 1000);
        let msg = update.message.unwrap();
        assert_eq!(msg.text.as_deref(), Some("/hora"));
        assert_eq!(msg.chat.chat_type, "supergroup");
        assert_eq!(msg.from.unwrap().username.as_deref(), Some("ana"));
        assert!(msg.message_thread_id.is_none());
    }

    #[test]
    fn test_update_without_message() {
        let update: Update =
            serde_json::from_str(r#"{"update_id": 5, "edited_message": {}}"#).unwrap();
        assert!(update.message.is_none());
    }

    #[test]
    fn test_update_missing_id_is_rejected() {
        let result: Result<Update, _> = serde_json::from_str(r#"{"message": null}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_failed_response_has_no_items() {
        let resp: ApiResponse<Vec<Update>> = serde_json::from_str(
            r#"{"ok": false, "error_code": 409, "description": "Conflict"}"#,
        )
        .unwrap();
        assert!(!resp.ok);
        assert!(resp.items().is_empty());
        assert_eq!(resp.error_code, Some(409));
    }
}
