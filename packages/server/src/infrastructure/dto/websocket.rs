//! WebSocket frame DTOs.
//!
//! Every frame is a JSON object whose `type` field names the event.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Frame sent from a client to the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    Login { username: String },
    Message { text: String },
    Typing { is_typing: bool },
    /// Arbitrary fields, forwarded to everyone as `call_request`
    Call(Map<String, Value>),
}

/// Frame sent from the server to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    History {
        messages: Vec<ChatMessageDto>,
    },
    LoginSuccess {
        username: String,
        online_count: usize,
    },
    LoginError {
        error: String,
    },
    UserJoined {
        username: String,
        online_count: usize,
    },
    NewMessage {
        id: i64,
        username: String,
        text: String,
        timestamp: String,
    },
    UserTyping {
        username: String,
        is_typing: bool,
    },
    CallRequest {
        from: String,
        #[serde(flatten)]
        fields: Map<String, Value>,
    },
    UserLeft {
        username: String,
        online_count: usize,
    },
}

/// Marker for history entries, serialized as `"type": "message"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMessageKind {
    Message,
}

/// Chat message as stored in the history replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    pub id: i64,
    pub username: String,
    pub text: String,
    /// ISO-8601 (e.g. `2024-01-01T00:00:00.000Z`)
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: ChatMessageKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_login_frame() {
        // テスト項目: login フレームが解析できる
        // given (前提条件):
        let frame = r#"{"type":"login","username":"alice"}"#;

        // when (操作):
        let result: ClientMessage = serde_json::from_str(frame).unwrap();

        // then (期待する結果):
        assert_eq!(
            result,
            ClientMessage::Login {
                username: "alice".to_string()
            }
        );
    }

    #[test]
    fn test_parse_typing_frame_uses_camel_case() {
        // テスト項目: typing フレームの isTyping（camelCase）が解析できる
        // given (前提条件):
        let frame = r#"{"type":"typing","isTyping":true}"#;

        // when (操作):
        let result: ClientMessage = serde_json::from_str(frame).unwrap();

        // then (期待する結果):
        assert_eq!(result, ClientMessage::Typing { is_typing: true });
    }

    #[test]
    fn test_parse_call_frame_keeps_arbitrary_fields() {
        // テスト項目: call フレームの任意フィールドが保持され、type は含まれない
        // given (前提条件):
        let frame = r#"{"type":"call","target":"bob","media":{"video":false}}"#;

        // when (操作):
        let result: ClientMessage = serde_json::from_str(frame).unwrap();

        // then (期待する結果):
        let ClientMessage::Call(fields) = result else {
            panic!("expected call frame");
        };
        assert_eq!(fields.get("target"), Some(&json!("bob")));
        assert_eq!(fields.get("media"), Some(&json!({"video": false})));
        assert!(!fields.contains_key("type"));
    }

    #[test]
    fn test_parse_rejects_malformed_frames() {
        // テスト項目: 不正なフレーム（JSON 以外・未知の type・必須フィールド欠落）はエラーになる
        // given (前提条件):
        let frames = [
            "hello",
            r#"{"type":"dance"}"#,
            r#"{"type":"message"}"#,
            r#"{"username":"alice"}"#,
        ];

        // when (操作):
        let results: Vec<bool> = frames
            .iter()
            .map(|f| serde_json::from_str::<ClientMessage>(f).is_err())
            .collect();

        // then (期待する結果):
        assert!(results.iter().all(|is_err| *is_err));
    }

    #[test]
    fn test_serialize_login_success() {
        // テスト項目: login_success が onlineCount（camelCase）付きでシリアライズされる
        // given (前提条件):
        let message = ServerMessage::LoginSuccess {
            username: "alice".to_string(),
            online_count: 1,
        };

        // when (操作):
        let value = serde_json::to_value(&message).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({"type": "login_success", "username": "alice", "onlineCount": 1})
        );
    }

    #[test]
    fn test_serialize_new_message_has_single_type_field() {
        // テスト項目: new_message の type フィールドは new_message のみ
        // given (前提条件):
        let message = ServerMessage::NewMessage {
            id: 42,
            username: "alice".to_string(),
            text: "hi".to_string(),
            timestamp: "2024-01-01T00:00:00.000Z".to_string(),
        };

        // when (操作):
        let json = serde_json::to_string(&message).unwrap();

        // then (期待する結果):
        assert_eq!(json.matches("\"type\"").count(), 1);
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "new_message",
                "id": 42,
                "username": "alice",
                "text": "hi",
                "timestamp": "2024-01-01T00:00:00.000Z"
            })
        );
    }

    #[test]
    fn test_serialize_history_entries_carry_message_type() {
        // テスト項目: history の各メッセージに type: "message" が付く
        // given (前提条件):
        let message = ServerMessage::History {
            messages: vec![ChatMessageDto {
                id: 1,
                username: "bob".to_string(),
                text: "yo".to_string(),
                timestamp: "2024-01-01T00:00:00.000Z".to_string(),
                kind: ChatMessageKind::Message,
            }],
        };

        // when (操作):
        let value = serde_json::to_value(&message).unwrap();

        // then (期待する結果):
        assert_eq!(value["type"], json!("history"));
        assert_eq!(value["messages"][0]["type"], json!("message"));
        assert_eq!(value["messages"][0]["username"], json!("bob"));
    }

    #[test]
    fn test_call_request_round_trips_through_client_parser() {
        // テスト項目: call_request はフラットなフィールドとして送られ、クライアント側で再解析できる
        // given (前提条件):
        let mut fields = Map::new();
        fields.insert("note".to_string(), json!("ring"));
        let message = ServerMessage::CallRequest {
            from: "alice".to_string(),
            fields,
        };

        // when (操作):
        let json = serde_json::to_string(&message).unwrap();
        let parsed: ServerMessage = serde_json::from_str(&json).unwrap();

        // then (期待する結果):
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            json!({"type": "call_request", "from": "alice", "note": "ring"})
        );
        assert_eq!(parsed, message);
    }
}
