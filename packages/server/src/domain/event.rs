//! Outbound events produced by the use cases.
//!
//! The infrastructure layer decides how an event is encoded on the wire;
//! see `infrastructure::dto::websocket::ServerMessage`.

use serde_json::{Map, Value};

use super::{entity::ChatMessage, value_object::Username};

/// Extra fields of a `call` request, forwarded as-is.
pub type CallFields = Map<String, Value>;

/// Event sent from the server to one or more connections.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    /// Backlog replayed to a newly connected client, oldest first
    History { messages: Vec<ChatMessage> },
    LoginSuccess {
        username: Username,
        online_count: usize,
    },
    LoginError { error: String },
    UserJoined {
        username: Username,
        online_count: usize,
    },
    NewMessage(ChatMessage),
    UserTyping { username: Username, is_typing: bool },
    /// Call signaling stub: no call state exists on the server
    CallRequest { from: Username, fields: CallFields },
    UserLeft {
        username: Username,
        online_count: usize,
    },
}

impl ServerEvent {
    /// Wire name of the event (`type` field).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::History { .. } => "history",
            Self::LoginSuccess { .. } => "login_success",
            Self::LoginError { .. } => "login_error",
            Self::UserJoined { .. } => "user_joined",
            Self::NewMessage(_) => "new_message",
            Self::UserTyping { .. } => "user_typing",
            Self::CallRequest { .. } => "call_request",
            Self::UserLeft { .. } => "user_left",
        }
    }
}
