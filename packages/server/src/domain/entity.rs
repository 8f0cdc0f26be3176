//! Entities.

use super::value_object::{MessageId, MessageText, Timestamp, Username};

/// Authenticated identity bound to one live connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: Username,
    pub joined_at: Timestamp,
}

impl Session {
    pub fn new(username: Username, joined_at: Timestamp) -> Self {
        Self {
            username,
            joined_at,
        }
    }
}

/// A chat message. Immutable once created; owned by the message log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub username: Username,
    pub text: MessageText,
    pub timestamp: Timestamp,
}
