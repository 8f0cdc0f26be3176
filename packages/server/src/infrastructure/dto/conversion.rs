//! Conversion logic between domain models and DTOs.

use crate::domain::{ChatMessage, ServerEvent};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// Domain → DTO
// ========================================

impl From<&ChatMessage> for dto::ChatMessageDto {
    fn from(model: &ChatMessage) -> Self {
        Self {
            id: model.id.value(),
            username: model.username.as_str().to_string(),
            text: model.text.as_str().to_string(),
            timestamp: model.timestamp.to_iso8601(),
            kind: dto::ChatMessageKind::Message,
        }
    }
}

impl From<&ServerEvent> for dto::ServerMessage {
    fn from(event: &ServerEvent) -> Self {
        match event {
            ServerEvent::History { messages } => Self::History {
                messages: messages.iter().map(dto::ChatMessageDto::from).collect(),
            },
            ServerEvent::LoginSuccess {
                username,
                online_count,
            } => Self::LoginSuccess {
                username: username.as_str().to_string(),
                online_count: *online_count,
            },
            ServerEvent::LoginError { error } => Self::LoginError {
                error: error.clone(),
            },
            ServerEvent::UserJoined {
                username,
                online_count,
            } => Self::UserJoined {
                username: username.as_str().to_string(),
                online_count: *online_count,
            },
            ServerEvent::NewMessage(message) => Self::NewMessage {
                id: message.id.value(),
                username: message.username.as_str().to_string(),
                text: message.text.as_str().to_string(),
                timestamp: message.timestamp.to_iso8601(),
            },
            ServerEvent::UserTyping {
                username,
                is_typing,
            } => Self::UserTyping {
                username: username.as_str().to_string(),
                is_typing: *is_typing,
            },
            ServerEvent::CallRequest { from, fields } => Self::CallRequest {
                from: from.as_str().to_string(),
                fields: fields.clone(),
            },
            ServerEvent::UserLeft {
                username,
                online_count,
            } => Self::UserLeft {
                username: username.as_str().to_string(),
                online_count: *online_count,
            },
        }
    }
}
