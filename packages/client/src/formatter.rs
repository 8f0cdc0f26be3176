//! Message formatting utilities for client display.

use chrono::{DateTime, Utc};
use hiroba_server::infrastructure::dto::websocket::{ChatMessageDto, ServerMessage};
use hiroba_shared::time::iso8601_to_timestamp;
use serde_json::{Map, Value};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format any frame received from the server
    pub fn format_server_message(message: &ServerMessage) -> String {
        match message {
            ServerMessage::History { messages } => Self::format_history(messages),
            ServerMessage::LoginSuccess {
                username,
                online_count,
            } => Self::format_login_success(username, *online_count),
            ServerMessage::LoginError { error } => Self::format_login_error(error),
            ServerMessage::UserJoined {
                username,
                online_count,
            } => Self::format_user_joined(username, *online_count),
            ServerMessage::NewMessage {
                username,
                text,
                timestamp,
                ..
            } => Self::format_chat_message(username, text, timestamp),
            ServerMessage::UserTyping {
                username,
                is_typing,
            } => Self::format_user_typing(username, *is_typing),
            ServerMessage::CallRequest { from, fields } => {
                Self::format_call_request(from, fields)
            }
            ServerMessage::UserLeft {
                username,
                online_count,
            } => Self::format_user_left(username, *online_count),
        }
    }

    /// Format the history replayed on connect
    pub fn format_history(messages: &[ChatMessageDto]) -> String {
        let mut output = String::new();
        output.push_str("\n\n============================================================\n");
        output.push_str("Recent messages:\n");

        if messages.is_empty() {
            output.push_str("(No messages yet)\n");
        } else {
            for message in messages {
                output.push_str(&format!(
                    "[{}] {}: {}\n",
                    Self::format_time(&message.timestamp),
                    message.username,
                    message.text
                ));
            }
        }

        output.push_str("============================================================\n");
        output
    }

    pub fn format_login_success(username: &str, online_count: usize) -> String {
        format!(
            "\nLogged in as '{}' ({} online). Type messages and press Enter to send. \
             Use /call <note> to ring everyone.\n",
            username, online_count
        )
    }

    pub fn format_login_error(error: &str) -> String {
        format!("\n! Login failed: {}\n", error)
    }

    /// Format a user-joined notification
    pub fn format_user_joined(username: &str, online_count: usize) -> String {
        format!("\n+ {} joined ({} online)\n", username, online_count)
    }

    /// Format a user-left notification
    pub fn format_user_left(username: &str, online_count: usize) -> String {
        format!("\n- {} left ({} online)\n", username, online_count)
    }

    /// Format a chat message
    ///
    /// # Arguments
    ///
    /// * `from` - The username of the sender
    /// * `text` - The message text
    /// * `timestamp` - ISO-8601 time assigned by the server
    pub fn format_chat_message(from: &str, text: &str, timestamp: &str) -> String {
        format!(
            "\n[{}] @{}: {}\n",
            Self::format_time(timestamp),
            from,
            text
        )
    }

    pub fn format_user_typing(username: &str, is_typing: bool) -> String {
        if is_typing {
            format!("\n... {} is typing\n", username)
        } else {
            format!("\n... {} stopped typing\n", username)
        }
    }

    /// Format a call request; the `note` field is shown when present
    pub fn format_call_request(from: &str, fields: &Map<String, Value>) -> String {
        match fields.get("note").and_then(Value::as_str) {
            Some(note) => format!("\n☎ {} is calling: {}\n", from, note),
            None => format!("\n☎ {} is calling\n", from),
        }
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }

    /// `HH:MM:SS` (UTC) of an ISO-8601 timestamp, or the input as-is if it
    /// cannot be parsed
    fn format_time(timestamp: &str) -> String {
        iso8601_to_timestamp(timestamp)
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| timestamp.to_string())
    }
}
