//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use hiroba_server::infrastructure::dto::websocket::ClientMessage;
use serde_json::{Map, Value};

use crate::error::ClientError;

/// Input prefix that sends a call request instead of a chat message
const CALL_COMMAND: &str = "/call";

/// Check if the client should exit immediately based on the error type.
///
/// # Returns
///
/// `true` if the error requires immediate exit (e.g., LoginRejected),
/// `false` otherwise
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::LoginRejected(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The number of reconnection attempts made so far
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // Don't reconnect if the error requires immediate exit
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}

/// Turn one input line into the frame to send.
///
/// `/call <note>` becomes a `call` event carrying `note`; anything else is a
/// chat message.
pub fn parse_input(line: &str) -> ClientMessage {
    let Some(rest) = line.strip_prefix(CALL_COMMAND) else {
        return ClientMessage::Message {
            text: line.to_string(),
        };
    };
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        // e.g. "/caller" is an ordinary message
        return ClientMessage::Message {
            text: line.to_string(),
        };
    }

    let mut fields = Map::new();
    let note = rest.trim();
    if !note.is_empty() {
        fields.insert("note".to_string(), Value::String(note.to_string()));
    }
    ClientMessage::Call(fields)
}
