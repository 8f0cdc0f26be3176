//! Domain errors.

use thiserror::Error;

use super::value_object::ConnectionId;

/// Validation errors raised while constructing value objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("Username must not be empty")]
    EmptyUsername,

    #[error("Username must be at most {max} characters (got {actual})")]
    UsernameTooLong { max: usize, actual: usize },
}

/// Reasons a login attempt is rejected by the session registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    /// Another connection already holds the username
    #[error("User '{0}' is already online")]
    AlreadyOnline(String),

    /// This connection already has a session
    #[error("Already logged in as '{0}'")]
    AlreadyAuthenticated(String),
}

/// Errors raised when pushing an event to a connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Connection '{0}' is not registered")]
    ConnectionNotFound(ConnectionId),

    #[error("Connection '{0}' is closed")]
    ConnectionClosed(ConnectionId),

    #[error("Outbound buffer of connection '{0}' is full")]
    BufferFull(ConnectionId),

    #[error("Failed to serialize event: {0}")]
    Serialization(String),
}
