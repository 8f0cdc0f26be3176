//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server refused the login (e.g. the username is already online)
    #[error("Login rejected: {0}")]
    LoginRejected(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
