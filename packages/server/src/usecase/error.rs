//! UseCase errors.

use thiserror::Error;

use crate::domain::{LoginError, MessagePushError, ValueObjectError};

/// Errors of [`LoginUseCase`](super::LoginUseCase).
///
/// The `Display` text of the rejection variants is what the client receives
/// in `login_error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginUseCaseError {
    #[error("{0}")]
    InvalidUsername(#[from] ValueObjectError),

    #[error("{0}")]
    Rejected(#[from] LoginError),

    #[error("Failed to push event: {0}")]
    PushFailed(#[from] MessagePushError),
}

impl LoginUseCaseError {
    /// `true` when the client was told why its login failed.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::PushFailed(_))
    }
}

/// Errors raised while delivering the events of a dispatched operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("Failed to push event: {0}")]
    PushFailed(#[from] MessagePushError),
}
