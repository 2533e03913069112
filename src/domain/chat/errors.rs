//! Chat engine error types.

use crate::domain::foundation::ErrorCode;
use crate::ports::DirectoryError;

/// Errors that abort handling of one inbound message.
///
/// Bad menu choices and malformed ZIP codes are answered with a prompt and
/// never show up here.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Failed to load directory: {0}")]
    DirectoryUnavailable(#[from] DirectoryError),
}

impl ChatError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ChatError::DirectoryUnavailable(_) => ErrorCode::DirectoryUnavailable,
        }
    }
}
