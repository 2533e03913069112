//! Resource source port - the current directory snapshot.
//!
//! Sources return every record they hold, approved or not. Status filtering
//! is the chat engine's job.

use crate::domain::directory::Resource;
use crate::domain::foundation::ErrorCode;

/// Errors that can occur while loading the directory.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Directory snapshot unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to parse directory snapshot: {0}")]
    Malformed(String),
}

impl DirectoryError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::DirectoryUnavailable
    }
}

/// Port for retrieving the directory snapshot.
///
/// Loading is synchronous; the chat engine runs without suspension points.
pub trait ResourceSource: Send + Sync {
    /// Loads the full resource list.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError` if the snapshot cannot be read or parsed.
    fn load_resources(&self) -> Result<Vec<Resource>, DirectoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_source_is_object_safe() {
        fn _accepts_dyn(_source: &dyn ResourceSource) {}
    }

    #[test]
    fn errors_map_to_directory_unavailable() {
        let err = DirectoryError::Malformed("eof".to_string());
        assert_eq!(err.code(), ErrorCode::DirectoryUnavailable);
        assert!(err.to_string().contains("eof"));
    }
}
