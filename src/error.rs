//! Content Studio Error Types
//!
//! Centralized error handling for the session controller and harness.

use thiserror::Error;

/// Central error type for Content Studio
#[derive(Error, Debug)]
pub enum StudioError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Unknown voice clone: {0}")]
    UnknownVoiceClone(String),

    #[error("Fixture error: {0}")]
    Fixture(String),

    #[error("Invalid command: {0}")]
    Command(String),

    #[error("Studio loop stopped")]
    Closed,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Content Studio operations
pub type StudioResult<T> = Result<T, StudioError>;

impl StudioError {
    /// True for the errors strict mode raises on unknown ids
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StudioError::TemplateNotFound(_) | StudioError::UnknownVoiceClone(_)
        )
    }
}
