use thiserror::Error;

use crate::ownership::Forbidden;

/// Error for project title validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TitleError {
    #[error("Title too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
}

/// Top-level error for project operations
#[derive(Debug, Clone, Error)]
pub enum ProjectError {
    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TitleError),

    #[error("Project with this title already exists: {0}")]
    TitleTaken(String),

    #[error("Project not found: {0}")]
    NotFound(i64),

    #[error(transparent)]
    Forbidden(#[from] Forbidden),

    #[error("Database error: {0}")]
    Database(String),
}
