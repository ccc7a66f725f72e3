use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::ownership::Owned;
use crate::project::errors::TitleError;

/// Owned record entity; the minimum the auth core needs from the tracked
/// resources is the `owner_id` used by the ownership guard.
#[derive(Debug, Clone)]
pub struct Project {
    pub id: i64,
    pub owner_id: i64,
    pub title: ProjectTitle,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Owned for Project {
    fn owner_id(&self) -> i64 {
        self.owner_id
    }
}

/// Project title value type; trimmed, at least 3 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTitle(String);

impl ProjectTitle {
    const MIN_LENGTH: usize = 3;

    pub fn new(title: &str) -> Result<Self, TitleError> {
        let title = title.trim();
        let length = title.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(TitleError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(title.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a project for the requesting identity.
#[derive(Debug)]
pub struct CreateProjectCommand {
    pub title: ProjectTitle,
    pub description: String,
}

/// Command to update an owned project; only provided fields change.
#[derive(Debug)]
pub struct UpdateProjectCommand {
    pub title: Option<ProjectTitle>,
    pub description: Option<String>,
}
