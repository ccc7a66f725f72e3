use async_trait::async_trait;

use crate::identity::models::IdentityContext;
use crate::project::errors::ProjectError;
use crate::project::models::CreateProjectCommand;
use crate::project::models::Project;
use crate::project::models::UpdateProjectCommand;

/// Persistence operations for projects.
#[async_trait]
pub trait ProjectRepository: Send + Sync + 'static {
    /// Insert a new project; the title uniqueness constraint lives in the
    /// store, violation maps to `TitleTaken`.
    async fn insert(
        &self,
        owner_id: i64,
        command: CreateProjectCommand,
    ) -> Result<Project, ProjectError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Project>, ProjectError>;

    /// Persist updated title/description.
    ///
    /// # Errors
    /// * `NotFound` - project no longer exists
    /// * `TitleTaken` - new title collides with another project
    async fn update(&self, project: Project) -> Result<Project, ProjectError>;
}

/// Port for project operations exposed to the inbound layer.
///
/// Every single-resource operation is gated by the ownership guard.
#[async_trait]
pub trait ProjectServicePort: Send + Sync + 'static {
    async fn create_project(
        &self,
        context: &IdentityContext,
        command: CreateProjectCommand,
    ) -> Result<Project, ProjectError>;

    async fn get_project(
        &self,
        context: &IdentityContext,
        id: i64,
    ) -> Result<Project, ProjectError>;

    async fn update_project(
        &self,
        context: &IdentityContext,
        id: i64,
        command: UpdateProjectCommand,
    ) -> Result<Project, ProjectError>;
}
