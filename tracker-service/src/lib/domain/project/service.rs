use std::sync::Arc;

use async_trait::async_trait;

use crate::identity::models::IdentityContext;
use crate::ownership;
use crate::project::errors::ProjectError;
use crate::project::models::CreateProjectCommand;
use crate::project::models::Project;
use crate::project::models::UpdateProjectCommand;
use crate::project::ports::ProjectRepository;
use crate::project::ports::ProjectServicePort;

/// Project operations gated by the ownership guard.
pub struct ProjectService<PR>
where
    PR: ProjectRepository,
{
    repository: Arc<PR>,
}

impl<PR> ProjectService<PR>
where
    PR: ProjectRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> ProjectServicePort for ProjectService<PR>
where
    PR: ProjectRepository,
{
    async fn create_project(
        &self,
        context: &IdentityContext,
        command: CreateProjectCommand,
    ) -> Result<Project, ProjectError> {
        self.repository.insert(context.subject_id, command).await
    }

    async fn get_project(
        &self,
        context: &IdentityContext,
        id: i64,
    ) -> Result<Project, ProjectError> {
        let project = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ProjectError::NotFound(id))?;

        ownership::authorize(context, &project)?;
        Ok(project)
    }

    async fn update_project(
        &self,
        context: &IdentityContext,
        id: i64,
        command: UpdateProjectCommand,
    ) -> Result<Project, ProjectError> {
        let mut project = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ProjectError::NotFound(id))?;

        ownership::authorize(context, &project)?;

        if let Some(title) = command.title {
            project.title = title;
        }
        if let Some(description) = command.description {
            project.description = description;
        }

        self.repository.update(project).await
    }
}
