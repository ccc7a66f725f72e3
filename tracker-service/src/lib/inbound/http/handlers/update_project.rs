use axum::extract::Path;
use axum::extract::State;
use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::Json;
use crate::identity::models::IdentityContext;
use crate::inbound::http::router::AppState;
use crate::project::errors::ProjectError;
use crate::project::models::ProjectTitle;
use crate::project::models::UpdateProjectCommand;

pub async fn update_project(
    State(state): State<AppState>,
    Extension(context): Extension<IdentityContext>,
    Path(project_id): Path<i64>,
    Json(body): Json<UpdateProjectRequestBody>,
) -> Result<Json<UpdateProjectResponseData>, ApiError> {
    let title = body
        .title
        .as_deref()
        .map(ProjectTitle::new)
        .transpose()
        .map_err(ProjectError::from)?;

    let project = state
        .project_service
        .update_project(
            &context,
            project_id,
            UpdateProjectCommand {
                title,
                description: body.description.map(|d| d.trim().to_string()),
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UpdateProjectResponseData {
        message: "Project updated successfully".to_string(),
        project_id: project.id,
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateProjectRequestBody {
    title: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateProjectResponseData {
    pub message: String,
    pub project_id: i64,
}
