use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::Json;
use crate::identity::models::IdentityContext;
use crate::inbound::http::router::AppState;
use crate::project::errors::ProjectError;
use crate::project::models::CreateProjectCommand;
use crate::project::models::ProjectTitle;

pub async fn create_project(
    State(state): State<AppState>,
    Extension(context): Extension<IdentityContext>,
    Json(body): Json<CreateProjectRequestBody>,
) -> Result<(StatusCode, Json<CreateProjectResponseData>), ApiError> {
    let title = ProjectTitle::new(&body.title).map_err(ProjectError::from)?;

    let project = state
        .project_service
        .create_project(
            &context,
            CreateProjectCommand {
                title,
                description: body.description.unwrap_or_default().trim().to_string(),
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateProjectResponseData {
            message: "Project created successfully".to_string(),
            project_id: project.id,
        }),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateProjectRequestBody {
    title: String,
    description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateProjectResponseData {
    pub message: String,
    pub project_id: i64,
}
