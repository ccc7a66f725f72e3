use axum::extract::Path;
use axum::extract::State;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::Json;
use crate::identity::models::IdentityContext;
use crate::inbound::http::router::AppState;
use crate::project::models::Project;

pub async fn get_project(
    State(state): State<AppState>,
    Extension(context): Extension<IdentityContext>,
    Path(project_id): Path<i64>,
) -> Result<Json<GetProjectResponseData>, ApiError> {
    state
        .project_service
        .get_project(&context, project_id)
        .await
        .map_err(ApiError::from)
        .map(|ref project| Json(project.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetProjectResponseData {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Project> for GetProjectResponseData {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            owner_id: project.owner_id,
            title: project.title.to_string(),
            description: project.description.clone(),
            created_at: project.created_at,
        }
    }
}
