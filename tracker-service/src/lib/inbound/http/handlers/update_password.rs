use axum::extract::State;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::Json;
use crate::identity::errors::IdentityError;
use crate::identity::models::Login;
use crate::inbound::http::router::AppState;

pub async fn update_password(
    State(state): State<AppState>,
    Json(body): Json<UpdatePasswordRequestBody>,
) -> Result<Json<UpdatePasswordResponseData>, ApiError> {
    let login = Login::new(&body.login).map_err(IdentityError::from)?;

    state
        .auth_service
        .update_password(&login, body.password.trim())
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UpdatePasswordResponseData {
        message: "Password updated successfully".to_string(),
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdatePasswordRequestBody {
    login: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatePasswordResponseData {
    pub message: String,
}
