use auth::Role;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::Json;
use crate::identity::errors::IdentityError;
use crate::identity::models::Login;
use crate::identity::models::RegisterCommand;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<(StatusCode, Json<RegisterResponseData>), ApiError> {
    let command = body.try_into_command()?;

    state
        .auth_service
        .register(command)
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponseData {
            message: "Identity registered successfully".to_string(),
        }),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    login: String,
    password: String,
    confirm_password: String,
    role: u8,
}

impl RegisterRequestBody {
    fn try_into_command(self) -> Result<RegisterCommand, IdentityError> {
        let login = Login::new(&self.login)?;
        let role = Role::try_from(self.role).map_err(IdentityError::InvalidRole)?;

        Ok(RegisterCommand {
            login,
            password: self.password.trim().to_string(),
            confirm_password: self.confirm_password.trim().to_string(),
            role,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub message: String,
}
