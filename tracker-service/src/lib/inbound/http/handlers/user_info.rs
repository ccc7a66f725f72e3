use axum::extract::State;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::Json;
use crate::identity::models::IdentityContext;
use crate::inbound::http::router::AppState;

pub async fn user_info(
    State(state): State<AppState>,
    Extension(context): Extension<IdentityContext>,
) -> Result<Json<UserInfoResponseData>, ApiError> {
    // The identity can vanish between token issuance and this call.
    let identity = state.auth_service.identity_info(context.subject_id).await?;

    Ok(Json(UserInfoResponseData {
        login: identity.login.to_string(),
        role: u8::from(identity.role),
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfoResponseData {
    pub login: String,
    pub role: u8,
}
