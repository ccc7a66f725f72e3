use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::token_response;
use super::ApiError;
use super::Json;
use super::TokenResponseData;
use crate::identity::models::Login;
use crate::identity::models::LoginCommand;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequestBody>,
) -> Result<(CookieJar, Json<TokenResponseData>), ApiError> {
    // An unparseable login gets the same answer as a wrong password; the
    // response never reveals which part of the credentials failed.
    let login = Login::new(&body.login)
        .map_err(|_| ApiError::Unauthorized("Invalid login or password".to_string()))?;

    let pair = state
        .auth_service
        .login(LoginCommand {
            login,
            password: body.password.trim().to_string(),
        })
        .await
        .map_err(ApiError::from)?;

    Ok(token_response(
        state.cookie_mode,
        jar,
        pair,
        state.token_codec.refresh_lifespan_hours(),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    login: String,
    password: String,
}
