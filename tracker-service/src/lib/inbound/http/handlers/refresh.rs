use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;

use super::token_response;
use super::ApiError;
use super::Json;
use super::TokenResponseData;
use crate::inbound::http::router::AppState;

/// Rotate an access/refresh token pair.
///
/// The refresh token arrives as a bearer header or, in cookie deployments,
/// as the `refresh_token` cookie. Validation as refresh-kind happens in the
/// service; this handler only picks the transport.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<(CookieJar, Json<TokenResponseData>), ApiError> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string);

    let token = bearer
        .or_else(|| jar.get("refresh_token").map(|c| c.value().to_string()))
        .ok_or_else(|| ApiError::Unauthorized("Missing refresh token".to_string()))?;

    let pair = state
        .auth_service
        .refresh(&token)
        .await
        .map_err(ApiError::from)?;

    Ok(token_response(
        state.cookie_mode,
        jar,
        pair,
        state.token_codec.refresh_lifespan_hours(),
    ))
}
