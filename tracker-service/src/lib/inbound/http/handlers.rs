use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;
use serde::Serialize;

use crate::identity::errors::IdentityError;
use crate::identity::models::TokenPair;
use crate::project::errors::ProjectError;

pub mod create_project;
pub mod get_project;
pub mod login;
pub mod refresh;
pub mod register;
pub mod update_password;
pub mod update_project;
pub mod user_info;

/// Request/response body wrapper.
///
/// Serializes like `axum::Json` but answers an unparseable or incomplete
/// request body with the boundary error shape instead of axum's plain-text
/// rejection.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Boundary error translated to a status code plus a machine-stable kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    InternalServerError(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "validation",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::NotFound(_) => "not_found",
            ApiError::Conflict(_) => "conflict",
            ApiError::InternalServerError(_) => "internal",
        }
    }
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    error: String,
    kind: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::InternalServerError(msg) => msg,
        };

        (
            status,
            Json(ApiErrorBody {
                error: message,
                kind,
            }),
        )
            .into_response()
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::PasswordMismatch
            | IdentityError::InvalidLogin(_)
            | IdentityError::InvalidRole(_) => ApiError::BadRequest(err.to_string()),

            IdentityError::LoginTaken(_) => ApiError::Conflict(err.to_string()),

            // Expired and invalid tokens stay distinct inside the domain;
            // both surface as 401 here.
            IdentityError::InvalidCredentials
            | IdentityError::TokenExpired
            | IdentityError::TokenInvalid(_) => ApiError::Unauthorized(err.to_string()),

            IdentityError::NotFound(_) | IdentityError::NotFoundByLogin(_) => {
                ApiError::NotFound(err.to_string())
            }

            IdentityError::Hashing(_)
            | IdentityError::TokenIssuance(_)
            | IdentityError::Database(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

/// Token pair as returned by the login and refresh endpoints.
///
/// In cookie mode the refresh token is carried only by the cookie and the
/// body field is omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Build the login/refresh response for the configured transport mode.
pub(crate) fn token_response(
    cookie_mode: bool,
    jar: CookieJar,
    pair: TokenPair,
    refresh_hours: i64,
) -> (CookieJar, Json<TokenResponseData>) {
    if cookie_mode {
        let cookie = Cookie::build(("refresh_token", pair.refresh_token))
            .http_only(true)
            .same_site(SameSite::Strict)
            .path("/")
            .max_age(time::Duration::hours(refresh_hours))
            .build();

        (
            jar.add(cookie),
            Json(TokenResponseData {
                access_token: pair.access_token,
                refresh_token: None,
            }),
        )
    } else {
        (
            jar,
            Json(TokenResponseData {
                access_token: pair.access_token,
                refresh_token: Some(pair.refresh_token),
            }),
        )
    }
}

impl From<ProjectError> for ApiError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::InvalidTitle(_) => ApiError::BadRequest(err.to_string()),
            ProjectError::TitleTaken(_) => ApiError::Conflict(err.to_string()),
            ProjectError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ProjectError::Forbidden(_) => ApiError::Forbidden(err.to_string()),
            ProjectError::Database(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}
