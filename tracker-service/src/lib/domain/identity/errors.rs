use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

/// Error for Login validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("Login must not be empty")]
    Empty,
}

/// Top-level error for identity and authentication operations.
///
/// `TokenExpired` and `TokenInvalid` both translate to 401 at the boundary
/// but stay distinct here: an expired access token is renewable, a token
/// with a bad signature or malformed claims is not.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    // Validation
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid login: {0}")]
    InvalidLogin(#[from] LoginError),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    // Domain
    #[error("Login already exists: {0}")]
    LoginTaken(String),

    #[error("Invalid login or password")]
    InvalidCredentials,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    TokenInvalid(String),

    #[error("Identity not found: {0}")]
    NotFound(i64),

    #[error("No identity with login: {0}")]
    NotFoundByLogin(String),

    // Infrastructure
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<TokenError> for IdentityError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => IdentityError::TokenExpired,
            TokenError::EncodingFailed(msg) | TokenError::Config(msg) => {
                IdentityError::TokenIssuance(msg)
            }
            other => IdentityError::TokenInvalid(other.to_string()),
        }
    }
}

impl From<PasswordError> for IdentityError {
    fn from(err: PasswordError) -> Self {
        IdentityError::Hashing(err.to_string())
    }
}
