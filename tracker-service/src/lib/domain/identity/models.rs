use std::fmt;

use auth::Role;
use chrono::DateTime;
use chrono::Utc;

use crate::identity::errors::LoginError;

/// Identity aggregate entity.
///
/// Ids are assigned by the credential store; the password is only ever held
/// as an opaque digest.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: i64,
    pub login: Login,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Login value type.
///
/// Case-sensitive, trimmed, non-empty. Uniqueness is enforced by the store,
/// not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Login(String);

impl Login {
    /// Create a validated login from raw input.
    ///
    /// Surrounding whitespace is trimmed before validation.
    ///
    /// # Errors
    /// * `Empty` - nothing left after trimming
    pub fn new(login: &str) -> Result<Self, LoginError> {
        let login = login.trim();
        if login.is_empty() {
            return Err(LoginError::Empty);
        }
        Ok(Self(login.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Request-scoped identity derived from a validated access token.
///
/// Produced once per request by the identity middleware and read-only
/// thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityContext {
    pub subject_id: i64,
    pub role: Role,
}

/// Command to register a new identity.
#[derive(Debug)]
pub struct RegisterCommand {
    pub login: Login,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

/// Command to authenticate an existing identity.
#[derive(Debug)]
pub struct LoginCommand {
    pub login: Login,
    pub password: String,
}

/// Access and refresh tokens issued together on login and refresh.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
