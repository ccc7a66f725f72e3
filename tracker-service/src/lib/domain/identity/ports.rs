use async_trait::async_trait;
use auth::Role;

use crate::identity::errors::IdentityError;
use crate::identity::models::Identity;
use crate::identity::models::Login;
use crate::identity::models::LoginCommand;
use crate::identity::models::RegisterCommand;
use crate::identity::models::TokenPair;

/// Persistence operations for identities.
///
/// Injected into the authentication service; implementations exist for
/// Postgres and for an in-memory test double.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Persist a new identity in a single atomic insert.
    ///
    /// Login uniqueness is enforced by the store's own constraint, not by a
    /// prior existence check, so concurrent registrations cannot race.
    ///
    /// # Errors
    /// * `LoginTaken` - the login is already registered
    /// * `Database` - store operation failed
    async fn create(
        &self,
        login: &Login,
        password_hash: &str,
        role: Role,
    ) -> Result<Identity, IdentityError>;

    /// Retrieve an identity by login (exact, case-sensitive match).
    async fn find_by_login(&self, login: &Login) -> Result<Option<Identity>, IdentityError>;

    /// Retrieve an identity by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>, IdentityError>;

    /// Replace the stored password digest.
    ///
    /// # Errors
    /// * `NotFound` - no identity with this id
    /// * `Database` - store operation failed
    async fn update_password_hash(&self, id: i64, new_hash: &str) -> Result<(), IdentityError>;
}

/// Port for authentication operations exposed to the inbound layer.
#[async_trait]
pub trait AuthenticationPort: Send + Sync + 'static {
    /// Register a new identity. Does not auto-login.
    ///
    /// # Errors
    /// * `PasswordMismatch` - password and confirmation differ
    /// * `LoginTaken` - login already registered
    /// * `Hashing` / `Database` - internal failure
    async fn register(&self, command: RegisterCommand) -> Result<Identity, IdentityError>;

    /// Verify credentials and issue an access/refresh token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - unknown login or wrong password; the two are
    ///   indistinguishable on purpose
    async fn login(&self, command: LoginCommand) -> Result<TokenPair, IdentityError>;

    /// Validate a refresh token and rotate both tokens.
    ///
    /// The role is re-read from the store, never trusted from the token.
    ///
    /// # Errors
    /// * `TokenExpired` / `TokenInvalid` - refresh token rejected
    /// * `InvalidCredentials` - the identity no longer exists
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, IdentityError>;

    /// Re-hash and persist a new password for a login.
    ///
    /// # Errors
    /// * `NotFoundByLogin` - unknown login
    async fn update_password(&self, login: &Login, new_password: &str)
        -> Result<(), IdentityError>;

    /// Retrieve the identity behind a validated context.
    ///
    /// # Errors
    /// * `NotFound` - the identity vanished after the token was issued
    async fn identity_info(&self, id: i64) -> Result<Identity, IdentityError>;
}
