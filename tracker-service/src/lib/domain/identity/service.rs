use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenCodec;

use crate::identity::errors::IdentityError;
use crate::identity::models::Identity;
use crate::identity::models::Login;
use crate::identity::models::LoginCommand;
use crate::identity::models::RegisterCommand;
use crate::identity::models::TokenPair;
use crate::identity::ports::AuthenticationPort;
use crate::identity::ports::CredentialStore;

/// Authentication orchestration over the credential store, password hasher,
/// and token codec.
pub struct AuthenticationService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    hasher: PasswordHasher,
    codec: Arc<TokenCodec>,
}

impl<CS> AuthenticationService<CS>
where
    CS: CredentialStore,
{
    pub fn new(store: Arc<CS>, codec: Arc<TokenCodec>) -> Self {
        Self {
            store,
            hasher: PasswordHasher::new(),
            codec,
        }
    }

    fn issue_pair(&self, identity: &Identity) -> Result<TokenPair, IdentityError> {
        let access_token = self.codec.issue_access(identity.id, identity.role)?;
        let refresh_token = self.codec.issue_refresh(identity.id)?;
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}

#[async_trait]
impl<CS> AuthenticationPort for AuthenticationService<CS>
where
    CS: CredentialStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<Identity, IdentityError> {
        if command.password != command.confirm_password {
            return Err(IdentityError::PasswordMismatch);
        }

        let password_hash = self.hasher.hash(&command.password)?;

        // Single atomic insert; the store's uniqueness constraint decides
        // whether the login is taken.
        let identity = self
            .store
            .create(&command.login, &password_hash, command.role)
            .await?;

        tracing::info!(identity_id = identity.id, "Identity registered");
        Ok(identity)
    }

    async fn login(&self, command: LoginCommand) -> Result<TokenPair, IdentityError> {
        // Unknown login and wrong password collapse into one error so the
        // API cannot be used to enumerate logins.
        let identity = self
            .store
            .find_by_login(&command.login)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        let verified = self
            .hasher
            .verify(&identity.password_hash, &command.password)?;
        if !verified {
            return Err(IdentityError::InvalidCredentials);
        }

        self.issue_pair(&identity)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, IdentityError> {
        let claims = self.codec.validate_refresh(refresh_token)?;

        // The refresh token carries no role; re-read the identity so a role
        // change takes effect on the next rotation.
        let identity = self
            .store
            .find_by_id(claims.id)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        self.issue_pair(&identity)
    }

    async fn update_password(
        &self,
        login: &Login,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        let identity = self
            .store
            .find_by_login(login)
            .await?
            .ok_or_else(|| IdentityError::NotFoundByLogin(login.to_string()))?;

        let new_hash = self.hasher.hash(new_password)?;
        self.store.update_password_hash(identity.id, &new_hash).await
    }

    async fn identity_info(&self, id: i64) -> Result<Identity, IdentityError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(IdentityError::NotFound(id))
    }
}
