use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::claims::AccessClaims;
use super::claims::Expiry;
use super::claims::RefreshClaims;
use super::claims::Role;
use super::errors::TokenError;

/// Which of the two token families a token belongs to.
///
/// The two secrets are never interchangeable; the kind is always passed
/// explicitly by the caller and never inferred from request routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Lifespan applied when no refresh lifespan is configured.
const DEFAULT_REFRESH_HOURS: i64 = 24;

struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeyPair {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Signs and validates the two token kinds with distinct HS256 secrets.
///
/// Uses HS256 (HMAC with SHA-256); tokens presented with any other algorithm
/// are rejected during validation.
pub struct TokenCodec {
    access_keys: KeyPair,
    refresh_keys: KeyPair,
    access_lifespan: Duration,
    refresh_lifespan: Duration,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Build a codec from the configured secrets and lifespans.
    ///
    /// # Arguments
    /// * `access_secret` - secret for access tokens, required
    /// * `refresh_secret` - secret for refresh tokens, required, must differ
    /// * `access_minutes` - access token lifespan, required and positive
    /// * `refresh_hours` - refresh token lifespan; `None` falls back to 24h
    ///
    /// The refresh fallback is a deliberate leniency: an unset refresh
    /// lifespan degrades to a default instead of refusing to start, while an
    /// unset access lifespan is a hard configuration error.
    ///
    /// # Errors
    /// * `Config` - a secret is empty, the secrets match, or the access
    ///   lifespan is missing/non-positive
    pub fn new(
        access_secret: &str,
        refresh_secret: &str,
        access_minutes: i64,
        refresh_hours: Option<i64>,
    ) -> Result<Self, TokenError> {
        if access_secret.is_empty() {
            return Err(TokenError::Config("access secret is not set".to_string()));
        }
        if refresh_secret.is_empty() {
            return Err(TokenError::Config("refresh secret is not set".to_string()));
        }
        if access_secret == refresh_secret {
            return Err(TokenError::Config(
                "access and refresh secrets must differ".to_string(),
            ));
        }
        if access_minutes <= 0 {
            return Err(TokenError::Config(format!(
                "access lifespan must be positive, got {} minutes",
                access_minutes
            )));
        }

        Ok(Self {
            access_keys: KeyPair::from_secret(access_secret),
            refresh_keys: KeyPair::from_secret(refresh_secret),
            access_lifespan: Duration::minutes(access_minutes),
            refresh_lifespan: Duration::hours(refresh_hours.unwrap_or(DEFAULT_REFRESH_HOURS)),
            algorithm: Algorithm::HS256,
        })
    }

    /// Issue an access token for an identity.
    ///
    /// Claims: `{id, role, exp, authorized: true}` signed with the access
    /// secret.
    pub fn issue_access(&self, subject_id: i64, role: Role) -> Result<String, TokenError> {
        let claims = AccessClaims {
            id: subject_id,
            role,
            exp: (Utc::now() + self.access_lifespan).timestamp(),
            authorized: true,
        };
        self.sign(&claims, TokenKind::Access)
    }

    /// Issue a refresh token for an identity.
    ///
    /// Claims: `{id, exp}` signed with the refresh secret. No role is
    /// embedded; it must be re-resolved from the store on refresh.
    pub fn issue_refresh(&self, subject_id: i64) -> Result<String, TokenError> {
        let claims = RefreshClaims {
            id: subject_id,
            exp: (Utc::now() + self.refresh_lifespan).timestamp(),
        };
        self.sign(&claims, TokenKind::Refresh)
    }

    /// Validate a token as an access token and return its claims.
    ///
    /// # Errors
    /// * `Signature` - wrong secret or unexpected signing algorithm
    /// * `Expired` - `exp` has passed (exactly at `exp` counts as expired)
    /// * `MalformedClaims` - claims do not match the access shape
    /// * `Malformed` - not a parseable token at all
    pub fn validate_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.decode(token, TokenKind::Access)
    }

    /// Validate a token as a refresh token and return its claims.
    ///
    /// Same error cases as [`TokenCodec::validate_access`]. A token signed
    /// with the access secret fails here with `Signature`, and vice versa.
    pub fn validate_refresh(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        self.decode(token, TokenKind::Refresh)
    }

    /// Refresh token lifespan in whole hours (cookie max-age).
    pub fn refresh_lifespan_hours(&self) -> i64 {
        self.refresh_lifespan.num_hours()
    }

    fn keys(&self, kind: TokenKind) -> &KeyPair {
        match kind {
            TokenKind::Access => &self.access_keys,
            TokenKind::Refresh => &self.refresh_keys,
        }
    }

    fn sign<T: Serialize>(&self, claims: &T, kind: TokenKind) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.keys(kind).encoding)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    fn decode<T>(&self, token: &str, kind: TokenKind) -> Result<T, TokenError>
    where
        T: DeserializeOwned + Expiry,
    {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked on the decoded claims below so the boundary is
        // exact (exp <= now), not subject to the library's leeway handling.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = decode::<T>(token, &self.keys(kind).decoding, &validation)
            .map_err(map_decode_error)?;

        if data.claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}

fn map_decode_error(e: jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName => TokenError::Signature,
        ErrorKind::Json(err) => TokenError::MalformedClaims(err.to_string()),
        _ => TokenError::Malformed(e.to_string()),
    }
}
