use thiserror::Error;

/// Error type for token operations.
///
/// `Expired` is kept distinct from every other validation failure so callers
/// can tell a renewable token apart from one that must be rejected outright.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Token signature rejected")]
    Signature,

    #[error("Token is expired")]
    Expired,

    #[error("Malformed token claims: {0}")]
    MalformedClaims(String),

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token configuration error: {0}")]
    Config(String),
}
