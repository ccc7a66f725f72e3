use serde::Deserialize;
use serde::Serialize;

/// Role carried by an identity and stamped into access tokens.
///
/// Encoded on the wire as a small integer (1/2/3). Any other integer fails
/// claim deserialization instead of producing an unchecked value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Role {
    Regular,
    Manager,
    Privileged,
}

impl TryFrom<u8> for Role {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Role::Regular),
            2 => Ok(Role::Manager),
            3 => Ok(Role::Privileged),
            other => Err(format!("unknown role code: {}", other)),
        }
    }
}

impl From<Role> for u8 {
    fn from(role: Role) -> Self {
        match role {
            Role::Regular => 1,
            Role::Manager => 2,
            Role::Privileged => 3,
        }
    }
}

/// Claims embedded in an access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject identity id
    pub id: i64,
    /// Role at issuance time
    pub role: Role,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// Issuance purpose marker
    pub authorized: bool,
}

/// Claims embedded in a refresh token.
///
/// Deliberately carries no role: the role is re-resolved from the identity
/// store on refresh so a role change takes effect on the next rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Subject identity id
    pub id: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Expiry accessor shared by both claim sets.
pub trait Expiry {
    fn expires_at(&self) -> i64;

    /// Expiry boundary rule: a token is expired from the instant `exp` itself.
    fn is_expired(&self, at: i64) -> bool {
        self.expires_at() <= at
    }
}

impl Expiry for AccessClaims {
    fn expires_at(&self) -> i64 {
        self.exp
    }
}

impl Expiry for RefreshClaims {
    fn expires_at(&self) -> i64 {
        self.exp
    }
}
