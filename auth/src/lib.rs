//! Authentication building blocks for the record-tracking service
//!
//! Provides the two security-sensitive primitives the service is built on:
//! - Password hashing (Argon2id)
//! - Signed token issuance and validation (access + refresh kinds)
//!
//! The service defines its own domain traits and adapts these implementations,
//! keeping this crate free of storage and transport concerns.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify(&digest, "my_password").unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Role, TokenCodec};
//!
//! let codec = TokenCodec::new(
//!     "access_secret_at_least_32_bytes_long!",
//!     "refresh_secret_at_least_32_bytes_ok!",
//!     15,
//!     None,
//! )
//! .unwrap();
//!
//! let token = codec.issue_access(42, Role::Regular).unwrap();
//! let claims = codec.validate_access(&token).unwrap();
//! assert_eq!(claims.id, 42);
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::AccessClaims;
pub use token::RefreshClaims;
pub use token::Role;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::TokenKind;
