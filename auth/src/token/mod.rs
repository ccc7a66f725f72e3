pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::AccessClaims;
pub use claims::RefreshClaims;
pub use claims::Role;
pub use codec::TokenCodec;
pub use codec::TokenKind;
pub use errors::TokenError;
