//! Signed session tokens: claims, encoding, validation, and revocation.

pub mod claims;
pub mod decoder;
pub mod denylist;
pub mod encoder;
pub mod issuer;

pub use claims::Claims;
pub use decoder::JwtDecoder;
pub use denylist::TokenDenyList;
pub use encoder::{IssuedToken, JwtEncoder};
pub use issuer::TokenIssuer;

/// The single message returned for every rejected token.
///
/// Expired, forged, malformed, and revoked tokens are indistinguishable to
/// the caller; the concrete reason is only logged at debug level.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";
