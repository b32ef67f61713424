//! # ecohome-auth
//!
//! Credential and session primitives for the storefront.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing and the password policy
//! - `jwt`: signed session tokens carrying the role claim, plus the optional deny-list
//! - `rbac`: exact-match role guard

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder, TokenDenyList, TokenIssuer};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::require_role;
