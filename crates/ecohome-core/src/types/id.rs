//! Identifiers for identities and session tokens.
//!
//! Both wrap a [`Uuid`] but stay distinct types, so a token id can never be
//! looked up as an identity.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Primary key of a registered identity.
///
/// Time-ordered (UUIDv7) so new rows append to the primary key index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[serde(transparent)]
pub struct IdentityId(Uuid);

impl IdentityId {
    /// Allocates an id for a new identity.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for IdentityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The `jti` of one issued session token. Never persisted.
///
/// Random (UUIDv4): it keys the revocation deny-list and must not be guessable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(Uuid);

impl TokenId {
    /// Draws a fresh token id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TokenId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
