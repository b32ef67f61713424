//! Identity entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use ecohome_core::types::IdentityId;

use super::email::Email;
use super::role::IdentityRole;

/// A registered account.
///
/// The password hash is owned by the credential store and never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Identity {
    /// Unique identity identifier.
    pub id: IdentityId,
    /// Normalized (lower-cased) email address; unique.
    pub email: Email,
    /// Argon2id PHC-format password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role embedded in issued session tokens.
    pub role: IdentityRole,
    /// When the identity was registered.
    pub created_at: DateTime<Utc>,
    /// When the identity was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    /// Check if this identity has the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == IdentityRole::Admin
    }
}

/// Data required to create a new identity. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    /// Normalized email address.
    pub email: Email,
    /// Pre-computed password hash.
    pub password_hash: String,
    /// Assigned role.
    pub role: IdentityRole,
}
