//! Request context carrying the identity attached by the access gate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ecohome_auth::Claims;
use ecohome_core::types::{IdentityId, TokenId};
use ecohome_entity::identity::IdentityRole;

/// Context for the current authenticated request.
///
/// Built from validated token claims and passed into service methods, so
/// every operation knows who is acting without a store lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated identity.
    pub identity_id: IdentityId,
    /// Role from the token's role claim.
    pub role: IdentityRole,
    /// Id of the presented token.
    pub token_id: TokenId,
    /// When the presented token expires.
    pub expires_at: DateTime<Utc>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context from validated claims.
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            identity_id: claims.sub,
            role: claims.role,
            token_id: claims.jti,
            expires_at: claims.expires_at(),
            request_time: Utc::now(),
        }
    }

    /// Returns whether the caller holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == IdentityRole::Admin
    }
}
