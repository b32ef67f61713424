//! Session token claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ecohome_core::types::{IdentityId, TokenId};
use ecohome_entity::identity::IdentityRole;

/// Claims payload embedded in every session token. Carries no email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the identity id.
    pub sub: IdentityId,
    /// Role at the time of issuance.
    pub role: IdentityRole,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token id, used as the deny-list key.
    pub jti: TokenId,
}

impl Claims {
    /// Returns the identity id from the subject claim.
    pub fn identity_id(&self) -> IdentityId {
        self.sub
    }

    /// Returns the issue time as a `DateTime<Utc>`.
    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Whether the token is expired at `now`. `now == exp` counts as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Returns the remaining lifetime in seconds at `now` (0 if expired).
    pub fn remaining_seconds_at(&self, now: DateTime<Utc>) -> u64 {
        u64::try_from(self.exp - now.timestamp()).unwrap_or(0)
    }
}
