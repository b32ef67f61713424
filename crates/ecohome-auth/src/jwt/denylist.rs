//! In-memory deny-list of revoked token ids.
//!
//! Each entry lives exactly as long as the token it revokes; once the token
//! has expired on its own the entry is useless and moka evicts it.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use moka::Expiry;
use moka::future::Cache;

use ecohome_core::types::TokenId;

/// Per-entry expiry: the remaining lifetime of the revoked token.
struct UntilTokenExpiry;

impl Expiry<TokenId, DateTime<Utc>> for UntilTokenExpiry {
    fn expire_after_create(
        &self,
        _key: &TokenId,
        expires_at: &DateTime<Utc>,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(
            (*expires_at - Utc::now())
                .to_std()
                .unwrap_or(Duration::ZERO),
        )
    }
}

/// Set of revoked token ids, bounded by capacity and by each token's expiry.
#[derive(Clone)]
pub struct TokenDenyList {
    entries: Cache<TokenId, DateTime<Utc>>,
}

impl std::fmt::Debug for TokenDenyList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDenyList")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

impl TokenDenyList {
    /// Creates a deny-list holding at most `capacity` entries.
    pub fn new(capacity: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(capacity)
            .expire_after(UntilTokenExpiry)
            .build();
        Self { entries }
    }

    /// Revokes `token_id` until `expires_at`. Already-expired tokens are skipped.
    pub async fn revoke(&self, token_id: TokenId, expires_at: DateTime<Utc>) {
        if expires_at <= Utc::now() {
            return;
        }
        self.entries.insert(token_id, expires_at).await;
    }

    /// Whether `token_id` has been revoked and is still tracked.
    pub fn is_revoked(&self, token_id: &TokenId) -> bool {
        self.entries.contains_key(token_id)
    }
}
