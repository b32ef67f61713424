//! Session token issuance and validation behind one handle.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use ecohome_core::config::AuthConfig;
use ecohome_core::error::AppError;
use ecohome_core::types::TokenId;
use ecohome_entity::identity::Identity;

use super::INVALID_TOKEN_MESSAGE;
use super::claims::Claims;
use super::decoder::JwtDecoder;
use super::denylist::TokenDenyList;
use super::encoder::{IssuedToken, JwtEncoder};

/// Issues and validates session tokens.
///
/// Stateless unless revocation is enabled, in which case validation also
/// consults the deny-list.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
    deny_list: Option<TokenDenyList>,
}

impl TokenIssuer {
    /// Creates an issuer from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let deny_list = config
            .revocation_enabled
            .then(|| TokenDenyList::new(config.deny_list_capacity));

        Self {
            encoder: Arc::new(JwtEncoder::new(config)),
            decoder: Arc::new(JwtDecoder::new(config)),
            deny_list,
        }
    }

    /// Issues a token for `identity` valid for the configured TTL from now.
    pub fn issue(&self, identity: &Identity) -> Result<IssuedToken, AppError> {
        self.issue_at(identity, Utc::now())
    }

    /// Issues a token as of `now`.
    pub fn issue_at(&self, identity: &Identity, now: DateTime<Utc>) -> Result<IssuedToken, AppError> {
        self.encoder.encode_at(identity, now)
    }

    /// Validates a token against the current time.
    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        self.validate_at(token, Utc::now())
    }

    /// Validates signature, then expiry, then revocation, as of `now`.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AppError> {
        let claims = self.decoder.decode_at(token, now)?;

        if let Some(deny_list) = &self.deny_list
            && deny_list.is_revoked(&claims.jti)
        {
            debug!(identity_id = %claims.sub, "Session token rejected: revoked");
            return Err(AppError::unauthorized(INVALID_TOKEN_MESSAGE));
        }

        Ok(claims)
    }

    /// Whether logout revokes tokens server-side.
    pub fn revocation_enabled(&self) -> bool {
        self.deny_list.is_some()
    }

    /// Adds the token to the deny-list until its own expiry.
    ///
    /// Returns `false` when revocation is disabled.
    pub async fn revoke(&self, token_id: TokenId, expires_at: DateTime<Utc>) -> bool {
        match &self.deny_list {
            Some(deny_list) => {
                deny_list.revoke(token_id, expires_at).await;
                true
            }
            None => false,
        }
    }
}
