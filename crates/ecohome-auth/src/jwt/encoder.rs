//! Token creation with a server-held HMAC secret and a fixed TTL.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use ecohome_core::config::{AuthConfig, MAX_TOKEN_TTL_HOURS};
use ecohome_core::error::AppError;
use ecohome_core::types::TokenId;
use ecohome_entity::identity::Identity;

use super::claims::Claims;

/// Creates signed HS256 session tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Token lifetime.
    ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder").field("ttl", &self.ttl).finish()
    }
}

/// A freshly issued token together with its expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Compact JWS string handed to the client.
    pub token: String,
    /// Token id embedded as `jti`.
    pub token_id: TokenId,
    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    ///
    /// The lifetime is capped at [`MAX_TOKEN_TTL_HOURS`] even when the
    /// configuration skipped validation.
    pub fn new(config: &AuthConfig) -> Self {
        let hours = config.token_ttl_hours.min(MAX_TOKEN_TTL_HOURS);
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: Duration::hours(hours as i64),
        }
    }

    /// Returns the configured token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a token for `identity` with `iat = now` and `exp = now + ttl`.
    pub fn encode_at(&self, identity: &Identity, now: DateTime<Utc>) -> Result<IssuedToken, AppError> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::internal("Session token expiry is out of range"))?;
        let claims = Claims {
            sub: identity.id,
            role: identity.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: TokenId::new(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))?;

        Ok(IssuedToken {
            token,
            token_id: claims.jti,
            expires_at: claims.expires_at(),
        })
    }
}
