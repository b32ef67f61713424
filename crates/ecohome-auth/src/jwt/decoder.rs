//! Token signature and expiry validation.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use ecohome_core::config::AuthConfig;
use ecohome_core::error::AppError;

use super::INVALID_TOKEN_MESSAGE;
use super::claims::Claims;

/// Validates HS256 session tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        // Only HS256 is accepted; `alg: none` and key-confusion attempts fail here.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);
        // Expiry is compared against an injected clock in `decode_at`.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verifies the signature first, then requires `exp > now`.
    ///
    /// Every failure yields the same `Unauthorized` error.
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!(error = %e, "Session token rejected");
            AppError::unauthorized(INVALID_TOKEN_MESSAGE)
        })?;

        let claims = data.claims;
        if claims.is_expired_at(now) {
            debug!(identity_id = %claims.sub, "Session token rejected: expired");
            return Err(AppError::unauthorized(INVALID_TOKEN_MESSAGE));
        }

        Ok(claims)
    }
}
