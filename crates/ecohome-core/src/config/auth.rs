//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Placeholder secret shipped for local development only.
pub const DEVELOPMENT_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Longest accepted session token lifetime, one year.
pub const MAX_TOKEN_TTL_HOURS: u64 = 24 * 365;

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Session token lifetime in hours. There is no refresh: expiry forces a new login.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// When enabled, logout places the token id on a deny-list until the token expires.
    #[serde(default)]
    pub revocation_enabled: bool,
    /// Upper bound on deny-list entries held in memory.
    #[serde(default = "default_deny_list_capacity")]
    pub deny_list_capacity: u64,
}

impl AuthConfig {
    /// Returns whether the signing secret is still the development placeholder.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEVELOPMENT_JWT_SECRET
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_hours: default_token_ttl(),
            password_min_length: default_password_min(),
            revocation_enabled: false,
            deny_list_capacity: default_deny_list_capacity(),
        }
    }
}

fn default_jwt_secret() -> String {
    DEVELOPMENT_JWT_SECRET.to_string()
}

fn default_token_ttl() -> u64 {
    1
}

fn default_password_min() -> usize {
    6
}

fn default_deny_list_capacity() -> u64 {
    100_000
}
