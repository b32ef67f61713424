//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ecohome_core::types::IdentityId;
use ecohome_entity::identity::{Identity, IdentityRole};
use ecohome_service::{AuthSession, RequestContext};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Public view of an identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResponse {
    pub id: IdentityId,
    pub email: String,
    pub role: IdentityRole,
    pub created_at: DateTime<Utc>,
}

impl From<&Identity> for IdentityResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email.to_string(),
            role: identity.role,
            created_at: identity.created_at,
        }
    }
}

/// Register and login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
    /// The signed-in identity.
    pub identity: IdentityResponse,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            identity: IdentityResponse::from(&session.identity),
            token: session.token,
            expires_at: session.expires_at,
        }
    }
}

/// The identity attached to the current request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub identity_id: IdentityId,
    pub role: IdentityRole,
    pub expires_at: DateTime<Utc>,
}

impl From<&RequestContext> for SessionResponse {
    fn from(ctx: &RequestContext) -> Self {
        Self {
            identity_id: ctx.identity_id,
            role: ctx.role,
            expires_at: ctx.expires_at,
        }
    }
}

/// Logout acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    /// Whether the token was revoked server-side.
    pub revoked: bool,
    /// Message.
    pub message: String,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" when the process can answer.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since startup.
    pub uptime_seconds: u64,
}
