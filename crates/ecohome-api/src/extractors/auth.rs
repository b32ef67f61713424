//! `AuthUser` and `AdminUser` extractors over the access gate's outcome.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use ecohome_auth::jwt::INVALID_TOKEN_MESSAGE;
use ecohome_core::error::AppError;
use ecohome_service::RequestContext;

use crate::error::ApiError;
use crate::middleware::auth::GateState;
use crate::middleware::rbac::require_admin;

/// Authenticated caller, any role.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<GateState>() {
            Some(GateState::Valid(ctx)) => Ok(Self(ctx.clone())),
            Some(GateState::Rejected) => Err(AppError::unauthorized(INVALID_TOKEN_MESSAGE).into()),
            Some(GateState::Unauthenticated) | None => {
                Err(AppError::unauthorized("Authentication required").into())
            }
        }
    }
}

/// Authenticated caller holding exactly the `admin` role.
///
/// Rejection happens during extraction, so the handler body never runs for
/// other roles.
#[derive(Debug, Clone)]
pub struct AdminUser(pub RequestContext);

impl std::ops::Deref for AdminUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(ctx) = AuthUser::from_request_parts(parts, state).await?;
        require_admin(&ctx)?;
        Ok(Self(ctx))
    }
}
