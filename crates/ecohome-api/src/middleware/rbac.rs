//! RBAC helpers for role-based route guarding.

use ecohome_core::error::AppError;
use ecohome_entity::identity::IdentityRole;
use ecohome_service::RequestContext;

/// Checks that the caller's role is exactly `required`.
pub fn require_role(ctx: &RequestContext, required: IdentityRole) -> Result<(), AppError> {
    ecohome_auth::require_role(ctx.role, required)
}

/// Checks that the caller has the Admin role.
pub fn require_admin(ctx: &RequestContext) -> Result<(), AppError> {
    require_role(ctx, IdentityRole::Admin)
}
