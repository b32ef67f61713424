//! Exact-match role guard.
//!
//! Roles form no hierarchy: an `admin` token does not satisfy a route that
//! requires `user`, and vice versa.

use ecohome_core::error::AppError;
use ecohome_entity::identity::IdentityRole;

/// Succeeds only if `actual == required`; otherwise `Forbidden`.
pub fn require_role(actual: IdentityRole, required: IdentityRole) -> Result<(), AppError> {
    if actual == required {
        Ok(())
    } else {
        Err(AppError::forbidden(format!(
            "This operation requires the '{required}' role"
        )))
    }
}
