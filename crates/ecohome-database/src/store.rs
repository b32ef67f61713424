//! The credential store contract.

use async_trait::async_trait;

use ecohome_core::result::AppResult;
use ecohome_core::types::IdentityId;
use ecohome_entity::identity::{Email, Identity, IdentityRole, NewIdentity};

/// Owns identity records and their password hashes.
///
/// Implementations must enforce email uniqueness atomically: two concurrent
/// `create` calls for the same (normalized) email must not both succeed.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Persist a new identity.
    ///
    /// Fails with `ErrorKind::DuplicateEmail` when the email is already taken.
    async fn create(&self, data: NewIdentity) -> AppResult<Identity>;

    /// Look up an identity by normalized email.
    ///
    /// Fails with `ErrorKind::NotFound` when no identity has this email.
    async fn find_by_email(&self, email: &Email) -> AppResult<Identity>;

    /// Look up an identity by primary key.
    async fn find_by_id(&self, id: IdentityId) -> AppResult<Identity>;

    /// Replace the stored hash after a new plaintext password was supplied.
    async fn update_password_hash(&self, id: IdentityId, password_hash: &str) -> AppResult<()>;

    /// Change the role of an existing identity. Operator use only.
    async fn update_role(&self, id: IdentityId, role: IdentityRole) -> AppResult<Identity>;
}
