//! PostgreSQL-backed credential store.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::debug;

use ecohome_core::error::{AppError, ErrorKind};
use ecohome_core::result::AppResult;
use ecohome_core::types::IdentityId;
use ecohome_entity::identity::{Email, Identity, IdentityRole, NewIdentity};

use crate::store::CredentialStore;

/// Unique index enforcing case-insensitive email uniqueness.
const EMAIL_UNIQUE_INDEX: &str = "identities_email_key";

/// Credential store over the `identities` table.
#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    /// Create a new store on top of an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn create(&self, data: NewIdentity) -> AppResult<Identity> {
        let now = Utc::now();
        let identity = sqlx::query_as::<_, Identity>(
            "INSERT INTO identities (id, email, password_hash, role, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $5) \
             RETURNING *",
        )
        .bind(IdentityId::new())
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(data.role)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.is_unique_violation()
                    || db_err.constraint() == Some(EMAIL_UNIQUE_INDEX) =>
            {
                AppError::duplicate_email(data.email.as_str())
            }
            other => AppError::with_source(ErrorKind::Database, "Failed to create identity", other),
        })?;

        debug!(identity_id = %identity.id, "Identity row inserted");
        Ok(identity)
    }

    async fn find_by_email(&self, email: &Email) -> AppResult<Identity> {
        sqlx::query_as::<_, Identity>("SELECT * FROM identities WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find identity by email", e)
            })?
            .ok_or_else(|| AppError::not_found("Identity not found"))
    }

    async fn find_by_id(&self, id: IdentityId) -> AppResult<Identity> {
        sqlx::query_as::<_, Identity>("SELECT * FROM identities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find identity by id", e)
            })?
            .ok_or_else(|| AppError::not_found(format!("Identity {id} not found")))
    }

    async fn update_password_hash(&self, id: IdentityId, password_hash: &str) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE identities SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update password hash", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Identity {id} not found")));
        }
        Ok(())
    }

    async fn update_role(&self, id: IdentityId, role: IdentityRole) -> AppResult<Identity> {
        sqlx::query_as::<_, Identity>(
            "UPDATE identities SET role = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update role", e))?
        .ok_or_else(|| AppError::not_found(format!("Identity {id} not found")))
    }
}
