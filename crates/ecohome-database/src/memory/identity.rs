//! In-memory credential store using `dashmap`.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use ecohome_core::error::AppError;
use ecohome_core::result::AppResult;
use ecohome_core::types::IdentityId;
use ecohome_entity::identity::{Email, Identity, IdentityRole, NewIdentity};

use crate::store::CredentialStore;

/// Credential store keyed by normalized email.
///
/// The shard lock held by `DashMap::entry` makes check-and-insert atomic,
/// which is what keeps concurrent registrations of one email from both
/// succeeding.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    by_email: DashMap<Email, Identity>,
    email_by_id: DashMap<IdentityId, Email>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored identities.
    pub fn len(&self) -> usize {
        self.by_email.len()
    }

    /// Returns true if no identity is stored.
    pub fn is_empty(&self) -> bool {
        self.by_email.is_empty()
    }

    fn email_for(&self, id: IdentityId) -> AppResult<Email> {
        self.email_by_id
            .get(&id)
            .map(|e| e.value().clone())
            .ok_or_else(|| AppError::not_found(format!("Identity {id} not found")))
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn create(&self, data: NewIdentity) -> AppResult<Identity> {
        match self.by_email.entry(data.email.clone()) {
            Entry::Occupied(_) => Err(AppError::duplicate_email(data.email.as_str())),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let identity = Identity {
                    id: IdentityId::new(),
                    email: data.email,
                    password_hash: data.password_hash,
                    role: data.role,
                    created_at: now,
                    updated_at: now,
                };
                self.email_by_id
                    .insert(identity.id, identity.email.clone());
                slot.insert(identity.clone());
                Ok(identity)
            }
        }
    }

    async fn find_by_email(&self, email: &Email) -> AppResult<Identity> {
        self.by_email
            .get(email)
            .map(|i| i.value().clone())
            .ok_or_else(|| AppError::not_found("Identity not found"))
    }

    async fn find_by_id(&self, id: IdentityId) -> AppResult<Identity> {
        let email = self.email_for(id)?;
        self.find_by_email(&email).await
    }

    async fn update_password_hash(&self, id: IdentityId, password_hash: &str) -> AppResult<()> {
        let email = self.email_for(id)?;
        let mut identity = self
            .by_email
            .get_mut(&email)
            .ok_or_else(|| AppError::not_found(format!("Identity {id} not found")))?;
        identity.password_hash = password_hash.to_string();
        identity.updated_at = Utc::now();
        Ok(())
    }

    async fn update_role(&self, id: IdentityId, role: IdentityRole) -> AppResult<Identity> {
        let email = self.email_for(id)?;
        let mut identity = self
            .by_email
            .get_mut(&email)
            .ok_or_else(|| AppError::not_found(format!("Identity {id} not found")))?;
        identity.role = role;
        identity.updated_at = Utc::now();
        Ok(identity.clone())
    }
}
