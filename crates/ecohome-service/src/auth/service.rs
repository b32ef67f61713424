//! Authentication use cases.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use ecohome_auth::{IssuedToken, PasswordHasher, PasswordValidator, TokenIssuer};
use ecohome_core::error::{AppError, ErrorKind};
use ecohome_database::CredentialStore;
use ecohome_entity::identity::{Email, Identity, IdentityRole, NewIdentity};

use crate::context::RequestContext;

/// Plaintext hashed once at startup so unknown-email logins cost one verify.
const TIMING_DECOY: &str = "ecohome-timing-decoy";

/// A signed-in identity and its session token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    /// The authenticated identity (hash not serialized).
    pub identity: Identity,
    /// Session token.
    pub token: String,
    /// Token expiration.
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    fn new(identity: Identity, issued: IssuedToken) -> Self {
        Self {
            identity,
            token: issued.token,
            expires_at: issued.expires_at,
        }
    }
}

/// Handles credential issuance and verification.
#[derive(Clone)]
pub struct AuthService {
    /// Identity records.
    store: Arc<dyn CredentialStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    validator: Arc<PasswordValidator>,
    /// Session tokens.
    issuer: Arc<TokenIssuer>,
    /// Digest verified against when the email is unknown.
    decoy_digest: Arc<str>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    /// Creates the service. Hashes the timing decoy once, synchronously.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        issuer: Arc<TokenIssuer>,
    ) -> Result<Self, AppError> {
        let decoy_digest = hasher.hash(TIMING_DECOY)?;
        Ok(Self {
            store,
            hasher,
            validator,
            issuer,
            decoy_digest: Arc::from(decoy_digest),
        })
    }

    /// Returns the token issuer used by this service.
    pub fn issuer(&self) -> &Arc<TokenIssuer> {
        &self.issuer
    }

    /// Registers a new identity with role `user` and signs it in.
    pub async fn register(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let email = parse_email(email)?;
        self.validator.validate(password)?;

        let password_hash = self.hash(password).await?;
        let identity = self
            .store
            .create(NewIdentity {
                email,
                password_hash,
                role: IdentityRole::User,
            })
            .await?;

        let issued = self.issuer.issue(&identity)?;
        info!(identity_id = %identity.id, role = %identity.role, "Identity registered");

        Ok(AuthSession::new(identity, issued))
    }

    /// Verifies credentials and issues a session token.
    ///
    /// Unknown email, malformed email, and wrong password all fail with the
    /// same `InvalidCredentials` error after the same amount of hashing work.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let identity = match Email::parse(email) {
            Ok(email) => match self.store.find_by_email(&email).await {
                Ok(identity) => Some(identity),
                Err(e) if e.kind == ErrorKind::NotFound => None,
                Err(e) => return Err(e),
            },
            Err(_) => None,
        };

        let digest = identity
            .as_ref()
            .map(|i| i.password_hash.clone())
            .unwrap_or_else(|| self.decoy_digest.to_string());
        let verified = self.verify(password, digest).await?;

        let identity = match identity {
            Some(identity) if verified => identity,
            _ => {
                warn!("Login failed");
                return Err(AppError::invalid_credentials());
            }
        };

        let issued = self.issuer.issue(&identity)?;
        info!(identity_id = %identity.id, role = %identity.role, "Login succeeded");

        Ok(AuthSession::new(identity, issued))
    }

    /// Ends the caller's session.
    ///
    /// Returns whether the token was revoked server-side; without revocation
    /// the client is expected to discard it.
    pub async fn logout(&self, ctx: &RequestContext) -> bool {
        let revoked = self.issuer.revoke(ctx.token_id, ctx.expires_at).await;
        info!(identity_id = %ctx.identity_id, revoked, "Logout");
        revoked
    }

    /// Replaces the caller's password after re-checking the current one.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let identity = self.store.find_by_id(ctx.identity_id).await?;

        if !self.verify(current_password, identity.password_hash).await? {
            return Err(AppError::invalid_credentials());
        }

        self.validator.validate(new_password)?;
        self.validator
            .validate_not_same(current_password, new_password)?;

        let new_hash = self.hash(new_password).await?;
        self.store
            .update_password_hash(ctx.identity_id, &new_hash)
            .await?;

        info!(identity_id = %ctx.identity_id, "Password changed");
        Ok(())
    }

    /// Creates an admin identity, or promotes and re-keys an existing one.
    ///
    /// Operator-only: reachable from the CLI, never from the HTTP API.
    pub async fn provision_admin(&self, email: &str, password: &str) -> Result<Identity, AppError> {
        let email = parse_email(email)?;
        self.validator.validate(password)?;
        let password_hash = self.hash(password).await?;

        let identity = match self.store.find_by_email(&email).await {
            Ok(existing) => {
                self.store
                    .update_password_hash(existing.id, &password_hash)
                    .await?;
                self.store
                    .update_role(existing.id, IdentityRole::Admin)
                    .await?
            }
            Err(e) if e.kind == ErrorKind::NotFound => {
                self.store
                    .create(NewIdentity {
                        email,
                        password_hash,
                        role: IdentityRole::Admin,
                    })
                    .await?
            }
            Err(e) => return Err(e),
        };

        info!(identity_id = %identity.id, "Admin provisioned");
        Ok(identity)
    }

    async fn hash(&self, password: &str) -> Result<String, AppError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
    }

    async fn verify(&self, password: &str, digest: String) -> Result<bool, AppError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))
    }
}

fn parse_email(email: &str) -> Result<Email, AppError> {
    Email::parse(email).map_err(|e| AppError::validation(format!("Invalid email: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecohome_core::config::AuthConfig;
    use ecohome_database::MemoryCredentialStore;

    fn service_with(config: AuthConfig) -> AuthService {
        AuthService::new(
            Arc::new(MemoryCredentialStore::new()),
            Arc::new(PasswordHasher::with_params(1024, 1, 1).unwrap()),
            Arc::new(PasswordValidator::new(&config)),
            Arc::new(TokenIssuer::new(&config)),
        )
        .unwrap()
    }

    fn service() -> AuthService {
        service_with(AuthConfig::default())
    }

    fn ctx_for(service: &AuthService, token: &str) -> RequestContext {
        RequestContext::from_claims(&service.issuer().validate(token).unwrap())
    }

    #[tokio::test]
    async fn test_register_then_login_role_matches() {
        let service = service();
        let registered = service.register("a@x.com", "Secret1!").await.unwrap();
        assert_eq!(registered.identity.role, IdentityRole::User);

        let session = service.login("a@x.com", "Secret1!").await.unwrap();
        let claims = service.issuer().validate(&session.token).unwrap();
        assert_eq!(claims.sub, registered.identity.id);
        assert_eq!(claims.role, registered.identity.role);
    }

    #[tokio::test]
    async fn test_login_email_is_case_insensitive() {
        let service = service();
        service.register("Shopper@Example.com", "Secret1!").await.unwrap();
        assert!(service.login("shopper@example.COM", "Secret1!").await.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let service = service();
        service.register("a@x.com", "Secret1!").await.unwrap();
        let err = service.register("A@X.COM", "Other12!").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateEmail);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_identical() {
        let service = service();
        service.register("a@x.com", "Secret1!").await.unwrap();

        let wrong = service.login("a@x.com", "Secret2!").await.unwrap_err();
        let unknown = service.login("nobody@x.com", "Secret1!").await.unwrap_err();
        let malformed = service.login("not-an-email", "Secret1!").await.unwrap_err();

        for err in [&wrong, &unknown, &malformed] {
            assert_eq!(err.kind, ErrorKind::InvalidCredentials);
            assert_eq!(err.message, wrong.message);
        }
    }

    #[tokio::test]
    async fn test_register_validates_input() {
        let service = service();
        assert_eq!(
            service.register("bad", "Secret1!").await.unwrap_err().kind,
            ErrorKind::Validation
        );
        assert_eq!(
            service.register("a@x.com", "short").await.unwrap_err().kind,
            ErrorKind::Validation
        );
    }

    #[tokio::test]
    async fn test_change_password() {
        let service = service();
        let session = service.register("a@x.com", "Secret1!").await.unwrap();
        let ctx = ctx_for(&service, &session.token);

        let err = service
            .change_password(&ctx, "wrong-pass", "NewSecret1!")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCredentials);

        service
            .change_password(&ctx, "Secret1!", "NewSecret1!")
            .await
            .unwrap();
        assert!(service.login("a@x.com", "Secret1!").await.is_err());
        assert!(service.login("a@x.com", "NewSecret1!").await.is_ok());
    }

    #[tokio::test]
    async fn test_provision_admin_creates_and_promotes() {
        let service = service();

        let fresh = service.provision_admin("ops@x.com", "Admin123!").await.unwrap();
        assert_eq!(fresh.role, IdentityRole::Admin);

        let user = service.register("a@x.com", "Secret1!").await.unwrap();
        let promoted = service.provision_admin("a@x.com", "Rotated1!").await.unwrap();
        assert_eq!(promoted.id, user.identity.id);
        assert_eq!(promoted.role, IdentityRole::Admin);

        let session = service.login("a@x.com", "Rotated1!").await.unwrap();
        assert_eq!(
            service.issuer().validate(&session.token).unwrap().role,
            IdentityRole::Admin
        );
    }

    #[tokio::test]
    async fn test_logout_revokes_only_when_enabled() {
        let stateless = service();
        let session = stateless.register("a@x.com", "Secret1!").await.unwrap();
        let ctx = ctx_for(&stateless, &session.token);
        assert!(!stateless.logout(&ctx).await);
        assert!(stateless.issuer().validate(&session.token).is_ok());

        let revoking = service_with(AuthConfig {
            revocation_enabled: true,
            ..AuthConfig::default()
        });
        let session = revoking.register("a@x.com", "Secret1!").await.unwrap();
        let ctx = ctx_for(&revoking, &session.token);
        assert!(revoking.logout(&ctx).await);
        assert_eq!(
            revoking.issuer().validate(&session.token).unwrap_err().kind,
            ErrorKind::Unauthorized
        );
    }
}
