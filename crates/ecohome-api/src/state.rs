//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use ecohome_auth::{PasswordHasher, PasswordValidator, TokenIssuer};
use ecohome_core::config::AppConfig;
use ecohome_core::error::AppError;
use ecohome_database::{CredentialStore, ProductCatalog};
use ecohome_invoice::InvoiceRenderer;
use ecohome_service::{AuthService, CatalogService, CheckoutService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Session token issuer and validator
    pub token_issuer: Arc<TokenIssuer>,
    /// Registration, login, logout
    pub auth_service: Arc<AuthService>,
    /// Cart consolidation and invoice rendering
    pub checkout_service: Arc<CheckoutService>,
    /// Product catalog
    pub catalog_service: Arc<CatalogService>,
    /// Process start, for the health endpoint
    pub started_at: Instant,
}

impl AppState {
    /// Wires services over the given credential store and catalog.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn CredentialStore>,
        catalog: Arc<dyn ProductCatalog>,
        hasher: PasswordHasher,
    ) -> Result<Self, AppError> {
        let token_issuer = Arc::new(TokenIssuer::new(&config.auth));
        let auth_service = Arc::new(AuthService::new(
            store,
            Arc::new(hasher),
            Arc::new(PasswordValidator::new(&config.auth)),
            Arc::clone(&token_issuer),
        )?);
        let checkout_service = Arc::new(CheckoutService::new(
            InvoiceRenderer::new(config.invoice.clone()),
            config.checkout.clone(),
        ));
        let catalog_service = Arc::new(CatalogService::new(catalog));

        Ok(Self {
            config: Arc::new(config),
            token_issuer,
            auth_service,
            checkout_service,
            catalog_service,
            started_at: Instant::now(),
        })
    }
}
