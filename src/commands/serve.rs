//! `serve`: wire the stores and services, then run the HTTP server.

use std::sync::Arc;

use ecohome_api::{AppState, run_server};
use ecohome_auth::PasswordHasher;
use ecohome_core::config::AppConfig;
use ecohome_core::error::AppError;
use ecohome_database::{MemoryCatalog, ProductCatalog, open_credential_store};

/// Start the storefront.
pub async fn execute(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Eco-Home Goods v{}", env!("CARGO_PKG_VERSION"));

    let store = open_credential_store(&config.database).await?;

    let catalog: Arc<dyn ProductCatalog> = match &config.catalog.seed_file {
        Some(path) => Arc::new(MemoryCatalog::from_seed_file(path).await?),
        None => Arc::new(MemoryCatalog::new()),
    };

    if config.auth.uses_default_secret() {
        tracing::warn!("auth.jwt_secret is the built-in development value");
    }

    let state = AppState::new(config, store, catalog, PasswordHasher::new())?;
    run_server(state).await
}
