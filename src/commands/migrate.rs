//! `migrate`: apply pending PostgreSQL migrations.

use ecohome_core::config::{AppConfig, CredentialBackend};
use ecohome_core::error::AppError;
use ecohome_database::DatabasePool;

/// Run all pending migrations against `database.url`.
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    if config.database.backend != CredentialBackend::Postgres {
        return Err(AppError::configuration(
            "migrate requires database.backend = \"postgres\"",
        ));
    }

    let pool = DatabasePool::connect(&config.database).await?;
    pool.migrate().await?;
    pool.close().await;
    println!("All migrations applied successfully.");
    Ok(())
}
