//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod catalog;
pub mod checkout;
pub mod database;
pub mod invoice;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::{AuthConfig, MAX_TOKEN_TTL_HOURS};
pub use self::catalog::CatalogConfig;
pub use self::checkout::CheckoutConfig;
pub use self::database::{CredentialBackend, DatabaseConfig};
pub use self::invoice::InvoiceConfig;
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Environment variable prefix for overrides, e.g. `ECOHOME__AUTH__JWT_SECRET`.
pub const ENV_PREFIX: &str = "ECOHOME";

/// Environments in which the built-in development secret is tolerated.
const INSECURE_ENVIRONMENTS: &[&str] = &["development", "test"];

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration
/// (default.toml + environment overlay + `ECOHOME__*` variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Credential store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Checkout policy.
    #[serde(default)]
    pub checkout: CheckoutConfig,
    /// Invoice document layout.
    #[serde(default)]
    pub invoice: InvoiceConfig,
    /// Product catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml` with `config/{env}.toml` and environment
    /// variables prefixed with `ECOHOME__`, then validates the result.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate(env)?;
        Ok(config)
    }

    /// Rejects settings that would make the trust path unsafe.
    pub fn validate(&self, env: &str) -> Result<(), AppError> {
        if self.auth.jwt_secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if self.auth.uses_default_secret() && !INSECURE_ENVIRONMENTS.contains(&env) {
            return Err(AppError::configuration(format!(
                "auth.jwt_secret must be set explicitly in the '{env}' environment"
            )));
        }
        if self.auth.token_ttl_hours == 0 {
            return Err(AppError::configuration(
                "auth.token_ttl_hours must be greater than zero",
            ));
        }
        if self.auth.token_ttl_hours > MAX_TOKEN_TTL_HOURS {
            return Err(AppError::configuration(format!(
                "auth.token_ttl_hours must be at most {MAX_TOKEN_TTL_HOURS}"
            )));
        }
        if self.invoice.max_pages == 0 {
            return Err(AppError::configuration(
                "invoice.max_pages must be greater than zero",
            ));
        }
        if self.database.backend == CredentialBackend::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required for the postgres backend",
            ));
        }
        Ok(())
    }
}
