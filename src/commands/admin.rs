//! `create-admin`: the only way an identity obtains the admin role.

use std::sync::Arc;

use clap::Args;

use ecohome_auth::{PasswordHasher, PasswordValidator, TokenIssuer};
use ecohome_core::config::{AppConfig, CredentialBackend};
use ecohome_core::error::AppError;
use ecohome_database::open_credential_store;
use ecohome_service::AuthService;

/// Arguments for `create-admin`
#[derive(Debug, Args)]
pub struct CreateAdminArgs {
    /// Admin email address
    #[arg(short, long)]
    pub email: String,
    /// Admin password
    #[arg(short, long, env = "ECOHOME_ADMIN_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Create the admin identity, or promote and re-key an existing one.
pub async fn execute(args: &CreateAdminArgs, config: AppConfig) -> Result<(), AppError> {
    if config.database.backend != CredentialBackend::Postgres {
        return Err(AppError::configuration(
            "create-admin requires database.backend = \"postgres\"",
        ));
    }

    let store = open_credential_store(&config.database).await?;
    let service = AuthService::new(
        store,
        Arc::new(PasswordHasher::new()),
        Arc::new(PasswordValidator::new(&config.auth)),
        Arc::new(TokenIssuer::new(&config.auth)),
    )?;

    let identity = service.provision_admin(&args.email, &args.password).await?;
    println!("Admin ready: {} ({})", identity.email, identity.id);
    Ok(())
}
