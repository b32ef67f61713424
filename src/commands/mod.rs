//! Operator command definitions and dispatch.

pub mod admin;
pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

use ecohome_core::config::AppConfig;
use ecohome_core::error::AppError;

/// Eco-Home Goods storefront
#[derive(Debug, Parser)]
#[command(name = "ecohome-server", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (selects `config/{env}.toml`)
    #[arg(long, env = "ECOHOME_ENV", default_value = "development")]
    pub env: String,

    /// Subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve,
    /// Apply pending database migrations
    Migrate,
    /// Create an admin identity, or promote an existing one
    CreateAdmin(admin::CreateAdminArgs),
}

impl Cli {
    /// Execute the selected command.
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            None | Some(Commands::Serve) => serve::execute(config).await,
            Some(Commands::Migrate) => migrate::execute(&config).await,
            Some(Commands::CreateAdmin(args)) => admin::execute(args, config).await,
        }
    }
}
