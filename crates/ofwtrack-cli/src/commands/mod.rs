//! CLI command definitions and dispatch.

pub mod migrate;
pub mod notifications;
pub mod notify;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use ofwtrack_core::config::AppConfig;
use ofwtrack_core::error::AppError;
use ofwtrack_database::DatabasePool;
use ofwtrack_database::repositories::{DirectoryRepository, NotificationRepository};
use ofwtrack_realtime::{DispatchService, build_channel};

/// OFW Track workflow notification engine
#[derive(Debug, Parser)]
#[command(name = "ofwtrack", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay (`config/{env}.toml`)
    #[arg(long, env = "OFWTRACK_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Inspect and mark a user's notifications
    Notifications(notifications::NotificationsArgs),
    /// Dispatch a workflow notification by hand
    Notify(notify::NotifyArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, config).await,
            Commands::Notifications(args) => {
                notifications::execute(args, config, self.format).await
            }
            Commands::Notify(args) => notify::execute(args, config, self.format).await,
        }
    }
}

/// Helper: create database pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<sqlx::PgPool, AppError> {
    let pool = DatabasePool::connect(&config.database).await?;
    Ok(pool.into_pool())
}

/// Helper: wire a dispatcher over the PostgreSQL collaborators
pub fn create_dispatcher(
    config: &AppConfig,
    pool: &sqlx::PgPool,
) -> Result<DispatchService, AppError> {
    let channel = build_channel(&config.realtime)?;
    Ok(DispatchService::new(
        Arc::new(NotificationRepository::new(pool.clone())),
        Arc::new(DirectoryRepository::new(pool.clone())),
        channel,
        config.realtime.clone(),
    ))
}
