pub mod migrate;
pub mod serve;
pub mod user;

use anyhow::{anyhow, Context};
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::database::DatabaseManager;

/// Validated configuration plus a live pool
pub(crate) async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    config.validate().map_err(|e| anyhow!("invalid configuration: {}", e))?;
    DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")
}
