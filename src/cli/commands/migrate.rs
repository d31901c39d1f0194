use anyhow::Context;

use crate::config::config;
use crate::database::DatabaseManager;

pub async fn handle() -> anyhow::Result<()> {
    let pool = super::connect(config()).await?;
    DatabaseManager::migrate(&pool).await.context("migration failed")?;
    println!("✓ Migrations applied");
    Ok(())
}
