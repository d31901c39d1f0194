use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use tokio::net::TcpListener;

use crate::app;
use crate::config::config;
use crate::database::{DatabaseManager, MemoryBlogStore, MemoryUserStore, PgBlogStore, PgUserStore};
use crate::is_production;
use crate::state::AppState;

pub async fn handle(memory: bool) -> anyhow::Result<()> {
    let config = config().clone();
    tracing::info!("Starting Blog API in {:?} mode", config.environment);

    let state = if memory {
        if is_production!() {
            bail!("--memory is not allowed in production");
        }
        config.validate().map_err(|e| anyhow!("invalid configuration: {}", e))?;
        tracing::warn!("Using in-memory stores; data is lost on shutdown");
        AppState::new(config.clone(), Arc::new(MemoryBlogStore::new()), Arc::new(MemoryUserStore::new()))
    } else {
        let pool = super::connect(&config).await?;
        DatabaseManager::migrate(&pool).await.context("migration failed")?;
        AppState::new(config.clone(), Arc::new(PgBlogStore::new(pool.clone())), Arc::new(PgUserStore::new(pool)))
    };

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    app::serve(listener, state).await
}
