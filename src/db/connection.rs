use std::time::Duration;

use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::config::DatabaseConfig;

const SQLITE_BUSY_TIMEOUT_MS: u64 = 5_000;

pub async fn connect(cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
    let db = Database::connect(connect_options(cfg))
        .await
        .with_context(|| format!("failed to open sqlite database at '{}'", cfg.path))?;
    post_connect(&db).await?;

    info!("syncing database schema from entities");
    db.get_schema_registry("items_api::db::entities::*")
        .sync(&db)
        .await
        .context("failed to create items table")?;
    Ok(db)
}

fn connect_options(cfg: &DatabaseConfig) -> ConnectOptions {
    let mut options = ConnectOptions::new(cfg.url());
    if cfg.is_in_memory() {
        // Every pooled connection to :memory: opens its own empty database, so
        // the single connection must never be reaped or recycled.
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    } else {
        options
            .max_connections(cfg.max_connections)
            .min_connections(cfg.min_idle);
    }
    options
        .connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    options
}

async fn post_connect(db: &DatabaseConnection) -> Result<()> {
    db.execute_unprepared(&format!("PRAGMA busy_timeout = {SQLITE_BUSY_TIMEOUT_MS}"))
        .await?;
    Ok(())
}
