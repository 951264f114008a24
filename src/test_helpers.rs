use std::sync::Arc;

use axum::Router;

use crate::{
    clock::Clock,
    config::{AppConfig, DatabaseConfig},
    db::connection,
    routes::app,
    state::AppState,
};

/// Fresh in-memory database with the items table, wired to `clock`.
pub async fn test_state(clock: Arc<dyn Clock>) -> Arc<AppState> {
    let cfg = AppConfig {
        database: Some(DatabaseConfig::in_memory()),
        ..AppConfig::default()
    };
    let db = connection::connect(cfg.database().expect("database config should be set"))
        .await
        .expect("connect to in-memory sqlite");
    AppState::new(cfg, db, clock)
}

pub async fn test_router(clock: Arc<dyn Clock>) -> Router {
    app(test_state(clock).await)
}
