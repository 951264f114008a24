use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{clock::Clock, config::AppConfig};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DatabaseConnection,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseConnection, clock: Arc<dyn Clock>) -> Arc<Self> {
        Arc::new(Self { config, db, clock })
    }
}
