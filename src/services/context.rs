use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    clock::Clock, db::dao::DaoContext, services::item_service::ItemService, state::AppState,
};

#[derive(Clone)]
pub struct ServiceContext {
    daos: DaoContext,
    clock: Arc<dyn Clock>,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        Self {
            daos: DaoContext::new(db),
            clock,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(&state.db, Arc::clone(&state.clock))
    }

    pub fn item(&self) -> ItemService {
        ItemService::new(self.daos.item(), Arc::clone(&self.clock))
    }
}
