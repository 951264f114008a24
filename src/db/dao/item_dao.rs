use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, sea_query::Expr,
};

use super::{DaoBase, DaoLayerError, DaoResult};
use crate::db::entities::item;
use crate::db::entities::prelude::Item;

#[derive(Clone)]
pub struct ItemDao {
    db: DatabaseConnection,
}

impl DaoBase for ItemDao {
    type Entity = Item;

    fn from_db(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl ItemDao {
    /// Inserts a row and returns the id assigned by SQLite.
    pub async fn insert(&self, record: item::ActiveModel) -> DaoResult<i64> {
        let result = Item::insert(record)
            .exec(&self.db)
            .await
            .map_err(DaoLayerError::Db)?;
        Ok(result.last_insert_id)
    }

    pub async fn get_by_id(&self, id: i64) -> DaoResult<item::Model> {
        self.find_by_id(id).await
    }

    pub async fn get_all(&self) -> DaoResult<Vec<item::Model>> {
        self.find_all().await
    }

    /// Overwrites every mutable column of row `id` with the values in `model`.
    /// `id` and `created_date` are never written. Returns the number of rows
    /// touched, which is zero when `id` does not exist.
    pub async fn update(&self, id: i64, model: &item::Model) -> DaoResult<u64> {
        let changes = item::ActiveModel {
            title: Set(model.title.clone()),
            description: Set(model.description.clone()),
            modified_date: Set(model.modified_date),
            completed_date: Set(model.completed_date),
            is_active: Set(model.is_active),
            ..Default::default()
        };

        let result = Item::update_many()
            .set(changes)
            .filter(item::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(DaoLayerError::Db)?;
        Ok(result.rows_affected)
    }

    /// Flags row `id` inactive. Like `update`, a missing row is not an error.
    pub async fn soft_delete(&self, id: i64) -> DaoResult<u64> {
        let result = Item::update_many()
            .col_expr(item::Column::IsActive, Expr::value(false))
            .filter(item::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(DaoLayerError::Db)?;
        Ok(result.rows_affected)
    }
}
