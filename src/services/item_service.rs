use std::sync::Arc;

use tracing::{debug, error, info};

use crate::{
    clock::Clock,
    db::dao::{DaoLayerError, ItemDao},
    db::entities::item,
    error::{AppError, INTERNAL_ERROR_MESSAGE},
    models::{CreateItem, PatchItem, ReplaceItem},
};

const NOT_FOUND_MESSAGE: &str = "No item was found";

#[derive(Clone)]
pub struct ItemService {
    item_dao: ItemDao,
    clock: Arc<dyn Clock>,
}

#[derive(Clone, Copy, Debug)]
enum ItemOp {
    Create,
    Find,
    List,
    Update,
    Delete,
}

impl ItemService {
    pub fn new(item_dao: ItemDao, clock: Arc<dyn Clock>) -> Self {
        Self { item_dao, clock }
    }

    pub async fn list(&self) -> Result<Vec<item::Model>, AppError> {
        self.item_dao
            .get_all()
            .await
            .map_err(|err| map_error(ItemOp::List, err))
    }

    pub async fn get(&self, id: i64) -> Result<item::Model, AppError> {
        self.item_dao
            .get_by_id(id)
            .await
            .map_err(|err| map_error(ItemOp::Find, err))
    }

    pub async fn create(&self, body: CreateItem) -> Result<item::Model, AppError> {
        let record = body.into_active_model(self.clock.now());
        let id = self
            .item_dao
            .insert(record)
            .await
            .map_err(|err| map_error(ItemOp::Create, err))?;
        info!(item_id = id, "item created");

        // The row was just written; failing to read it back is a server fault.
        self.item_dao.get_by_id(id).await.map_err(|err| {
            error!(item_id = id, error = %err, "created item could not be read back");
            AppError::internal(INTERNAL_ERROR_MESSAGE)
        })
    }

    pub async fn replace(&self, id: i64, body: ReplaceItem) -> Result<item::Model, AppError> {
        let mut model = self.get(id).await?;
        body.apply(&mut model, self.clock.now());
        self.persist(id, model).await
    }

    pub async fn patch(&self, id: i64, body: PatchItem) -> Result<item::Model, AppError> {
        body.validate()?;
        let mut model = self.get(id).await?;
        body.apply(&mut model, self.clock.now());
        self.persist(id, model).await
    }

    /// Marks the item inactive. Unknown ids are not an error.
    pub async fn soft_delete(&self, id: i64) -> Result<(), AppError> {
        let touched = self
            .item_dao
            .soft_delete(id)
            .await
            .map_err(|err| map_error(ItemOp::Delete, err))?;
        if touched == 0 {
            debug!(item_id = id, "soft delete matched no rows");
        } else {
            info!(item_id = id, "item soft-deleted");
        }
        Ok(())
    }

    async fn persist(&self, id: i64, model: item::Model) -> Result<item::Model, AppError> {
        let touched = self
            .item_dao
            .update(id, &model)
            .await
            .map_err(|err| map_error(ItemOp::Update, err))?;
        if touched == 0 {
            // Fetched a moment ago; the row vanished in between.
            debug!(item_id = id, "update matched no rows");
        } else {
            info!(item_id = id, "item updated");
        }
        Ok(model)
    }
}

fn map_error(op: ItemOp, err: DaoLayerError) -> AppError {
    match err {
        DaoLayerError::NotFound { .. } => AppError::not_found(NOT_FOUND_MESSAGE),
        DaoLayerError::Db(source) => {
            error!(op = ?op, error = %source, "item storage failed");
            AppError::internal(INTERNAL_ERROR_MESSAGE)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    use super::ItemService;
    use crate::{
        clock::MockClock,
        db::dao::{DaoBase, ItemDao},
        db::entities::item,
        error::AppError,
        models::{CreateItem, PatchItem},
    };

    fn service(db: MockDatabase) -> ItemService {
        let conn = db.into_connection();
        ItemService::new(ItemDao::new(&conn), Arc::new(MockClock::default()))
    }

    fn create_body() -> CreateItem {
        CreateItem {
            title: "Bouldering".to_string(),
            description: "Go climbing".to_string(),
        }
    }

    #[tokio::test]
    async fn create_returns_the_stored_row() {
        let created_date = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
        let stored = item::Model {
            id: 3,
            title: "Bouldering".to_string(),
            description: "Go climbing".to_string(),
            created_date,
            modified_date: None,
            completed_date: None,
            is_active: true,
        };
        let svc = service(
            MockDatabase::new(DatabaseBackend::Sqlite)
                .append_exec_results([MockExecResult {
                    last_insert_id: 3,
                    rows_affected: 1,
                }])
                .append_query_results([vec![stored.clone()]]),
        );

        let item = svc.create(create_body()).await.unwrap();
        assert_eq!(item, stored);
    }

    #[tokio::test]
    async fn create_fails_when_the_row_cannot_be_read_back() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::Sqlite)
                .append_exec_results([MockExecResult {
                    last_insert_id: 3,
                    rows_affected: 1,
                }])
                .append_query_results([Vec::<item::Model>::new()]),
        );

        let err = svc
            .create(create_body())
            .await
            .expect_err("read-back should fail");
        assert!(matches!(err, AppError::Internal(ref m) if m == "Internal server error"));
    }

    #[tokio::test]
    async fn create_hides_read_back_storage_errors() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::Sqlite)
                .append_exec_results([MockExecResult {
                    last_insert_id: 3,
                    rows_affected: 1,
                }])
                .append_query_errors([DbErr::Custom("disk I/O error".to_string())]),
        );

        let err = svc
            .create(create_body())
            .await
            .expect_err("read-back should fail");
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.message(), "Internal server error");
    }

    #[tokio::test]
    async fn empty_patch_never_touches_storage() {
        // No results queued: any query would fail the mock.
        let svc = service(MockDatabase::new(DatabaseBackend::Sqlite));

        let err = svc
            .patch(1, PatchItem::default())
            .await
            .expect_err("empty patch should be rejected");
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn missing_item_maps_to_not_found() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::Sqlite)
                .append_query_results([Vec::<item::Model>::new()]),
        );

        let err = svc.get(7).await.expect_err("item should be missing");
        assert!(matches!(err, AppError::NotFound(ref m) if m == "No item was found"));
    }

    #[tokio::test]
    async fn storage_failures_hide_details() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::Sqlite)
                .append_query_errors([DbErr::Custom("database is locked".to_string())]),
        );

        let err = svc.list().await.expect_err("query should fail");
        assert!(matches!(err, AppError::Internal(_)));
        assert!(!err.message().contains("locked"));
    }

    #[tokio::test]
    async fn patch_of_unknown_id_stops_after_lookup() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<item::Model>::new()])
            .into_connection();
        let svc = ItemService::new(
            ItemDao::new(&db),
            Arc::new(MockClock::new(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap())),
        );
        let body: PatchItem = serde_json::from_str(r#"{"isActive":false}"#).unwrap();

        let err = svc.patch(5, body).await.expect_err("item should be missing");
        assert!(matches!(err, AppError::NotFound(_)));

        drop(svc);
        assert_eq!(db.into_transaction_log().len(), 1);
    }
}
