use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::{DaoBase, DaoLayerError, DaoResult};
use crate::db::entities::prelude::{Button, Schedule};
use crate::db::entities::{button, schedule};

#[derive(Clone)]
pub struct ScheduleDao {
    db: DatabaseConnection,
}

impl DaoBase for ScheduleDao {
    type Entity = Schedule;
    const ENTITY_NAME: &'static str = "schedule";

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl ScheduleDao {
    /// Lookup first for the common case; the unique index catches a racing
    /// insert of the same password.
    pub async fn create_schedule(&self, password: &str) -> DaoResult<schedule::Model> {
        if self.find_by_password(password).await?.is_some() {
            return Err(DaoLayerError::DuplicatePassword);
        }

        let model = schedule::ActiveModel {
            password: Set(password.to_string()),
            ..Default::default()
        };
        self.create(model)
            .await
            .map_err(DaoLayerError::unique_as_duplicate)
    }

    pub async fn find_by_password(&self, password: &str) -> DaoResult<Option<schedule::Model>> {
        Ok(Schedule::find()
            .filter(schedule::Column::Password.eq(password))
            .one(&self.db)
            .await?)
    }

    pub async fn find_schedule(&self, id: i32) -> DaoResult<Option<schedule::Model>> {
        self.find_by_id(id).await
    }

    pub async fn set_password(&self, id: i32, password: &str) -> DaoResult<schedule::Model> {
        let password = password.to_string();
        self.update(id, move |active| {
            active.password = Set(password);
        })
        .await
        .map_err(DaoLayerError::unique_as_duplicate)
    }

    /// Remove a schedule and every button on it in one transaction.
    ///
    /// Returns the removed button ids (ascending), or `None` when the
    /// schedule does not exist.
    pub async fn delete_with_buttons(&self, id: i32) -> DaoResult<Option<Vec<i32>>> {
        let txn = self.db.begin().await?;

        if Schedule::find_by_id(id).one(&txn).await?.is_none() {
            txn.rollback().await?;
            return Ok(None);
        }

        let button_ids: Vec<i32> = Button::find()
            .filter(button::Column::ScheduleId.eq(id))
            .order_by_asc(button::Column::Id)
            .all(&txn)
            .await?
            .into_iter()
            .map(|button| button.id)
            .collect();

        Button::delete_many()
            .filter(button::Column::ScheduleId.eq(id))
            .exec(&txn)
            .await?;
        Schedule::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(Some(button_ids))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

    use super::ScheduleDao;
    use crate::db::dao::{DaoBase, DaoLayerError};
    use crate::db::entities::{prelude::Schedule, schedule};
    use crate::test_helpers::memory_db;

    fn ts() -> chrono::DateTime<chrono::FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp should be valid")
    }

    fn schedule_model(id: i32, password: &str) -> schedule::Model {
        schedule::Model {
            id,
            password: password.to_string(),
            created_at: ts(),
            updated_at: ts(),
        }
    }

    #[tokio::test]
    async fn create_rejects_taken_password_without_inserting() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([[schedule_model(1, "abc123")]])
            .into_connection();
        let dao = ScheduleDao::new(&db);

        let err = dao
            .create_schedule("abc123")
            .await
            .expect_err("duplicate should fail");

        assert!(matches!(err, DaoLayerError::DuplicatePassword));
        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn find_by_password_returns_none_when_unused() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<schedule::Model>::new()])
            .into_connection();
        let dao = ScheduleDao::new(&db);

        let found = dao
            .find_by_password("nobody")
            .await
            .expect("query should succeed");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn set_password_on_missing_schedule_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<schedule::Model>::new()])
            .into_connection();
        let dao = ScheduleDao::new(&db);

        let err = dao
            .set_password(9, "new")
            .await
            .expect_err("missing schedule should fail");
        assert!(matches!(
            err,
            DaoLayerError::NotFound {
                entity: "schedule",
                id: 9
            }
        ));
    }

    #[tokio::test]
    async fn delete_with_buttons_skips_missing_schedule() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<schedule::Model>::new()])
            .into_connection();
        let dao = ScheduleDao::new(&db);

        let removed = dao
            .delete_with_buttons(5)
            .await
            .expect("query should succeed");
        assert!(removed.is_none());
    }

    #[tokio::test]
    async fn racing_insert_of_same_password_maps_to_duplicate() {
        let db = memory_db().await;
        let dao = ScheduleDao::new(&db);
        let insert = || schedule::ActiveModel {
            password: Set("raced".to_string()),
            ..Default::default()
        };

        dao.create(insert()).await.expect("first insert should succeed");
        let err = dao
            .create(insert())
            .await
            .map_err(DaoLayerError::unique_as_duplicate)
            .expect_err("second insert should hit the unique index");

        assert!(matches!(err, DaoLayerError::DuplicatePassword));
        let rows = Schedule::find()
            .filter(schedule::Column::Password.eq("raced"))
            .count(&db)
            .await
            .expect("count schedules");
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn lookup_errors_surface_as_db_errors() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_errors([DbErr::Custom("lookup failed".to_string())])
            .into_connection();
        let dao = ScheduleDao::new(&db);

        let err = dao
            .find_by_password("abc")
            .await
            .expect_err("lookup should fail");
        assert!(matches!(err, DaoLayerError::Db(_)));
    }
}
