use sea_orm::DatabaseConnection;

use super::{ButtonDao, DaoBase, ScheduleDao};

#[derive(Clone)]
pub struct DaoContext {
    db: DatabaseConnection,
}

impl DaoContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub fn schedule(&self) -> ScheduleDao {
        DaoBase::new(&self.db)
    }

    pub fn button(&self) -> ButtonDao {
        DaoBase::new(&self.db)
    }
}
