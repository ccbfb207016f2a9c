use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    db::dao::DaoContext,
    services::{events::EventPublisher, schedule_service::ScheduleService},
    state::AppState,
};

#[derive(Clone)]
pub struct ServiceContext {
    daos: DaoContext,
    publisher: Arc<dyn EventPublisher>,
}

impl ServiceContext {
    pub fn new(db: &DatabaseConnection, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            daos: DaoContext::new(db),
            publisher,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(&state.db, Arc::clone(&state.publisher))
    }

    pub fn schedule(&self) -> ScheduleService {
        ScheduleService::new(
            self.daos.schedule(),
            self.daos.button(),
            Arc::clone(&self.publisher),
        )
    }
}
