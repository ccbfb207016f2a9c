use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{config::AppConfig, services::events::EventPublisher};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DatabaseConnection,
    pub publisher: Arc<dyn EventPublisher>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        db: DatabaseConnection,
        publisher: Arc<dyn EventPublisher>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            db,
            publisher,
        })
    }
}
