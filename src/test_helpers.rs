use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::{
    config::AppConfig,
    db::connection::sync_schema,
    realtime::RealtimeHandle,
    routes::router,
    services::events::{EventPublisher, ScheduleEvent},
    state::AppState,
};

/// Fresh in-memory SQLite database with the schema applied.
pub async fn memory_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // every pooled connection would otherwise get its own empty database
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    sync_schema(&db).await.expect("sync schema");
    db
}

/// Publisher that keeps every event it receives, in order.
#[derive(Clone, Default)]
pub struct RecordingPublisher {
    events: Arc<Mutex<Vec<ScheduleEvent>>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<ScheduleEvent> {
        self.events.lock().expect("publisher lock").clone()
    }

    pub fn clear(&self) {
        self.events.lock().expect("publisher lock").clear();
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: ScheduleEvent) {
        self.events.lock().expect("publisher lock").push(event);
    }
}

pub async fn test_state(publisher: RecordingPublisher) -> Arc<AppState> {
    let db = memory_db().await;
    AppState::new(AppConfig::default(), db, Arc::new(publisher))
}

/// Full application router backed by an in-memory database and a recording
/// publisher. The realtime route is mounted with a disabled hub.
pub async fn test_app() -> (Router, RecordingPublisher) {
    let publisher = RecordingPublisher::default();
    let state = test_state(publisher.clone()).await;
    let realtime = RealtimeHandle::disabled(state.config.realtime.clone());
    (router(state, realtime), publisher)
}
