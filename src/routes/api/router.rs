use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

use super::schedules;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new().merge(schedules::router(state))
}
