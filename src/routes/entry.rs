use std::sync::Arc;

use axum::Router;

use crate::{realtime::RealtimeHandle, state::AppState};

use super::{api, views};

pub const API_PREFIX: &str = "/api/v1";

pub fn router(state: Arc<AppState>, hub: RealtimeHandle) -> Router {
    Router::new()
        .nest(API_PREFIX, api::router(state.clone()))
        .merge(views::router(state))
        .merge(realtime::server::axum::router(hub))
}
