use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;

use crate::{
    routes::response::{ApiResult, JsonApiResponse},
    services::{ServiceContext, events::ButtonPayload},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct ScheduleButtons {
    pub schedule_id: i32,
    pub buttons: Vec<ButtonPayload>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/schedules/{schedule_id}/buttons", get(list_buttons))
        .with_state(state)
}

/// Current buttons of a schedule, in the same shape as `new_button` events.
async fn list_buttons(
    State(state): State<Arc<AppState>>,
    Path(schedule_id): Path<i32>,
) -> ApiResult<ScheduleButtons> {
    let (schedule, buttons) = ServiceContext::from_state(&state)
        .schedule()
        .schedule_with_buttons(schedule_id)
        .await?;
    JsonApiResponse::ok(ScheduleButtons {
        schedule_id: schedule.id,
        buttons: buttons.iter().map(ButtonPayload::from).collect(),
    })
}
