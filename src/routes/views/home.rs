use std::sync::Arc;

use axum::{
    Form, Router,
    extract::{Query, State},
    response::{Redirect, Response},
    routing::{get, post},
};

use crate::{
    error::AppError,
    services::{ServiceContext, schedule_service::ScheduleService},
    state::AppState,
};

use super::{
    forms::{CreateScheduleForm, ErrorQuery, PasswordForm, editor_path, redirect_on_user_error},
    templates::{HomeTemplate, render_page},
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/create_schedule", post(create_schedule))
        .route("/view_schedule", post(view_schedule))
        .with_state(state)
}

fn schedules(state: &AppState) -> ScheduleService {
    ServiceContext::from_state(state).schedule()
}

async fn home(Query(query): Query<ErrorQuery>) -> Result<Response, AppError> {
    render_page(&HomeTemplate {
        error: query.into_message(),
    })
}

async fn create_schedule(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CreateScheduleForm>,
) -> Result<Redirect, AppError> {
    match schedules(&state).create_schedule(&form.new_password).await {
        Ok(schedule) => Ok(Redirect::to(&editor_path(schedule.id))),
        Err(err) => redirect_on_user_error("/", err),
    }
}

async fn view_schedule(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PasswordForm>,
) -> Result<Redirect, AppError> {
    match schedules(&state).find_by_password(&form.password).await {
        Ok(schedule) => Ok(Redirect::to(&editor_path(schedule.id))),
        Err(err) => redirect_on_user_error("/", err),
    }
}
