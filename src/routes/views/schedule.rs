use std::sync::Arc;

use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Redirect, Response},
    routing::{get, post},
};

use crate::{
    error::AppError,
    services::{ServiceContext, schedule_service::ScheduleService},
    state::AppState,
};

use super::{
    forms::{ButtonForm, ErrorQuery, PasswordForm, editor_path, redirect_on_user_error},
    templates::{ButtonView, EditButtonTemplate, ScheduleTemplate, render_page},
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/edit_schedule/{schedule_id}",
            get(edit_schedule_page).post(add_button),
        )
        .route(
            "/edit_button/{button_id}",
            get(edit_button_page).post(update_button),
        )
        .route("/save_password/{schedule_id}", post(save_password))
        .route("/delete_button/{button_id}", post(delete_button))
        .route("/delete_schedule/{schedule_id}", post(delete_schedule))
        .with_state(state)
}

fn schedules(state: &AppState) -> ScheduleService {
    ServiceContext::from_state(state).schedule()
}

async fn edit_schedule_page(
    State(state): State<Arc<AppState>>,
    Path(schedule_id): Path<i32>,
    Query(query): Query<ErrorQuery>,
) -> Result<Response, AppError> {
    let (schedule, buttons) = schedules(&state).schedule_with_buttons(schedule_id).await?;
    render_page(&ScheduleTemplate::new(
        schedule,
        &buttons,
        query.into_message(),
    ))
}

async fn add_button(
    State(state): State<Arc<AppState>>,
    Path(schedule_id): Path<i32>,
    Form(form): Form<ButtonForm>,
) -> Result<Redirect, AppError> {
    schedules(&state)
        .add_button(schedule_id, form.into())
        .await?;
    Ok(Redirect::to(&editor_path(schedule_id)))
}

async fn edit_button_page(
    State(state): State<Arc<AppState>>,
    Path(button_id): Path<i32>,
) -> Result<Response, AppError> {
    let button = schedules(&state).require_button(button_id).await?;
    render_page(&EditButtonTemplate {
        schedule_id: button.schedule_id,
        button: ButtonView::from(&button),
    })
}

async fn update_button(
    State(state): State<Arc<AppState>>,
    Path(button_id): Path<i32>,
    Form(form): Form<ButtonForm>,
) -> Result<Redirect, AppError> {
    let edit = schedules(&state)
        .edit_button(button_id, form.into())
        .await?;
    Ok(Redirect::to(&editor_path(edit.schedule_id())))
}

async fn save_password(
    State(state): State<Arc<AppState>>,
    Path(schedule_id): Path<i32>,
    Form(form): Form<PasswordForm>,
) -> Result<Redirect, AppError> {
    let editor = editor_path(schedule_id);
    match schedules(&state)
        .save_password(schedule_id, &form.password)
        .await
    {
        Ok(_) => Ok(Redirect::to(&editor)),
        Err(err @ AppError::NotFound(_)) => Err(err),
        Err(err) => redirect_on_user_error(&editor, err),
    }
}

async fn delete_button(
    State(state): State<Arc<AppState>>,
    Path(button_id): Path<i32>,
) -> Result<Redirect, AppError> {
    let target = match schedules(&state).delete_button(button_id).await? {
        Some(schedule_id) => editor_path(schedule_id),
        None => "/".to_string(),
    };
    Ok(Redirect::to(&target))
}

async fn delete_schedule(
    State(state): State<Arc<AppState>>,
    Path(schedule_id): Path<i32>,
) -> Result<Redirect, AppError> {
    schedules(&state).delete_schedule(schedule_id).await?;
    Ok(Redirect::to("/"))
}
