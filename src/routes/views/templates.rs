use askama::Template;
use axum::response::{Html, IntoResponse, Response};

use crate::{
    db::entities::{button, schedule},
    error::AppError,
};

/// A button as the pages draw it; absent fields render as empty strings.
pub struct ButtonView {
    pub id: i32,
    pub when: String,
    pub place: String,
    pub who: String,
    pub color: &'static str,
}

impl From<&button::Model> for ButtonView {
    fn from(model: &button::Model) -> Self {
        Self {
            id: model.id,
            when: model.when.clone().unwrap_or_default(),
            place: model.place.clone().unwrap_or_default(),
            who: model.who.clone().unwrap_or_default(),
            color: model.color(),
        }
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "schedule.html")]
pub struct ScheduleTemplate {
    pub schedule_id: i32,
    pub password: String,
    pub buttons: Vec<ButtonView>,
    pub error: Option<String>,
}

impl ScheduleTemplate {
    pub fn new(
        schedule: schedule::Model,
        buttons: &[button::Model],
        error: Option<String>,
    ) -> Self {
        Self {
            schedule_id: schedule.id,
            password: schedule.password,
            buttons: buttons.iter().map(ButtonView::from).collect(),
            error,
        }
    }
}

#[derive(Template)]
#[template(path = "edit_button.html")]
pub struct EditButtonTemplate {
    pub schedule_id: i32,
    pub button: ButtonView,
}

pub fn render_page(page: &impl Template) -> Result<Response, AppError> {
    let rendered = page.render().map_err(|err| {
        tracing::error!(error = %err, "failed to render page");
        AppError::internal("failed to render page")
    })?;
    Ok(Html(rendered).into_response())
}
