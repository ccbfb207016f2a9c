use axum::response::Redirect;
use serde::Deserialize;

use crate::{db::dao::ButtonFields, error::AppError};

#[derive(Debug, Default, Deserialize)]
pub struct ErrorQuery {
    pub error: Option<String>,
}

impl ErrorQuery {
    pub fn into_message(self) -> Option<String> {
        self.error.filter(|message| !message.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateScheduleForm {
    #[serde(default)]
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordForm {
    #[serde(default)]
    pub password: String,
}

/// The `when` / `where` / `who` inputs shared by the add and edit forms.
#[derive(Debug, Default, Deserialize)]
pub struct ButtonForm {
    #[serde(default)]
    pub when: Option<String>,
    #[serde(default, rename = "where")]
    pub place: Option<String>,
    #[serde(default)]
    pub who: Option<String>,
}

impl From<ButtonForm> for ButtonFields {
    fn from(form: ButtonForm) -> Self {
        ButtonFields::new(form.when, form.place, form.who)
    }
}

pub fn editor_path(schedule_id: i32) -> String {
    format!("/edit_schedule/{schedule_id}")
}

/// 303 to `path` with `message` in the `error` query parameter.
pub fn redirect_with_error(path: &str, message: &str) -> Redirect {
    Redirect::to(&format!("{path}?error={}", urlencoding::encode(message)))
}

/// Turn user-facing failures into a redirect carrying the message; anything
/// else stays an error and renders as a page.
pub fn redirect_on_user_error(path: &str, err: AppError) -> Result<Redirect, AppError> {
    match err {
        AppError::BadRequest(message)
        | AppError::Conflict(message)
        | AppError::NotFound(message) => Ok(redirect_with_error(path, &message)),
        other => Err(other),
    }
}
