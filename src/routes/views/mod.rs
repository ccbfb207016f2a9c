use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

mod forms;
pub mod home;
pub mod schedule;
mod templates;

pub fn router(state: Arc<AppState>) -> Router {
    let public_dir = resolve_public_dir(&state.config.general.public_dir);
    Router::new()
        .merge(home::router(state.clone()))
        .merge(schedule::router(state))
        .nest_service("/static", ServeDir::new(public_dir))
}

fn resolve_public_dir(configured: &str) -> PathBuf {
    let configured = Path::new(configured);
    if configured.is_absolute() {
        return configured.to_path_buf();
    }

    if let Ok(current_dir) = std::env::current_dir() {
        let candidate = current_dir.join(configured);
        if candidate.exists() {
            return candidate;
        }
    }

    Path::new(env!("CARGO_MANIFEST_DIR")).join(configured)
}
