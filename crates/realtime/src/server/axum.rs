use axum::{
    Router,
    extract::{
        State,
        ws::{WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use super::RealtimeHandle;

pub const SOCKET_PATH: &str = "/realtime/socket";

#[derive(Debug)]
enum RealtimeHttpError {
    UpgradeRequired,
    RealtimeDisabled,
}

impl RealtimeHttpError {
    fn status(&self) -> StatusCode {
        match self {
            Self::UpgradeRequired => StatusCode::BAD_REQUEST,
            Self::RealtimeDisabled => StatusCode::NOT_FOUND,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Self::UpgradeRequired => "WebSocket upgrade required",
            Self::RealtimeDisabled => "Realtime is disabled",
        }
    }
}

impl IntoResponse for RealtimeHttpError {
    fn into_response(self) -> Response {
        (self.status(), self.message()).into_response()
    }
}

pub fn router(handle: RealtimeHandle) -> Router {
    Router::new()
        .route(SOCKET_PATH, get(socket_handler))
        .with_state(handle)
}

async fn socket_handler(
    State(realtime): State<RealtimeHandle>,
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    if !realtime.is_enabled() {
        return RealtimeHttpError::RealtimeDisabled.into_response();
    }

    let upgrade = match upgrade {
        Ok(upgrade) => upgrade,
        Err(_) => return RealtimeHttpError::UpgradeRequired.into_response(),
    };

    upgrade
        .max_message_size(realtime.max_message_bytes())
        .max_frame_size(realtime.max_message_bytes())
        .on_upgrade(move |socket| async move {
            realtime.serve_socket(socket).await;
        })
        .into_response()
}
