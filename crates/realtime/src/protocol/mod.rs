use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
}

impl ErrorPayload {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Frames a browser may send. Viewers are receive-only, so the only
/// request is an application level ping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ClientFrame {
    Ping {
        id: String,
        #[serde(default)]
        ts: Option<i64>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ServerFrame {
    Connected {
        id: String,
        conn_id: String,
        ts: i64,
    },
    Event {
        id: String,
        event: String,
        data: Value,
        ts: i64,
    },
    Pong {
        id: String,
        ts: i64,
    },
    Error {
        id: String,
        error: ErrorPayload,
        ts: i64,
    },
}

impl ServerFrame {
    pub fn connected(conn_id: impl Into<String>) -> Self {
        Self::Connected {
            id: random_id(),
            conn_id: conn_id.into(),
            ts: now_unix_i64(),
        }
    }

    pub fn event(event: impl Into<String>, data: Value) -> Self {
        Self::Event {
            id: random_id(),
            event: event.into(),
            data,
            ts: now_unix_i64(),
        }
    }

    pub fn pong(for_id: impl Into<String>) -> Self {
        Self::Pong {
            id: for_id.into(),
            ts: now_unix_i64(),
        }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self::Error {
            id: random_id(),
            error: ErrorPayload::new(code, message),
            ts: now_unix_i64(),
        }
    }
}

fn random_id() -> String {
    Uuid::new_v4().to_string()
}

fn now_unix_i64() -> i64 {
    Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn event_frame_is_tagged_with_op() {
        let frame = ServerFrame::event("delete_button", json!({ "button_id": 7 }));
        let value = serde_json::to_value(&frame).expect("frame should serialize");

        assert_eq!(value["op"], "event");
        assert_eq!(value["event"], "delete_button");
        assert_eq!(value["data"]["button_id"], 7);
    }

    #[test]
    fn client_ping_parses_without_timestamp() {
        let frame: ClientFrame =
            serde_json::from_str(r#"{"op":"ping","id":"abc"}"#).expect("ping should parse");
        let ClientFrame::Ping { id, ts } = frame;

        assert_eq!(id, "abc");
        assert!(ts.is_none());
    }

    #[test]
    fn unknown_client_op_is_rejected() {
        let parsed = serde_json::from_str::<ClientFrame>(r#"{"op":"channel_emit","id":"1"}"#);
        assert!(parsed.is_err());
    }
}
