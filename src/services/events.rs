use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Value, json};

use crate::db::entities::button;

/// Everything a viewer needs to draw or redraw one button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonPayload {
    pub id: i32,
    pub schedule_id: i32,
    pub when: Option<String>,
    #[serde(rename = "where")]
    pub place: Option<String>,
    pub who: Option<String>,
    pub color: &'static str,
}

impl From<&button::Model> for ButtonPayload {
    fn from(model: &button::Model) -> Self {
        Self {
            id: model.id,
            schedule_id: model.schedule_id,
            when: model.when.clone(),
            place: model.place.clone(),
            who: model.who.clone(),
            color: model.color(),
        }
    }
}

/// Mutation notifications pushed to every connected viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleEvent {
    /// Sent for created and updated buttons alike.
    NewButton(ButtonPayload),
    DeleteButton { button_id: i32, schedule_id: i32 },
    DeleteSchedule { schedule_id: i32, button_ids: Vec<i32> },
}

impl ScheduleEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NewButton(_) => "new_button",
            Self::DeleteButton { .. } => "delete_button",
            Self::DeleteSchedule { .. } => "delete_schedule",
        }
    }

    pub fn schedule_id(&self) -> i32 {
        match self {
            Self::NewButton(button) => button.schedule_id,
            Self::DeleteButton { schedule_id, .. } | Self::DeleteSchedule { schedule_id, .. } => {
                *schedule_id
            }
        }
    }

    pub fn payload(&self) -> Value {
        match self {
            Self::NewButton(button) => json!({ "button": button }),
            Self::DeleteButton {
                button_id,
                schedule_id,
            } => json!({ "button_id": button_id, "schedule_id": schedule_id }),
            Self::DeleteSchedule {
                schedule_id,
                button_ids,
            } => json!({ "schedule_id": schedule_id, "button_ids": button_ids }),
        }
    }
}

/// Sink for schedule events. Publishing never fails the caller; delivery is
/// best effort and unscoped.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: ScheduleEvent);
}
