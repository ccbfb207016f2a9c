use async_trait::async_trait;

use crate::services::events::{EventPublisher, ScheduleEvent};

pub use realtime::server::{RealtimeConfig, RealtimeHandle};

#[async_trait]
impl EventPublisher for RealtimeHandle {
    async fn publish(&self, event: ScheduleEvent) {
        let name = event.name();
        if let Err(err) = self.broadcast(name, event.payload()).await {
            tracing::warn!(
                event = name,
                schedule_id = event.schedule_id(),
                error = err.message(),
                "schedule event was not broadcast"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::events::ScheduleEvent;

    #[tokio::test]
    async fn publishing_through_a_disabled_hub_is_silent() {
        let handle = RealtimeHandle::disabled(RealtimeConfig::default());

        handle
            .publish(ScheduleEvent::DeleteButton {
                button_id: 3,
                schedule_id: 1,
            })
            .await;

        assert_eq!(handle.connection_count().await, 0);
    }

    #[tokio::test]
    async fn publishing_without_viewers_succeeds() {
        let handle = RealtimeHandle::spawn(RealtimeConfig::default());

        handle
            .publish(ScheduleEvent::DeleteSchedule {
                schedule_id: 1,
                button_ids: vec![1, 2],
            })
            .await;

        assert_eq!(handle.connection_count().await, 0);
    }
}
