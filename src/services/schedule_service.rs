use std::sync::Arc;

use crate::{
    db::dao::{ButtonDao, ButtonFields, DaoLayerError, ScheduleDao},
    db::entities::{button, schedule},
    error::AppError,
    services::events::{ButtonPayload, EventPublisher, ScheduleEvent},
};

pub const PASSWORD_REQUIRED_MESSAGE: &str = "Password is required.";
pub const UNKNOWN_PASSWORD_MESSAGE: &str = "No schedule uses this password yet.";

/// Outcome of an edit-button submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonEdit {
    Updated(button::Model),
    /// `when` was empty; nothing was written.
    Skipped { schedule_id: i32 },
}

impl ButtonEdit {
    pub fn schedule_id(&self) -> i32 {
        match self {
            Self::Updated(button) => button.schedule_id,
            Self::Skipped { schedule_id } => *schedule_id,
        }
    }
}

#[derive(Clone)]
pub struct ScheduleService {
    schedule_dao: ScheduleDao,
    button_dao: ButtonDao,
    publisher: Arc<dyn EventPublisher>,
}

impl ScheduleService {
    pub fn new(
        schedule_dao: ScheduleDao,
        button_dao: ButtonDao,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            schedule_dao,
            button_dao,
            publisher,
        }
    }

    pub async fn create_schedule(&self, password: &str) -> Result<schedule::Model, AppError> {
        require_password(password)?;
        let created = self.schedule_dao.create_schedule(password).await?;
        tracing::info!(schedule_id = created.id, "schedule created");
        Ok(created)
    }

    pub async fn find_by_password(&self, password: &str) -> Result<schedule::Model, AppError> {
        self.schedule_dao
            .find_by_password(password)
            .await?
            .ok_or_else(|| AppError::not_found(UNKNOWN_PASSWORD_MESSAGE))
    }

    pub async fn require_schedule(&self, schedule_id: i32) -> Result<schedule::Model, AppError> {
        self.schedule_dao
            .find_schedule(schedule_id)
            .await?
            .ok_or_else(|| AppError::not_found("Schedule not found"))
    }

    pub async fn require_button(&self, button_id: i32) -> Result<button::Model, AppError> {
        self.button_dao
            .find_button(button_id)
            .await?
            .ok_or_else(|| AppError::not_found("Button not found"))
    }

    pub async fn list_buttons(&self, schedule_id: i32) -> Result<Vec<button::Model>, AppError> {
        Ok(self.button_dao.list_by_schedule(schedule_id).await?)
    }

    /// Load a schedule together with its buttons for rendering.
    pub async fn schedule_with_buttons(
        &self,
        schedule_id: i32,
    ) -> Result<(schedule::Model, Vec<button::Model>), AppError> {
        let schedule = self.require_schedule(schedule_id).await?;
        let buttons = self.list_buttons(schedule.id).await?;
        Ok((schedule, buttons))
    }

    /// Add a button to a schedule. Submissions with neither `when` nor
    /// `where` are dropped and yield `Ok(None)`.
    pub async fn add_button(
        &self,
        schedule_id: i32,
        fields: ButtonFields,
    ) -> Result<Option<button::Model>, AppError> {
        let schedule = self.require_schedule(schedule_id).await?;
        if !fields.has_when_or_place() {
            tracing::debug!(schedule_id, "empty button submission dropped");
            return Ok(None);
        }

        let created = self.button_dao.create_button(schedule.id, fields).await?;
        tracing::info!(
            schedule_id,
            button_id = created.id,
            color = created.color(),
            "button created"
        );
        self.publisher
            .publish(ScheduleEvent::NewButton(ButtonPayload::from(&created)))
            .await;
        Ok(Some(created))
    }

    /// Overwrite a button's fields. An empty `when` leaves the row untouched.
    pub async fn edit_button(
        &self,
        button_id: i32,
        fields: ButtonFields,
    ) -> Result<ButtonEdit, AppError> {
        let existing = self.require_button(button_id).await?;
        if !fields.has_when() {
            tracing::debug!(button_id, "button edit without `when` ignored");
            return Ok(ButtonEdit::Skipped {
                schedule_id: existing.schedule_id,
            });
        }

        let updated = self.button_dao.update_button(button_id, fields).await?;
        tracing::info!(
            schedule_id = updated.schedule_id,
            button_id,
            color = updated.color(),
            "button updated"
        );
        self.publisher
            .publish(ScheduleEvent::NewButton(ButtonPayload::from(&updated)))
            .await;
        Ok(ButtonEdit::Updated(updated))
    }

    pub async fn save_password(
        &self,
        schedule_id: i32,
        password: &str,
    ) -> Result<schedule::Model, AppError> {
        require_password(password)?;
        let updated = self
            .schedule_dao
            .set_password(schedule_id, password)
            .await
            .map_err(|err| match err {
                DaoLayerError::NotFound { .. } => AppError::not_found("Schedule not found"),
                other => AppError::from(other),
            })?;
        tracing::info!(schedule_id, "schedule password changed");
        Ok(updated)
    }

    /// Delete a button. Returns the owning schedule id, or `None` when the
    /// button did not exist (nothing is published then).
    pub async fn delete_button(&self, button_id: i32) -> Result<Option<i32>, AppError> {
        let Some(existing) = self.button_dao.find_button(button_id).await? else {
            return Ok(None);
        };
        if !self.button_dao.delete_button(button_id).await? {
            return Ok(None);
        }

        tracing::info!(
            schedule_id = existing.schedule_id,
            button_id,
            "button deleted"
        );
        self.publisher
            .publish(ScheduleEvent::DeleteButton {
                button_id,
                schedule_id: existing.schedule_id,
            })
            .await;
        Ok(Some(existing.schedule_id))
    }

    /// Delete a schedule with all its buttons. Returns the removed button
    /// ids, or `None` when the schedule did not exist.
    pub async fn delete_schedule(&self, schedule_id: i32) -> Result<Option<Vec<i32>>, AppError> {
        let Some(button_ids) = self.schedule_dao.delete_with_buttons(schedule_id).await? else {
            return Ok(None);
        };

        tracing::info!(
            schedule_id,
            buttons = button_ids.len(),
            "schedule deleted"
        );
        self.publisher
            .publish(ScheduleEvent::DeleteSchedule {
                schedule_id,
                button_ids: button_ids.clone(),
            })
            .await;
        Ok(Some(button_ids))
    }
}

fn require_password(password: &str) -> Result<(), AppError> {
    if password.trim().is_empty() {
        return Err(AppError::bad_request(PASSWORD_REQUIRED_MESSAGE));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::entities::button::{FREE_COLOR, OCCUPIED_COLOR},
        error::DUPLICATE_PASSWORD_MESSAGE,
        test_helpers::{RecordingPublisher, memory_db},
    };

    async fn service() -> (ScheduleService, RecordingPublisher) {
        let db = memory_db().await;
        let publisher = RecordingPublisher::default();
        let services =
            crate::services::ServiceContext::new(&db, Arc::new(publisher.clone()));
        (services.schedule(), publisher)
    }

    fn fields(when: &str, place: &str, who: &str) -> ButtonFields {
        ButtonFields::new(
            Some(when.to_string()),
            Some(place.to_string()),
            Some(who.to_string()),
        )
    }

    #[tokio::test]
    async fn new_schedule_starts_without_buttons() {
        let (service, _) = service().await;

        let created = service
            .create_schedule("abc123")
            .await
            .expect("create should succeed");
        let (_, buttons) = service
            .schedule_with_buttons(created.id)
            .await
            .expect("schedule should load");

        assert!(buttons.is_empty());
    }

    #[tokio::test]
    async fn duplicate_password_is_rejected() {
        let (service, _) = service().await;
        service
            .create_schedule("shared")
            .await
            .expect("first create should succeed");

        let err = service
            .create_schedule("shared")
            .await
            .expect_err("second create should fail");

        assert_eq!(err, AppError::conflict(DUPLICATE_PASSWORD_MESSAGE));
    }

    #[tokio::test]
    async fn blank_password_is_rejected() {
        let (service, _) = service().await;
        let err = service
            .create_schedule("   ")
            .await
            .expect_err("blank password should fail");

        assert_eq!(err, AppError::bad_request(PASSWORD_REQUIRED_MESSAGE));
    }

    #[tokio::test]
    async fn color_follows_who_across_updates() {
        let (service, _) = service().await;
        let schedule = service.create_schedule("colors").await.expect("create");

        let created = service
            .add_button(schedule.id, fields("Tue", "Hall", "Alice"))
            .await
            .expect("add should succeed")
            .expect("button should be created");
        assert_eq!(created.color(), OCCUPIED_COLOR);

        let edit = service
            .edit_button(created.id, fields("Tue", "Hall", ""))
            .await
            .expect("edit should succeed");
        let ButtonEdit::Updated(updated) = edit else {
            panic!("edit should update the button");
        };

        assert_eq!(updated.id, created.id);
        assert!(updated.who.is_none());
        assert_eq!(updated.color(), FREE_COLOR);
    }

    #[tokio::test]
    async fn submission_without_when_or_where_is_dropped() {
        let (service, publisher) = service().await;
        let schedule = service.create_schedule("quiet").await.expect("create");

        let created = service
            .add_button(schedule.id, fields("", "", "Carol"))
            .await
            .expect("add should not fail");

        assert!(created.is_none());
        assert!(service.list_buttons(schedule.id).await.expect("list").is_empty());
        assert!(publisher.events().is_empty());
    }

    #[tokio::test]
    async fn edit_without_when_is_a_no_op() {
        let (service, publisher) = service().await;
        let schedule = service.create_schedule("noop").await.expect("create");
        let created = service
            .add_button(schedule.id, fields("Wed", "Lab", ""))
            .await
            .expect("add")
            .expect("created");
        publisher.clear();

        let edit = service
            .edit_button(created.id, fields("", "Elsewhere", "Dan"))
            .await
            .expect("edit should not fail");

        assert_eq!(
            edit,
            ButtonEdit::Skipped {
                schedule_id: schedule.id
            }
        );
        let unchanged = service.require_button(created.id).await.expect("button");
        assert_eq!(unchanged.place.as_deref(), Some("Lab"));
        assert!(publisher.events().is_empty());
    }

    #[tokio::test]
    async fn editing_a_missing_button_is_not_found() {
        let (service, _) = service().await;
        let err = service
            .edit_button(404, fields("Thu", "", ""))
            .await
            .expect_err("missing button should fail");

        assert_eq!(err, AppError::not_found("Button not found"));
    }

    #[tokio::test]
    async fn deleting_a_missing_button_publishes_nothing() {
        let (service, publisher) = service().await;

        let deleted = service
            .delete_button(12345)
            .await
            .expect("delete should not fail");

        assert!(deleted.is_none());
        assert!(publisher.events().is_empty());
    }

    #[tokio::test]
    async fn delete_schedule_removes_buttons_and_announces_once() {
        let (service, publisher) = service().await;
        let schedule = service.create_schedule("gone").await.expect("create");
        let other = service.create_schedule("kept").await.expect("create other");
        let first = service
            .add_button(schedule.id, fields("Mon", "A", ""))
            .await
            .expect("add")
            .expect("created");
        let second = service
            .add_button(schedule.id, fields("Tue", "B", "Eve"))
            .await
            .expect("add")
            .expect("created");
        let survivor = service
            .add_button(other.id, fields("Fri", "C", ""))
            .await
            .expect("add")
            .expect("created");
        publisher.clear();

        let removed = service
            .delete_schedule(schedule.id)
            .await
            .expect("delete should succeed");

        assert_eq!(removed, Some(vec![first.id, second.id]));
        assert!(service.list_buttons(schedule.id).await.expect("list").is_empty());
        assert_eq!(
            service.list_buttons(other.id).await.expect("list other"),
            vec![survivor]
        );
        assert_eq!(
            publisher.events(),
            vec![ScheduleEvent::DeleteSchedule {
                schedule_id: schedule.id,
                button_ids: vec![first.id, second.id],
            }]
        );
    }

    #[tokio::test]
    async fn save_password_rejects_password_of_another_schedule() {
        let (service, _) = service().await;
        let first = service.create_schedule("one").await.expect("create");
        service.create_schedule("two").await.expect("create");

        let err = service
            .save_password(first.id, "two")
            .await
            .expect_err("collision should fail");
        assert_eq!(err, AppError::conflict(DUPLICATE_PASSWORD_MESSAGE));

        let renamed = service
            .save_password(first.id, "three")
            .await
            .expect("rename should succeed");
        assert_eq!(renamed.password, "three");
        assert_eq!(
            service.find_by_password("three").await.expect("lookup").id,
            first.id
        );
    }

    #[tokio::test]
    async fn save_password_on_missing_schedule_is_not_found() {
        let (service, _) = service().await;
        let err = service
            .save_password(99, "whatever")
            .await
            .expect_err("missing schedule should fail");

        assert_eq!(err, AppError::not_found("Schedule not found"));
    }

    #[tokio::test]
    async fn full_lifecycle_publishes_expected_events() {
        let (service, publisher) = service().await;

        let schedule = service.create_schedule("abc123").await.expect("create");
        assert_eq!(schedule.id, 1);

        let created = service
            .add_button(schedule.id, fields("Mon 9am", "Room A", ""))
            .await
            .expect("add")
            .expect("created");
        assert_eq!(created.id, 1);
        assert_eq!(created.color(), FREE_COLOR);

        let ButtonEdit::Updated(updated) = service
            .edit_button(created.id, fields("Mon 9am", "Room A", "Bob"))
            .await
            .expect("edit")
        else {
            panic!("edit should update the button");
        };
        assert_eq!(updated.id, 1);
        assert_eq!(updated.color(), OCCUPIED_COLOR);

        service
            .delete_schedule(schedule.id)
            .await
            .expect("delete")
            .expect("schedule existed");

        let names: Vec<&str> = publisher.events().iter().map(ScheduleEvent::name).collect();
        assert_eq!(names, ["new_button", "new_button", "delete_schedule"]);
        assert_eq!(
            publisher.events().last().map(ScheduleEvent::payload),
            Some(serde_json::json!({ "schedule_id": 1, "button_ids": [1] }))
        );

        let err = service
            .find_by_password("abc123")
            .await
            .expect_err("deleted schedule should be gone");
        assert_eq!(err, AppError::not_found(UNKNOWN_PASSWORD_MESSAGE));
    }
}
