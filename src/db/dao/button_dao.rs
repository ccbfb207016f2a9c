use sea_orm::{ColumnTrait, DatabaseConnection, QueryFilter, QueryOrder, Set};

use super::{DaoBase, DaoResult};
use crate::db::entities::button;
use crate::db::entities::prelude::Button;

/// Free-text fields of a button. Empty strings are normalized to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonFields {
    pub when: Option<String>,
    pub place: Option<String>,
    pub who: Option<String>,
}

impl ButtonFields {
    pub fn new(when: Option<String>, place: Option<String>, who: Option<String>) -> Self {
        Self {
            when: non_empty(when),
            place: non_empty(place),
            who: non_empty(who),
        }
    }

    pub fn has_when(&self) -> bool {
        self.when.is_some()
    }

    pub fn has_when_or_place(&self) -> bool {
        self.when.is_some() || self.place.is_some()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

#[derive(Clone)]
pub struct ButtonDao {
    db: DatabaseConnection,
}

impl DaoBase for ButtonDao {
    type Entity = Button;
    const ENTITY_NAME: &'static str = "button";

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl ButtonDao {
    pub async fn create_button(
        &self,
        schedule_id: i32,
        fields: ButtonFields,
    ) -> DaoResult<button::Model> {
        let model = button::ActiveModel {
            schedule_id: Set(schedule_id),
            when: Set(fields.when),
            place: Set(fields.place),
            who: Set(fields.who),
            ..Default::default()
        };
        self.create(model).await
    }

    pub async fn update_button(
        &self,
        button_id: i32,
        fields: ButtonFields,
    ) -> DaoResult<button::Model> {
        self.update(button_id, move |active| {
            active.when = Set(fields.when);
            active.place = Set(fields.place);
            active.who = Set(fields.who);
        })
        .await
    }

    pub async fn find_button(&self, button_id: i32) -> DaoResult<Option<button::Model>> {
        self.find_by_id(button_id).await
    }

    pub async fn list_by_schedule(&self, schedule_id: i32) -> DaoResult<Vec<button::Model>> {
        self.find_all(|query| {
            query
                .filter(button::Column::ScheduleId.eq(schedule_id))
                .order_by_asc(button::Column::Id)
        })
        .await
    }

    /// Absent ids are not an error; the result says whether a row went away.
    pub async fn delete_button(&self, button_id: i32) -> DaoResult<bool> {
        self.delete(button_id).await
    }
}
