use sea_orm::{ActiveValue::Set, entity::prelude::*};

use crate::db::dao::TimestampedActiveModel;

pub const OCCUPIED_COLOR: &str = "pink";
pub const FREE_COLOR: &str = "lightgreen";

/// A slot on a schedule. The display color is derived from `who` and is
/// never stored.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "buttons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub schedule_id: i32,
    pub when: Option<String>,
    #[sea_orm(column_name = "where")]
    pub place: Option<String>,
    pub who: Option<String>,
    #[sea_orm(default_expr = "Expr::current_timestamp()")]
    pub created_at: DateTimeWithTimeZone,
    #[sea_orm(default_expr = "Expr::current_timestamp()")]
    pub updated_at: DateTimeWithTimeZone,
    #[sea_orm(belongs_to, from = "schedule_id", to = "id", on_delete = "Cascade")]
    pub schedule: HasOne<super::schedule::Entity>,
}

impl Model {
    pub fn color(&self) -> &'static str {
        color_for(self.who.as_deref())
    }
}

pub fn color_for(who: Option<&str>) -> &'static str {
    match who {
        Some(who) if !who.is_empty() => OCCUPIED_COLOR,
        _ => FREE_COLOR,
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TimestampedActiveModel for ActiveModel {
    fn set_created_at(&mut self, ts: DateTimeWithTimeZone) {
        self.created_at = Set(ts);
    }

    fn set_updated_at(&mut self, ts: DateTimeWithTimeZone) {
        self.updated_at = Set(ts);
    }
}
