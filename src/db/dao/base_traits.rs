use sea_orm::entity::prelude::DateTimeWithTimeZone;

/// Active models whose timestamps the DAO layer maintains.
pub trait TimestampedActiveModel {
    fn set_created_at(&mut self, ts: DateTimeWithTimeZone);
    fn set_updated_at(&mut self, ts: DateTimeWithTimeZone);
}
