pub mod base;
pub mod base_traits;
mod context;
pub mod button_dao;
pub mod error;
pub mod schedule_dao;

pub use base::DaoBase;
pub use base_traits::TimestampedActiveModel;
pub use button_dao::{ButtonDao, ButtonFields};
pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use schedule_dao::ScheduleDao;
