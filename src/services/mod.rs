pub mod context;
pub mod events;
pub mod schedule_service;

pub use context::ServiceContext;
