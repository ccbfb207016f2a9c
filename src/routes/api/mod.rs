mod router;
pub mod schedules;

pub use router::router;
