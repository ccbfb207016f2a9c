pub mod axum;
mod config;
mod error;
mod hub;
mod session;
mod types;

pub use config::RealtimeConfig;
pub use error::RealtimeError;
pub use hub::RealtimeHandle;
pub use types::{ConnectionId, ConnectionMeta, DisconnectReason};
