//! Broadcast transport for live schedule updates.
//!
//! A single hub task owns every open websocket connection. Anything sent
//! through [`server::RealtimeHandle::broadcast`] is fanned out to all of them.

pub mod protocol;
pub mod server;
