use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

use crate::protocol::ServerFrame;

use super::{ConnectionId, ConnectionMeta, DisconnectReason, RealtimeConfig, RealtimeError, session};

const HUB_QUEUE_SIZE: usize = 4096;
const MAX_EVENT_NAME_LEN: usize = 64;

/// Cheap, cloneable entry point to the hub task.
///
/// A disabled handle (no hub task) accepts broadcasts and drops them, so
/// callers never need to branch on whether realtime is switched on.
#[derive(Clone)]
pub struct RealtimeHandle {
    config: RealtimeConfig,
    tx: Option<mpsc::Sender<HubCommand>>,
}

impl RealtimeHandle {
    pub fn spawn(config: RealtimeConfig) -> Self {
        if !config.enabled {
            return Self::disabled(config);
        }

        let (tx, rx) = mpsc::channel(HUB_QUEUE_SIZE);
        let mut hub = RealtimeHub::new(config.clone(), rx);
        tokio::spawn(async move {
            hub.run().await;
        });

        Self {
            config,
            tx: Some(tx),
        }
    }

    pub fn disabled(config: RealtimeConfig) -> Self {
        Self { config, tx: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled && self.tx.is_some()
    }

    pub fn max_message_bytes(&self) -> usize {
        self.config.max_message_bytes
    }

    pub async fn serve_socket(&self, socket: axum::extract::ws::WebSocket) {
        let Some(hub_tx) = self.tx.clone() else {
            return;
        };
        session::run_socket_session(socket, hub_tx, self.config.clone()).await;
    }

    /// Queue `event` for every live connection. Delivery is best effort.
    pub async fn broadcast(
        &self,
        event: impl Into<String>,
        payload: Value,
    ) -> Result<(), RealtimeError> {
        let Some(tx) = &self.tx else {
            return Ok(());
        };
        let event = event.into();
        validate_event_name(&event)?;
        tx.send(HubCommand::Broadcast { event, payload })
            .await
            .map_err(|_| RealtimeError::unavailable("realtime hub is unavailable"))
    }

    pub async fn connection_count(&self) -> usize {
        let Some(tx) = &self.tx else {
            return 0;
        };
        let (reply, rx) = oneshot::channel();
        if tx.send(HubCommand::ConnectionCount { reply }).await.is_err() {
            return 0;
        }
        rx.await.unwrap_or(0)
    }
}

fn validate_event_name(event: &str) -> Result<(), RealtimeError> {
    if event.trim().is_empty() {
        return Err(RealtimeError::bad_request("Event name is required"));
    }
    if event.len() > MAX_EVENT_NAME_LEN {
        return Err(RealtimeError::bad_request("Event name is too long"));
    }
    Ok(())
}

pub(crate) enum HubCommand {
    Register {
        meta: ConnectionMeta,
        outbound_tx: mpsc::Sender<ServerFrame>,
    },
    Unregister {
        conn_id: ConnectionId,
        reason: DisconnectReason,
    },
    Broadcast {
        event: String,
        payload: Value,
    },
    ConnectionCount {
        reply: oneshot::Sender<usize>,
    },
}

struct RealtimeHub {
    config: RealtimeConfig,
    rx: mpsc::Receiver<HubCommand>,
    connections: HashMap<ConnectionId, ConnectionState>,
}

struct ConnectionState {
    meta: ConnectionMeta,
    outbound_tx: mpsc::Sender<ServerFrame>,
}

impl RealtimeHub {
    fn new(config: RealtimeConfig, rx: mpsc::Receiver<HubCommand>) -> Self {
        Self {
            config,
            rx,
            connections: HashMap::new(),
        }
    }

    async fn run(&mut self) {
        while let Some(command) = self.rx.recv().await {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: HubCommand) {
        match command {
            HubCommand::Register { meta, outbound_tx } => self.register(meta, outbound_tx),
            HubCommand::Unregister { conn_id, reason } => self.unregister(conn_id, reason),
            HubCommand::Broadcast { event, payload } => self.handle_broadcast(event, payload),
            HubCommand::ConnectionCount { reply } => {
                let _ = reply.send(self.connections.len());
            }
        }
    }

    fn register(&mut self, meta: ConnectionMeta, outbound_tx: mpsc::Sender<ServerFrame>) {
        if self.connections.len() >= self.config.max_connections {
            tracing::warn!(
                conn_id = %meta.id,
                max_connections = self.config.max_connections,
                "realtime connection refused: at capacity"
            );
            let _ = outbound_tx.try_send(ServerFrame::error(
                "capacity_exceeded",
                "Realtime server is at capacity",
            ));
            return;
        }

        let conn_id = meta.id;
        let _ = outbound_tx.try_send(ServerFrame::connected(conn_id.to_string()));
        self.connections
            .insert(conn_id, ConnectionState { meta, outbound_tx });

        tracing::debug!(
            conn_id = %conn_id,
            connections = self.connections.len(),
            "realtime connection registered"
        );
    }

    fn unregister(&mut self, conn_id: ConnectionId, reason: DisconnectReason) {
        let Some(existing) = self.connections.remove(&conn_id) else {
            return;
        };

        tracing::debug!(
            conn_id = %conn_id,
            connected_at = existing.meta.connected_at_unix,
            reason = ?reason,
            "realtime connection disconnected"
        );
    }

    fn handle_broadcast(&mut self, event: String, payload: Value) {
        let frame = ServerFrame::event(event.clone(), payload);
        let mut dropped = Vec::new();

        for (conn_id, conn) in &self.connections {
            match conn.outbound_tx.try_send(frame.clone()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    dropped.push((*conn_id, DisconnectReason::SlowConsumer));
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    dropped.push((*conn_id, DisconnectReason::ClientClosed));
                }
            }
        }

        tracing::debug!(
            event = %event,
            recipients = self.connections.len() - dropped.len(),
            "realtime broadcast"
        );

        for (conn_id, reason) in dropped {
            self.unregister(conn_id, reason);
        }
    }
}
