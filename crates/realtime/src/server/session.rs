use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use chrono::Utc;
use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior, interval};

use crate::protocol::{ClientFrame, ServerFrame};

use super::{
    RealtimeConfig,
    hub::HubCommand,
    types::{ConnectionId, ConnectionMeta, DisconnectReason},
};

type WsSender = SplitSink<WebSocket, Message>;

pub async fn run_socket_session(
    socket: WebSocket,
    hub_tx: mpsc::Sender<HubCommand>,
    cfg: RealtimeConfig,
) {
    let conn_id = ConnectionId::new();
    let (outbound_tx, mut outbound_rx) = mpsc::channel(cfg.outbound_queue_size);

    let meta = ConnectionMeta {
        id: conn_id,
        connected_at_unix: Utc::now().timestamp(),
    };

    if hub_tx
        .send(HubCommand::Register { meta, outbound_tx })
        .await
        .is_err()
    {
        return;
    }

    let (mut ws_sender, mut ws_receiver) = socket.split();
    let mut heartbeat = interval(Duration::from_secs(cfg.heartbeat_interval_secs));
    heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let idle_timeout = Duration::from_secs(cfg.idle_timeout_secs);
    let mut last_activity = Instant::now();

    let disconnect_reason = loop {
        tokio::select! {
            outbound = outbound_rx.recv() => {
                // the hub dropped our sender: refused at capacity or pruned
                let Some(frame) = outbound else {
                    break DisconnectReason::HubUnavailable;
                };

                if send_frame(&mut ws_sender, &frame).await.is_err() {
                    break DisconnectReason::SocketError;
                }
            }
            incoming = ws_receiver.next() => {
                let Some(incoming) = incoming else {
                    break DisconnectReason::ClientClosed;
                };

                match incoming {
                    Ok(Message::Text(text)) => {
                        last_activity = Instant::now();
                        if text.len() > cfg.max_message_bytes {
                            let _ = send_frame(
                                &mut ws_sender,
                                &ServerFrame::error(
                                    "message_too_large",
                                    "Message exceeds realtime.max_message_bytes",
                                ),
                            )
                            .await;
                            continue;
                        }

                        let reply = match serde_json::from_str::<ClientFrame>(&text) {
                            Ok(ClientFrame::Ping { id, .. }) => ServerFrame::pong(id),
                            Err(_) => ServerFrame::error("invalid_payload", "Invalid websocket payload"),
                        };
                        if send_frame(&mut ws_sender, &reply).await.is_err() {
                            break DisconnectReason::SocketError;
                        }
                    }
                    Ok(Message::Binary(_)) => {
                        let _ = send_frame(
                            &mut ws_sender,
                            &ServerFrame::error(
                                "invalid_payload",
                                "Binary websocket payloads are not supported",
                            ),
                        )
                        .await;
                    }
                    Ok(Message::Ping(payload)) => {
                        last_activity = Instant::now();
                        if ws_sender.send(Message::Pong(payload)).await.is_err() {
                            break DisconnectReason::SocketError;
                        }
                    }
                    Ok(Message::Pong(_)) => {
                        last_activity = Instant::now();
                    }
                    Ok(Message::Close(_)) => {
                        break DisconnectReason::ClientClosed;
                    }
                    Err(_) => {
                        break DisconnectReason::SocketError;
                    }
                }
            }
            _ = heartbeat.tick() => {
                if last_activity.elapsed() > idle_timeout {
                    break DisconnectReason::IdleTimeout;
                }

                if ws_sender
                    .send(Message::Ping(Vec::new().into()))
                    .await
                    .is_err()
                {
                    break DisconnectReason::SocketError;
                }
            }
        }
    };

    let _ = hub_tx
        .send(HubCommand::Unregister {
            conn_id,
            reason: disconnect_reason,
        })
        .await;
}

async fn send_frame(ws_sender: &mut WsSender, frame: &ServerFrame) -> Result<(), ()> {
    let payload = serde_json::to_string(frame).map_err(|_| ())?;
    ws_sender
        .send(Message::Text(payload.into()))
        .await
        .map_err(|_| ())
}
