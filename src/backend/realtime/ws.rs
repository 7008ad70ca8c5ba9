//! WebSocket Endpoint
//!
//! `GET /ws` upgrades to a WebSocket. Each socket is split into:
//!
//! - a writer task draining the connection's outbound channel
//! - a reader loop feeding text frames into a `RelaySession`
//!
//! Authentication happens in-band with an `auth` frame, so the upgrade
//! itself is unauthenticated.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};

use super::registry::{ConnectionHandle, Outbound};
use super::relay::RelaySession;
use crate::backend::server::state::AppState;

/// GET /ws
pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sink, mut stream) = socket.split();
    let (handle, mut outbound) = ConnectionHandle::channel();
    let conn_id = handle.conn_id();
    tracing::debug!("[WS] Connection {} opened", conn_id);

    let mut writer = tokio::spawn(async move {
        while let Some(item) = outbound.recv().await {
            match item {
                Outbound::Frame(frame) => {
                    let text = match serde_json::to_string(&frame) {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::error!("[WS] Failed to serialize frame: {}", e);
                            continue;
                        }
                    };
                    if sink.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Outbound::Close => {
                    let _ = sink.send(Message::Close(None)).await;
                    break;
                }
            }
        }
    });

    let mut session = RelaySession::new(state, handle);

    loop {
        tokio::select! {
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Text(text))) => session.handle_text(text.as_str()).await,
                Some(Ok(Message::Close(_))) | None => break,
                Some(Err(e)) => {
                    tracing::debug!("[WS] Connection {} errored: {}", conn_id, e);
                    break;
                }
                Some(Ok(_)) => {}
            },
            // Writer stopped: peer gone or connection superseded
            _ = &mut writer => break,
        }
    }

    session.disconnect().await;
    writer.abort();
    tracing::debug!("[WS] Connection {} closed", conn_id);
}
