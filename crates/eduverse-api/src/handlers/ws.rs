//! WebSocket upgrade handler.
//!
//! Browsers cannot set an Authorization header on a WebSocket handshake,
//! so the access token is passed as a `token` query parameter and verified
//! before the upgrade completes.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};

use eduverse_realtime::connection::ConnectionHandle;
use eduverse_realtime::message::{InboundMessage, OutboundMessage};

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameter for WebSocket authentication.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// JWT access token.
    pub token: String,
}

/// GET /ws?token={jwt}
pub async fn upgrade(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> Result<Response, ApiError> {
    let claims = state.jwt_decoder.decode_access_token(&query.token)?;
    let ctx = state.auth_service.load_context(claims.user_id()).await?;

    let (handle, receiver) = state
        .hub
        .register(ctx.user_id(), ctx.username().to_string())?;

    Ok(ws.on_upgrade(move |socket| run_connection(state, handle, receiver, socket)))
}

/// Drives an established WebSocket connection until either side closes.
async fn run_connection(
    state: AppState,
    handle: Arc<ConnectionHandle>,
    mut outbound_rx: tokio::sync::mpsc::Receiver<OutboundMessage>,
    socket: WebSocket,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let connection_id = handle.id;

    tracing::info!(
        connection_id = %connection_id,
        username = %handle.username,
        "websocket connection established"
    );

    // Forward queued frames to the socket.
    let outbound_task = tokio::spawn(async move {
        while let Some(frame) = outbound_rx.recv().await {
            let text = match serde_json::to_string(&frame) {
                Ok(text) => text,
                Err(error) => {
                    tracing::error!(%error, "failed to serialize outbound frame");
                    continue;
                }
            };
            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<InboundMessage>(&text) {
                Ok(frame) => state.hub.handle_inbound(connection_id, frame).await,
                Err(_) => {
                    handle.try_send(OutboundMessage::Error {
                        message: "Malformed frame".into(),
                    });
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(error) => {
                tracing::warn!(connection_id = %connection_id, %error, "websocket error");
                break;
            }
        }
    }

    outbound_task.abort();
    state.hub.unregister(connection_id);

    tracing::info!(connection_id = %connection_id, "websocket connection closed");
}
