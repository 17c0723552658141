//! WebSocket chat: axum upgrade handler and message loop.
//!
//! Each inbound text frame runs one agent turn and answers with
//! `{"answer": text, "sources": []}`. The connection gets its own
//! thread id, so concurrent clients never interleave one session.

use crate::{chat::APOLOGY, state::AppState};
use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message as WsMessage, WebSocket},
    },
    response::IntoResponse,
};
use llm::LLM;
use serde::Serialize;
use ulid::Ulid;

/// A per-message reply on the socket.
#[derive(Debug, Serialize)]
struct SocketAnswer {
    /// The agent's reply.
    answer: String,
    /// Source references (reserved, currently always empty).
    sources: Vec<String>,
}

/// WebSocket upgrade handler for `GET /ws/chat`.
pub async fn ws_handler<P: LLM + 'static>(
    State(state): State<AppState<P>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection.
async fn handle_socket<P: LLM + 'static>(mut socket: WebSocket, state: AppState<P>) {
    let thread = Ulid::new().to_string();
    tracing::info!(%thread, "socket client connected");

    while let Some(received) = socket.recv().await {
        let ws_msg = match received {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!(%thread, "socket receive failed: {e}");
                emit_error(&mut socket, &e.to_string()).await;
                break;
            }
        };

        let text = match ws_msg {
            WsMessage::Text(text) => text,
            WsMessage::Close(_) => {
                tracing::info!(%thread, "socket client disconnected");
                break;
            }
            _ => continue,
        };

        let answer = match state.manager.run_query(text.as_str(), &thread).await {
            Some(answer) => answer,
            None => APOLOGY.to_string(),
        };

        let payload = SocketAnswer {
            answer,
            sources: Vec::new(),
        };
        let json = match serde_json::to_string(&payload) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(%thread, "failed to serialize socket reply: {e}");
                emit_error(&mut socket, "internal serialization failure").await;
                break;
            }
        };

        tracing::info!(%thread, "replying to the client through the socket");
        if socket.send(WsMessage::Text(json.into())).await.is_err() {
            break;
        }
    }
}

/// Best-effort error payload before closing the channel.
async fn emit_error(socket: &mut WebSocket, detail: &str) {
    let payload = SocketAnswer {
        answer: format!("Error: {detail}"),
        sources: Vec::new(),
    };
    if let Ok(json) = serde_json::to_string(&payload) {
        let _ = socket.send(WsMessage::Text(json.into())).await;
    }
    let _ = socket.send(WsMessage::Close(None)).await;
}
