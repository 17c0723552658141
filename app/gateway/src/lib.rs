//! Tally gateway: application shell composing the asset store, the
//! conversational agents, and the axum HTTP/WebSocket surface.

pub mod assets;
pub mod chat;
pub mod config;
pub mod error;
pub mod state;
pub mod ws;

pub use config::GatewayConfig;
pub use error::ApiError;
pub use state::AppState;

use axum::{
    Json, Router,
    routing::{get, post},
};
use llm::LLM;

/// Build the axum router over the shared application state.
pub fn router<P: LLM + 'static>(state: AppState<P>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/assets",
            post(assets::create_asset::<P>).get(assets::list_assets::<P>),
        )
        .route(
            "/assets/{id}",
            get(assets::get_asset::<P>)
                .put(assets::update_asset::<P>)
                .delete(assets::delete_asset::<P>),
        )
        .route("/chat/query", post(chat::query_agent::<P>))
        .route("/ws/chat", get(ws::ws_handler::<P>))
        .with_state(state)
}

/// Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
