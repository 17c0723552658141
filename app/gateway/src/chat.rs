//! Conversational request/response route.

use crate::state::AppState;
use agents::DEFAULT_THREAD;
use axum::{Json, extract::State};
use llm::LLM;
use serde::{Deserialize, Serialize};

/// Apology returned when the agent could not produce an answer.
pub const APOLOGY: &str =
    "I'm sorry, I couldn't process that request just now. Please try again.";

/// A user question for the manager agent.
#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    /// The user's utterance.
    pub question: String,
}

/// The agent's free-text answer.
#[derive(Debug, Serialize)]
pub struct ChatAnswer {
    /// The reply shown to the user.
    pub answer: String,
}

/// Run one conversation turn (`POST /chat/query`).
///
/// A `None` agent result degrades to a graceful apology; a raw fault is
/// never surfaced to the client.
pub async fn query_agent<P: LLM + 'static>(
    State(state): State<AppState<P>>,
    Json(query): Json<ChatQuery>,
) -> Json<ChatAnswer> {
    tracing::info!("running user query");
    let answer = match state.manager.run_query(&query.question, DEFAULT_THREAD).await {
        Some(answer) => answer,
        None => {
            tracing::warn!("agent returned no answer, replying with apology");
            APOLOGY.to_string()
        }
    };
    Json(ChatAnswer { answer })
}
