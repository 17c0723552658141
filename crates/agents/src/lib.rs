//! Tally conversational agents.
//!
//! Two-tier delegation over the asset ledger:
//!
//! - [`AssetManager`]: the conversation front. Decides whether a user
//!   utterance needs data access and, when it does, delegates through a
//!   single tool to the database agent.
//! - [`DbManager`]: the database delegate. Picks among the typed query
//!   tools, executes them against the store, and hands back a
//!   synthesized textual answer.
//! - [`trim_history`]: the pre-inference hook bounding each thread's
//!   message window.

pub use db::DbManager;
pub use manager::{AssetManager, DEFAULT_THREAD};
pub use tools::query_tools;
pub use trim::trim_history;

use compact_str::CompactString;
use llm::{Message, ToolCall};
use std::{collections::BTreeMap, future::Future, pin::Pin, sync::Arc};

mod db;
mod manager;
mod tools;
mod trim;

/// Ceiling on tool-call rounds within a single reasoning episode.
pub const MAX_TOOL_CALLS: usize = 16;

/// A type-erased async tool handler.
pub type Handler =
    Arc<dyn Fn(String) -> Pin<Box<dyn Future<Output = String> + Send>> + Send + Sync>;

/// Dispatch tool calls and collect results as tool messages.
pub(crate) async fn dispatch(
    handlers: &BTreeMap<CompactString, Handler>,
    calls: &[ToolCall],
) -> Vec<Message> {
    let mut results = Vec::with_capacity(calls.len());
    for call in calls {
        let output = if let Some(handler) = handlers.get(call.function.name.as_str()) {
            handler(call.function.arguments.clone()).await
        } else {
            tracing::warn!(tool = %call.function.name, "model requested an unregistered tool");
            format!("function {} not available", call.function.name)
        };
        results.push(Message::tool(output, call.id.clone()));
    }
    results
}
