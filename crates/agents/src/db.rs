//! The database agent: the subordinate delegate for data questions.

use crate::{Handler, MAX_TOOL_CALLS, dispatch, tools::query_tools};
use compact_str::CompactString;
use llm::{General, LLM, Message, Request, Tool, ToolChoice};
use std::{collections::BTreeMap, sync::Arc};
use store::AssetStore;

const DB_PROMPT: &str = include_str!("../prompts/db.md");

/// The database delegate.
///
/// Stateless across calls: each [`run_query`](Self::run_query) is a
/// fresh reasoning episode over the fixed query tool set. The system
/// prompt steers the model to pick exactly one tool per data point and
/// to summarize tool output without fabricating data.
pub struct DbManager<P: LLM> {
    provider: P,
    config: General,
    tools: Vec<Tool>,
    handlers: BTreeMap<CompactString, Handler>,
}

impl<P: LLM> DbManager<P> {
    /// Create a database agent over the given store.
    pub fn new(provider: P, config: General, store: Arc<AssetStore>) -> Self {
        let mut tools = Vec::new();
        let mut handlers = BTreeMap::new();
        for (tool, handler) in query_tools(store) {
            handlers.insert(tool.name.clone(), handler);
            tools.push(tool);
        }
        Self {
            provider,
            config,
            tools,
            handlers,
        }
    }

    /// Answer a natural-language data question.
    ///
    /// Returns `None` when the model round-trip fails or the reasoning
    /// loop cannot converge; the caller treats that as "could not
    /// answer" and degrades gracefully.
    pub async fn run_query(&self, question: &str) -> Option<String> {
        let mut messages = vec![Message::system(DB_PROMPT), Message::user(question)];
        let mut tool_choice = ToolChoice::Auto;

        for _ in 0..MAX_TOOL_CALLS {
            let request = Request::from(self.config.clone())
                .with_messages(messages.clone())
                .with_tools(&self.tools)
                .with_tool_choice(tool_choice.clone());

            let response = match self.provider.send(&request).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!("database agent model call failed: {e}");
                    return None;
                }
            };
            let message = response.message()?;

            if message.tool_calls.is_empty() {
                return Some(message.content);
            }

            let results = dispatch(&self.handlers, &message.tool_calls).await;
            messages.push(message);
            messages.extend(results);
            tool_choice = ToolChoice::None;
        }

        tracing::error!("database agent exceeded the tool call budget");
        None
    }
}
