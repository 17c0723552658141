//! The manager agent: the conversation front over the asset ledger.

use crate::{DbManager, Handler, MAX_TOOL_CALLS, dispatch, trim_history};
use compact_str::CompactString;
use llm::{General, LLM, Message, Request, Tool, ToolChoice};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::Mutex;

const MANAGER_PROMPT: &str = include_str!("../prompts/manager.md");

/// Thread id used by callers that share one logical session.
pub const DEFAULT_THREAD: &str = "main";

/// Arguments for the delegation tool.
#[derive(Debug, Deserialize, JsonSchema)]
struct DelegateArgs {
    /// The user's data question, passed through as natural language.
    query: String,
}

/// The conversation front.
///
/// Decides per utterance whether data access is needed; data questions
/// MUST go through the single `ask_db_manager` tool, which forwards the
/// query to the [`DbManager`]. After the delegate answers, the loop
/// forces `tool_choice: none`, so the model can only rephrase; it
/// cannot re-invoke the tool speculatively within the turn.
///
/// Conversation threads live in memory, keyed by thread id. The
/// trimming policy runs before every model call and wholesale-replaces
/// the stored sequence.
pub struct AssetManager<P: LLM> {
    provider: P,
    config: General,
    tools: Vec<Tool>,
    handlers: BTreeMap<CompactString, Handler>,
    sessions: Mutex<BTreeMap<CompactString, Vec<Message>>>,
}

impl<P: LLM + 'static> AssetManager<P> {
    /// Create a manager agent delegating to the given database agent.
    pub fn new(provider: P, config: General, delegate: DbManager<P>) -> Self {
        let tool = Tool {
            name: "ask_db_manager".into(),
            description: "Ask the database manager questions about assets. \
                          Pass the user's natural language query directly to this tool. \
                          Example: \"Find my most expensive laptop\" or \"Total value of assets\"."
                .into(),
            parameters: schema_for!(DelegateArgs),
            strict: true,
        };

        let delegate = Arc::new(delegate);
        let handler: Handler = Arc::new(move |args| {
            let delegate = Arc::clone(&delegate);
            Box::pin(async move {
                let query = match serde_json::from_str::<DelegateArgs>(&args) {
                    Ok(args) => args.query,
                    Err(e) => {
                        tracing::error!(tool = "ask_db_manager", "invalid arguments: {e}");
                        return "invalid arguments: expected a 'query' string".to_string();
                    }
                };

                tracing::info!(tool = "ask_db_manager", "delegating data question to the database agent");
                match delegate.run_query(&query).await {
                    Some(answer) => answer,
                    None => {
                        tracing::error!(tool = "ask_db_manager", "database agent could not answer");
                        "tool failed to retrieve anything".to_string()
                    }
                }
            })
        });

        let mut handlers = BTreeMap::new();
        handlers.insert(tool.name.clone(), handler);
        Self {
            provider,
            config,
            tools: vec![tool],
            handlers,
            sessions: Mutex::new(BTreeMap::new()),
        }
    }

    /// Run one conversation turn on the given thread.
    ///
    /// Appends the user message and the produced turns to the thread.
    /// Returns `None` when the model round-trip fails; the caller must
    /// degrade gracefully rather than surface a raw fault.
    pub async fn run_query(&self, user_text: &str, thread: &str) -> Option<String> {
        let mut sessions = self.sessions.lock().await;
        let history = sessions.entry(thread.into()).or_default();
        history.push(Message::user(user_text));

        let mut tool_choice = ToolChoice::Auto;
        for _ in 0..MAX_TOOL_CALLS {
            // Pre-inference hook: bound the window, replacing the
            // stored sequence.
            *history = trim_history(std::mem::take(history));

            let mut messages = Vec::with_capacity(history.len() + 1);
            messages.push(Message::system(MANAGER_PROMPT));
            messages.extend(history.iter().cloned());

            let request = Request::from(self.config.clone())
                .with_messages(messages)
                .with_tools(&self.tools)
                .with_tool_choice(tool_choice.clone());

            let response = match self.provider.send(&request).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::error!("manager agent model call failed: {e}");
                    return None;
                }
            };
            let message = response.message()?;

            if message.tool_calls.is_empty() {
                history.push(message.clone());
                return Some(message.content);
            }

            let results = dispatch(&self.handlers, &message.tool_calls).await;
            history.push(message);
            history.extend(results);
            tool_choice = ToolChoice::None;
        }

        tracing::error!("manager agent exceeded the tool call budget");
        None
    }
}
