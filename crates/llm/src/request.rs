//! Chat request type.
//!
//! Contains everything needed to make an LLM call: model, messages,
//! tools, and tool choice. Tools are serialized into the
//! OpenAI-compatible `{"type": "function", "function": {...}}` envelope
//! at build time so the transport can post the request as-is.

use crate::{General, Message, Tool, ToolChoice};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A chat completion request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Request {
    /// The model to use.
    pub model: CompactString,

    /// The conversation messages.
    #[serde(default)]
    pub messages: Vec<Message>,

    /// Sampling temperature.
    pub temperature: f32,

    /// The tools available for this request (function envelopes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,

    /// Controls which tool is called by the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<Value>,
}

impl Request {
    /// Create a new request for the given model.
    pub fn new(model: impl Into<CompactString>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: 0.0,
            tools: None,
            tool_choice: None,
        }
    }

    /// Set the messages for this request.
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    /// Set the tools for this request.
    ///
    /// An empty slice leaves `tools` unset; some providers reject an
    /// empty tool array.
    pub fn with_tools(mut self, tools: &[Tool]) -> Self {
        if !tools.is_empty() {
            self.tools = Some(
                tools
                    .iter()
                    .map(|tool| {
                        json!({
                            "type": "function",
                            "function": {
                                "name": tool.name,
                                "description": tool.description,
                                "parameters": tool.parameters,
                                "strict": tool.strict,
                            },
                        })
                    })
                    .collect(),
            );
        }
        self
    }

    /// Set the tool choice for this request.
    pub fn with_tool_choice(mut self, tool_choice: ToolChoice) -> Self {
        if self.tools.is_some() {
            self.tool_choice = serde_json::to_value(tool_choice).ok();
        }
        self
    }
}

impl From<General> for Request {
    fn from(config: General) -> Self {
        Self {
            model: config.model,
            messages: Vec::new(),
            temperature: config.temperature,
            tools: None,
            tool_choice: None,
        }
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::from(General::default())
    }
}
