//! Scripted LLM provider for testing.
//!
//! [`ScriptedProvider`] replays a queue of canned responses and records
//! every request it receives, letting tests drive a full agent loop
//! without a network round-trip.

use crate::{
    Choice, Delta, FinishReason, FunctionCall, LLM, Request, Response, ToolCall,
};
use anyhow::Result;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A provider that pops pre-scripted responses in order.
///
/// Clones share the same script and request log, so a test can keep one
/// handle while the agent under test owns another.
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    responses: Arc<Mutex<VecDeque<Response>>>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl ScriptedProvider {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a plain text response.
    pub fn push_text(&self, content: impl Into<String>) {
        self.push(Response {
            choices: vec![Choice {
                message: Delta {
                    content: Some(content.into()),
                    ..Default::default()
                },
                finish_reason: Some(FinishReason::Stop),
                ..Default::default()
            }],
            ..Default::default()
        });
    }

    /// Queue a response calling the named tool with JSON arguments.
    pub fn push_tool_call(&self, name: &str, arguments: serde_json::Value) {
        let call = ToolCall {
            id: "call_0".into(),
            call_type: "function".into(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.to_string(),
            },
        };
        self.push(Response {
            choices: vec![Choice {
                message: Delta {
                    tool_calls: Some(vec![call]),
                    ..Default::default()
                },
                finish_reason: Some(FinishReason::ToolCalls),
                ..Default::default()
            }],
            ..Default::default()
        });
    }

    /// Queue a raw response.
    pub fn push(&self, response: Response) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of scripted responses not yet consumed.
    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

impl LLM for ScriptedProvider {
    async fn send(&self, request: &Request) -> Result<Response> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("scripted provider exhausted"))
    }
}
