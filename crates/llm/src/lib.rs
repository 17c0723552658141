//! Unified LLM interface types and traits.
//!
//! This crate provides the shared types used across the workspace:
//! `Message`, `Tool`, `Request`, `Response`, and the [`LLM`] trait.
//! Also provides [`HttpProvider`] for OpenAI-compatible HTTP transport,
//! a token-bucket [`RateLimiter`], and the [`NoopProvider`] /
//! [`ScriptedProvider`] test providers.

pub use config::General;
pub use http::HttpProvider;
pub use limit::RateLimiter;
pub use message::{Message, Role};
pub use noop::NoopProvider;
pub use provider::LLM;
pub use request::Request;
pub use reqwest::{self, Client};
pub use response::{Choice, CompletionMeta, Delta, FinishReason, Response, Usage};
pub use scripted::ScriptedProvider;
pub use tool::{FunctionCall, Tool, ToolCall, ToolChoice};

mod config;
mod http;
mod limit;
mod message;
mod noop;
mod provider;
mod request;
mod response;
mod scripted;
mod tool;
