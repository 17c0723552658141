//! Provider abstraction for the unified LLM interfaces

use crate::{Request, Response};
use anyhow::Result;
use std::future::Future;

/// A trait for LLM providers
pub trait LLM: Clone + Send + Sync {
    /// Send a chat completion request to the LLM
    fn send(&self, request: &Request) -> impl Future<Output = Result<Response>> + Send;
}
