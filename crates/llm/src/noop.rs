//! No-op LLM provider for testing.
//!
//! Implements [`LLM`] but panics on `send`. Intended for unit tests
//! that exercise tool dispatch and session logic without making real
//! LLM calls.

use crate::{LLM, Request, Response};
use anyhow::Result;

/// A no-op LLM provider that panics on any actual LLM call.
///
/// # Panics
///
/// `send` panics if called. Only use this provider in tests that never
/// invoke LLM methods.
#[derive(Clone, Copy)]
pub struct NoopProvider;

impl LLM for NoopProvider {
    async fn send(&self, _request: &Request) -> Result<Response> {
        panic!("NoopProvider::send called — not intended for real LLM calls");
    }
}
