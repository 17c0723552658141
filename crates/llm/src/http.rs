//! OpenAI-compatible HTTP transport.
//!
//! [`HttpProvider`] posts a [`Request`] to a chat-completions endpoint
//! and parses the [`Response`]. Authentication is header-based:
//! bearer token, custom header, or none (local endpoints).

use crate::{LLM, RateLimiter, Request, Response};
use anyhow::{Context, Result};
use reqwest::{
    Client,
    header::{HeaderMap, HeaderName, HeaderValue},
};

/// An OpenAI-compatible chat-completions provider.
#[derive(Clone)]
pub struct HttpProvider {
    /// The HTTP client
    client: Client,

    /// The request headers
    headers: HeaderMap,

    /// The chat-completions endpoint URL
    endpoint: String,

    /// Optional rate limiter applied before each call
    limiter: Option<RateLimiter>,
}

impl HttpProvider {
    /// Create a provider authenticating with a bearer token.
    pub fn bearer(client: Client, key: &str, endpoint: impl Into<String>) -> Result<Self> {
        let mut headers = base_headers();
        let value = HeaderValue::from_str(&format!("Bearer {key}"))
            .context("api key is not a valid header value")?;
        headers.insert(reqwest::header::AUTHORIZATION, value);
        Ok(Self {
            client,
            headers,
            endpoint: endpoint.into(),
            limiter: None,
        })
    }

    /// Create a provider with no authentication (local endpoints).
    pub fn no_auth(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            headers: base_headers(),
            endpoint: endpoint.into(),
            limiter: None,
        }
    }

    /// Create a provider authenticating with a named header.
    pub fn custom_header(
        client: Client,
        name: &str,
        value: &str,
        endpoint: impl Into<String>,
    ) -> Result<Self> {
        let mut headers = base_headers();
        let name: HeaderName = name.parse().context("invalid header name")?;
        let value = HeaderValue::from_str(value).context("invalid header value")?;
        headers.insert(name, value);
        Ok(Self {
            client,
            headers,
            endpoint: endpoint.into(),
            limiter: None,
        })
    }

    /// Attach a rate limiter; [`send`](LLM::send) waits for a token
    /// before each call instead of bursting.
    pub fn with_limiter(mut self, limiter: RateLimiter) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// The request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The chat-completions endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl LLM for HttpProvider {
    async fn send(&self, request: &Request) -> Result<Response> {
        if let Some(limiter) = &self.limiter {
            limiter.acquire().await;
        }

        tracing::debug!(model = %request.model, "sending chat completion request");
        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(request)
            .send()
            .await
            .context("LLM request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("LLM returned {status}: {body}");
        }

        response
            .json::<Response>()
            .await
            .context("failed to parse LLM response")
    }
}

/// Base headers for JSON request/response bodies.
fn base_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        reqwest::header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        reqwest::header::ACCEPT,
        HeaderValue::from_static("application/json"),
    );
    headers
}
