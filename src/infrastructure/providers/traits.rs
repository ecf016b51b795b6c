//! # Provider Client Trait
//!
//! Port definition for partner API clients.
//!
//! A [`ProviderClient`] is a pure request/response adapter: it knows the
//! partner's base URL, authentication and timeout, and carries a
//! [`ProviderRequest`] to the wire and a [`ProviderReply`] back. Business
//! rules live in the request builders and the orchestrator.
//!
//! # Examples
//!
//! ```ignore
//! use osago_quotes::infrastructure::providers::traits::{ProviderClient, ProviderRequest};
//!
//! let reply = client.call(ProviderRequest::post("/osago/calc", body)).await?;
//! let body = reply.into_success()?;
//! ```

use crate::domain::value_objects::ProviderName;
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::fmt;

/// An outbound partner request, relative to the client's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    /// HTTP method.
    pub method: Method,
    /// Path appended to the base URL.
    pub path: String,
    /// Extra request headers.
    pub headers: Vec<(String, String)>,
    /// JSON body.
    pub body: Option<Value>,
}

impl ProviderRequest {
    /// Creates a request with the given method and path.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Creates a POST request with a JSON body.
    #[must_use]
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A partner response: status code and body.
///
/// Non-JSON bodies are carried as a JSON string.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderReply {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Value,
}

impl ProviderReply {
    /// Creates a reply.
    #[must_use]
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Returns true for a 2xx status.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the body of a 2xx reply.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Authentication` for 401/403 and
    /// `ProviderError::Status` for any other non-2xx status.
    pub fn into_success(self) -> ProviderResult<Value> {
        if self.is_success() {
            return Ok(self.body);
        }
        let body = match self.body {
            Value::String(text) => text,
            other => other.to_string(),
        };
        match self.status {
            401 | 403 => Err(ProviderError::authentication(format!(
                "HTTP {}: {}",
                self.status, body
            ))),
            status => Err(ProviderError::status(status, body)),
        }
    }
}

/// Client for one partner API.
#[async_trait]
pub trait ProviderClient: Send + Sync + fmt::Debug {
    /// Returns the provider this client talks to.
    fn provider(&self) -> ProviderName;

    /// Returns the per-call timeout in milliseconds.
    fn timeout_ms(&self) -> u64;

    /// Sends the request and returns the status and body.
    ///
    /// A non-2xx status is not an error at this level.
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` on timeout, connection or authentication
    /// failure.
    async fn call(&self, request: ProviderRequest) -> ProviderResult<ProviderReply>;
}
