//! Stencil LLM Provider Layer
//!
//! Pluggable chat-completion providers with schema-constrained output.
//!
//! # Architecture
//!
//! This crate provides implementations of the [`ChatProvider`] trait. A
//! provider takes one [`ChatRequest`] (system + user message plus a
//! JSON-Schema document describing the expected output shape) and returns
//! the model's response parsed as a JSON value. Whatever repair or
//! constrained decoding the backend offers happens behind this boundary;
//! callers see a parsed value or an error.
//!
//! # Providers
//!
//! - [`MockProvider`]: deterministic mock for testing
//! - [`OpenAiProvider`]: OpenAI-compatible chat completions API
//!
//! # Examples
//!
//! ```
//! use stencil_llm::{ChatRequest, MockProvider};
//! use serde_json::json;
//!
//! let provider = MockProvider::new(json!({"name": "Ada"}));
//! let _request = ChatRequest::new("gpt-4o-mini", "system", "user text", "Person", json!({}));
//! assert_eq!(provider.call_count(), 0);
//! ```

#![warn(missing_docs)]

pub mod openai;

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use openai::OpenAiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response could not be parsed as the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The provider returned an error status
    #[error("Provider error (HTTP {status}): {message}")]
    Provider {
        /// HTTP status code returned by the provider
        status: u16,
        /// Error body or description
        message: String,
    },
}

/// One schema-constrained chat completion request
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Model identifier (e.g. "gpt-4o-mini")
    pub model: String,

    /// System instruction
    pub system: String,

    /// User message (the text to extract from)
    pub user: String,

    /// Name of the output schema (used to label the response format)
    pub schema_name: String,

    /// JSON-Schema document constraining the output
    pub schema: Value,
}

impl ChatRequest {
    /// Create a request
    pub fn new(
        model: impl Into<String>,
        system: impl Into<String>,
        user: impl Into<String>,
        schema_name: impl Into<String>,
        schema: Value,
    ) -> Self {
        Self {
            model: model.into(),
            system: system.into(),
            user: user.into(),
            schema_name: schema_name.into(),
            schema,
        }
    }
}

/// A chat-completion backend producing schema-constrained JSON
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Issue one completion request, returning the response parsed as JSON
    ///
    /// Implementations make exactly one network round trip per call; any
    /// internal repair or retry behavior belongs to the backend, not to
    /// callers of this trait.
    async fn complete(&self, request: &ChatRequest) -> Result<Value, LlmError>;
}

/// Mock provider for deterministic testing
///
/// Returns pre-configured JSON values without making any network calls,
/// and counts invocations so tests can assert a provider was (or was not)
/// reached.
///
/// # Examples
///
/// ```
/// use stencil_llm::MockProvider;
/// use serde_json::json;
///
/// let provider = MockProvider::new(json!({"name": "Ada"}));
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: Value,
    queued: Arc<Mutex<VecDeque<Result<Value, String>>>>,
    call_count: Arc<Mutex<usize>>,
    last_request: Arc<Mutex<Option<ChatRequest>>>,
}

impl MockProvider {
    /// Create a mock returning a fixed value for every call
    pub fn new(response: Value) -> Self {
        Self {
            default_response: response,
            queued: Arc::new(Mutex::new(VecDeque::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Queue a one-shot response consumed before the default
    pub fn push_response(&self, response: Value) {
        self.queued.lock().unwrap().push_back(Ok(response));
    }

    /// Queue a one-shot error consumed before the default
    pub fn push_error(&self, message: impl Into<String>) {
        self.queued.lock().unwrap().push_back(Err(message.into()));
    }

    /// Number of times `complete` was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// The most recent request, if any call was made
    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(Value::Object(serde_json::Map::new()))
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<Value, LlmError> {
        *self.call_count.lock().unwrap() += 1;
        *self.last_request.lock().unwrap() = Some(request.clone());

        if let Some(next) = self.queued.lock().unwrap().pop_front() {
            return next.map_err(LlmError::Communication);
        }

        Ok(self.default_response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_provider_default_response() {
        let provider = MockProvider::new(json!({"name": "Ada"}));
        let request = ChatRequest::new("m", "s", "u", "Person", json!({}));

        let value = provider.complete(&request).await.unwrap();
        assert_eq!(value, json!({"name": "Ada"}));
    }

    #[tokio::test]
    async fn test_mock_provider_queued_responses() {
        let provider = MockProvider::new(json!({}));
        provider.push_response(json!({"first": true}));
        provider.push_response(json!({"second": true}));
        let request = ChatRequest::new("m", "s", "u", "Person", json!({}));

        assert_eq!(provider.complete(&request).await.unwrap(), json!({"first": true}));
        assert_eq!(provider.complete(&request).await.unwrap(), json!({"second": true}));
        // Queue drained, falls back to the default
        assert_eq!(provider.complete(&request).await.unwrap(), json!({}));
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::default();
        let request = ChatRequest::new("m", "s", "u", "Person", json!({}));

        assert_eq!(provider.call_count(), 0);
        provider.complete(&request).await.unwrap();
        assert_eq!(provider.call_count(), 1);
        provider.complete(&request).await.unwrap();
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let provider = MockProvider::default();
        provider.push_error("connection refused");
        let request = ChatRequest::new("m", "s", "u", "Person", json!({}));

        let result = provider.complete(&request).await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }

    #[tokio::test]
    async fn test_mock_provider_records_last_request() {
        let provider = MockProvider::default();
        let request = ChatRequest::new("gpt-4o", "sys", "hello", "Person", json!({}));

        provider.complete(&request).await.unwrap();

        let recorded = provider.last_request().unwrap();
        assert_eq!(recorded.model, "gpt-4o");
        assert_eq!(recorded.user, "hello");
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::default();
        let provider2 = provider1.clone();
        let request = ChatRequest::new("m", "s", "u", "Person", json!({}));

        provider1.complete(&request).await.unwrap();

        // Both share the same call count through Arc
        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
