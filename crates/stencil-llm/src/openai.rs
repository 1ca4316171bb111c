//! OpenAI Provider Implementation
//!
//! Chat-completions integration with schema-constrained output via the
//! `response_format: json_schema` mode. Works against the OpenAI API or
//! any compatible gateway when the base URL is overridden.
//!
//! # Examples
//!
//! ```no_run
//! use stencil_llm::OpenAiProvider;
//!
//! let provider = OpenAiProvider::new("sk-...");
//!
//! // Point at a local OpenAI-compatible gateway instead:
//! let local = OpenAiProvider::new("unused").with_base_url("http://localhost:4000/v1");
//! ```

use crate::{ChatProvider, ChatRequest, LlmError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

/// Default OpenAI API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default timeout for completion requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// OpenAI-compatible chat-completions provider
pub struct OpenAiProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

/// Request body for the chat completions API
#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    response_format: Value,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response body from the chat completions API
#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl OpenAiProvider {
    /// Create a provider authenticating with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Override the API base URL (local gateways, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let url = base_url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    fn response_format(request: &ChatRequest) -> Value {
        json!({
            "type": "json_schema",
            "json_schema": {
                "name": request.schema_name,
                "strict": true,
                "schema": request.schema,
            }
        })
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<Value, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = CompletionRequest {
            model: &request.model,
            messages: vec![
                Message {
                    role: "system",
                    content: &request.system,
                },
                Message {
                    role: "user",
                    content: &request.user,
                },
            ],
            response_format: Self::response_format(request),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let content = completion
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| LlmError::InvalidResponse("No choices in response".to_string()))?;

        serde_json::from_str(content).map_err(|e| {
            LlmError::InvalidResponse(format!("Message content is not valid JSON: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = OpenAiProvider::new("test-key");
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(provider.api_key, "test-key");
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let provider = OpenAiProvider::new("k").with_base_url("http://localhost:4000/v1/");
        assert_eq!(provider.base_url, "http://localhost:4000/v1");
    }

    #[test]
    fn test_response_format_wraps_schema() {
        let request = ChatRequest::new(
            "gpt-4o-mini",
            "sys",
            "user",
            "ContactInfo",
            json!({"type": "object"}),
        );

        let format = OpenAiProvider::response_format(&request);
        assert_eq!(format["type"], "json_schema");
        assert_eq!(format["json_schema"]["name"], "ContactInfo");
        assert_eq!(format["json_schema"]["strict"], true);
        assert_eq!(format["json_schema"]["schema"]["type"], "object");
    }

    #[tokio::test]
    async fn test_connection_error() {
        // Unroutable port triggers a communication error
        let provider = OpenAiProvider::new("k").with_base_url("http://127.0.0.1:1/v1");
        let request = ChatRequest::new("m", "s", "u", "Person", json!({}));

        let result = provider.complete(&request).await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
