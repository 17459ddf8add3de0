//! OpenAI-compatible chat completion client
//!
//! One POST to `{base_url}/chat/completions` per call. No sampling options,
//! no streaming, no retries: whatever the endpoint returns is passed on.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::errors::{RagError, Result};
use crate::models::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Default OpenAI API base URL
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";

/// Default chat model
pub const DEFAULT_CHAT_MODEL: &str = "gpt-5";

/// Anything that turns an ordered message list into generated text
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Return the content of the first choice, verbatim
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;

    /// Model identifier sent with each request
    fn model(&self) -> &str;
}

/// HTTP client for the chat completions endpoint
#[derive(Debug, Clone)]
pub struct OpenAIChatClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAIChatClient {
    /// Create a client for `model` against `base_url`
    pub fn with_config(base_url: &str, api_key: &str, model: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RagError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl ChatModel for OpenAIChatClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
        };

        debug!(model = %self.model, messages = messages.len(), "requesting chat completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| RagError::CompletionApi(format!("Failed to send request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RagError::CompletionApi(format!("HTTP {}: {}", status, error_text)));
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| RagError::MalformedResponse(format!("chat completion: {}", e)))?;

        first_choice_content(body)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Content of the first choice, untouched
pub(crate) fn first_choice_content(response: ChatCompletionResponse) -> Result<String> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| RagError::MalformedResponse("chat completion has no choices".to_string()))?;

    choice
        .message
        .content
        .ok_or_else(|| RagError::MalformedResponse("first choice has no content".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: serde_json::Value) -> ChatCompletionResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = OpenAIChatClient::with_config(
            DEFAULT_OPENAI_URL,
            "sk-test",
            DEFAULT_CHAT_MODEL,
            Duration::from_secs(120),
        )
        .unwrap();
        assert_eq!(client.model(), DEFAULT_CHAT_MODEL);
        assert_eq!(client.base_url, DEFAULT_OPENAI_URL);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = OpenAIChatClient::with_config(
            "http://localhost:8080/v1/",
            "key",
            "local-model",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.base_url, "http://localhost:8080/v1");
        assert_eq!(client.model(), "local-model");
    }

    #[test]
    fn test_first_choice_is_verbatim() {
        let body = parse(json!({"choices": [
            {"message": {"content": "  Open page 12.\n"}},
            {"message": {"content": "ignored"}}
        ]}));
        assert_eq!(first_choice_content(body).unwrap(), "  Open page 12.\n");
    }

    #[test]
    fn test_no_choices_is_malformed() {
        let body = parse(json!({"choices": []}));
        assert!(matches!(
            first_choice_content(body),
            Err(RagError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_null_content_is_malformed() {
        let body = parse(json!({"choices": [{"message": {"content": null}}]}));
        assert!(matches!(
            first_choice_content(body),
            Err(RagError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    #[ignore] // Requires OPENAI_API_KEY and network access
    async fn test_complete_integration() {
        let key = std::env::var("OPENAI_API_KEY").unwrap();
        let client = OpenAIChatClient::with_config(
            DEFAULT_OPENAI_URL,
            &key,
            DEFAULT_CHAT_MODEL,
            Duration::from_secs(30),
        )
        .unwrap();
        let answer = client
            .complete(&[ChatMessage::system("Reply with OK."), ChatMessage::user("ping")])
            .await;
        assert!(answer.is_ok());
    }
}
