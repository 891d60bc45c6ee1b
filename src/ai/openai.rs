//! OpenAI chat-completions client.
//!
//! Implements [`CompletionService`] against the OpenAI `/chat/completions`
//! endpoint. The transcript roles map straight onto the wire roles; the
//! system context goes first as a `system` message.

use std::time::Duration;

use async_trait::async_trait;
use report_types::ChatTurn;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::{CompletionConfig, CompletionService};
use crate::error::{CompletionError, CompletionResult};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for the OpenAI chat-completions API.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    config: CompletionConfig,
    client: Client,
    base_url: String,
}

/// Chat-completions request body
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// One wire-format chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

/// Chat-completions response body
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

/// One completion candidate
#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: WireMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Token accounting reported by the endpoint
#[derive(Debug, Deserialize)]
struct TokenUsage {
    #[serde(default)]
    prompt_tokens: Option<u32>,
    #[serde(default)]
    completion_tokens: Option<u32>,
    #[serde(default)]
    total_tokens: Option<u32>,
}

impl OpenAiClient {
    /// Create a new client. Fails if no API key is configured.
    pub fn new(config: CompletionConfig) -> CompletionResult<Self> {
        if config.api_key.is_empty() {
            return Err(CompletionError::Authentication);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| CompletionError::Http(e.to_string()))?;

        Ok(Self {
            config,
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different endpoint (test servers, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Assemble the wire message list: system context, prior turns, then the
    /// new user utterance. The history already ends with the user turn when
    /// called through [`super::ChatAssistant`], so the trailing utterance is
    /// only appended if it is not already there.
    fn build_messages(
        &self,
        system_context: &str,
        history: &[ChatTurn],
        user_text: &str,
    ) -> Vec<WireMessage> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(WireMessage {
            role: "system".to_string(),
            content: system_context.to_string(),
        });
        for turn in history {
            messages.push(WireMessage {
                role: turn.role.as_str().to_string(),
                content: turn.text.clone(),
            });
        }
        let already_sent = history
            .last()
            .map(|t| t.text == user_text)
            .unwrap_or(false);
        if !already_sent {
            messages.push(WireMessage {
                role: "user".to_string(),
                content: user_text.to_string(),
            });
        }
        messages
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    async fn complete(
        &self,
        system_context: &str,
        history: &[ChatTurn],
        user_text: &str,
    ) -> CompletionResult<String> {
        let request_body = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: self.build_messages(system_context, history, user_text),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!(model = %self.config.model, url = %url, "sending completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| CompletionError::Http(e.to_string()))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| CompletionError::Http(e.to_string()))?;

        if !status.is_success() {
            error!(%status, "completion API error");
            return Err(CompletionError::Api(format!(
                "HTTP {}: {}",
                status, response_text
            )));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&response_text)?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::InvalidResponse("no choices in response".to_string()))?;

        if let Some(usage) = &parsed.usage {
            info!(
                prompt_tokens = ?usage.prompt_tokens,
                completion_tokens = ?usage.completion_tokens,
                total_tokens = ?usage.total_tokens,
                finish_reason = ?choice.finish_reason,
                "completion usage"
            );
        }

        Ok(choice.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> CompletionConfig {
        CompletionConfig::new("test-key", "gpt-3.5-turbo")
    }

    #[test]
    fn test_client_creation() {
        assert!(OpenAiClient::new(test_config()).is_ok());
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let mut config = test_config();
        config.api_key = String::new();
        let err = OpenAiClient::new(config).unwrap_err();
        assert!(matches!(err, CompletionError::Authentication));
    }

    #[test]
    fn test_build_messages_prepends_system_context() {
        let client = OpenAiClient::new(test_config()).unwrap();
        let history = vec![
            ChatTurn::assistant("How can I help?"),
            ChatTurn::user("What is ROB?"),
        ];

        let messages = client.build_messages("ctx", &history, "What is ROB?");
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "ctx");
        assert_eq!(messages[1].role, "assistant");
        assert_eq!(messages[2].role, "user");
        assert_eq!(messages[2].content, "What is ROB?");
    }

    #[test]
    fn test_build_messages_appends_unsent_user_turn() {
        let client = OpenAiClient::new(test_config()).unwrap();
        let messages = client.build_messages("ctx", &[], "hello");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "hello");
    }

    #[test]
    fn test_parse_response_shape() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "612.3 MT"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 42, "completion_tokens": 7, "total_tokens": 49}
        }"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices.len(), 1);
        assert_eq!(parsed.choices[0].message.content, "612.3 MT");
        assert_eq!(parsed.usage.as_ref().unwrap().total_tokens, Some(49));
    }

    // Integration test - requires a real API key
    #[tokio::test]
    #[ignore = "Requires OPENAI_API_KEY environment variable"]
    async fn test_openai_integration() {
        let config = CompletionConfig::default();
        let client = OpenAiClient::new(config).unwrap();
        let reply = client
            .complete(super::super::DEFAULT_SYSTEM_CONTEXT, &[], "What is a noon report?")
            .await
            .unwrap();
        assert!(!reply.is_empty());
    }
}
