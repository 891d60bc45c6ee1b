//! Text-completion collaborator interface.
//!
//! The core never talks to the hosted LLM directly; it goes through the
//! [`CompletionService`] trait so the UI layer (or a test) can plug in any
//! backend. [`ChatAssistant`] wires a service to a session transcript and
//! turns endpoint failures into transcript entries instead of errors - the
//! session must survive a flaky completion endpoint.

use async_trait::async_trait;
use report_types::{ChatTranscript, ChatTurn};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::CompletionResult;

mod openai;

pub use openai::OpenAiClient;

/// Default system context handed to the completion endpoint.
pub const DEFAULT_SYSTEM_CONTEXT: &str = "You are an assistant for maritime noon reporting. \
     Help the user fill in vessel position, navigation, weather, fuel ROB \
     and cargo figures, and explain which report types may follow one \
     another.";

/// Greeting seeded into a fresh transcript, matching the form UI.
pub const GREETING: &str = "How can I help you with your maritime reporting?";

/// Completion endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// API key for the completion service
    pub api_key: String,
    /// Model name to use
    pub model: String,
    /// Maximum tokens in the reply
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 - 1.0)
    pub temperature: Option<f32>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: Some(1024),
            temperature: Some(0.2),
            timeout_seconds: 30,
        }
    }
}

impl CompletionConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}

/// A generic text-completion capability.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Produce a reply to `user_text` given the system context and the
    /// conversation so far. Fails with `CompletionError` on network or auth
    /// problems; the caller decides how to surface that.
    async fn complete(
        &self,
        system_context: &str,
        history: &[ChatTurn],
        user_text: &str,
    ) -> CompletionResult<String>;
}

/// Chat glue between a transcript and a completion service.
pub struct ChatAssistant {
    service: Box<dyn CompletionService>,
    system_context: String,
}

impl ChatAssistant {
    pub fn new(service: Box<dyn CompletionService>) -> Self {
        Self {
            service,
            system_context: DEFAULT_SYSTEM_CONTEXT.to_string(),
        }
    }

    pub fn with_system_context(mut self, system_context: impl Into<String>) -> Self {
        self.system_context = system_context.into();
        self
    }

    /// Seed the opening assistant greeting into an empty transcript.
    pub fn greet(&self, transcript: &mut ChatTranscript) {
        if transcript.is_empty() {
            transcript.push(ChatTurn::assistant(GREETING));
        }
    }

    /// Forward one user message and append both turns to the transcript.
    ///
    /// Endpoint failures are reported as an assistant turn rather than an
    /// error: the session keeps its state and the user may simply retry. No
    /// retries are attempted here.
    pub async fn send(&self, transcript: &mut ChatTranscript, user_text: &str) -> String {
        transcript.push(ChatTurn::user(user_text));

        let reply = match self
            .service
            .complete(&self.system_context, transcript.turns(), user_text)
            .await
        {
            Ok(text) => {
                info!(turns = transcript.len(), "completion round-trip succeeded");
                text
            }
            Err(e) => {
                error!(error = %e, "completion endpoint failed");
                format!("Assistant unavailable: {}", e)
            }
        };

        transcript.push(ChatTurn::assistant(reply.clone()));
        reply
    }
}
