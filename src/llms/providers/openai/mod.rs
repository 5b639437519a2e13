//! OpenAI-compatible Chat Completions provider.
//!
//! Speaks `POST {base_url}/chat/completions` with bearer auth, which covers
//! OpenAI itself and the many hosts exposing the same API. The defaults
//! target Groq.
//!
//! # Behaviour
//!
//! - One attempt per call, bounded by the configured timeout
//! - Non-2xx status, transport failure and a body without
//!   `choices[0].message.content` are all [`ChatError::Model`]
//! - Token usage is logged at debug level when the provider reports it

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::llms::base_llm::{ChatMessage, ChatModel};
use crate::utilities::errors::ChatError;
use crate::utilities::string_utils::truncate_chars;

/// Default API base URL (Groq's OpenAI-compatible surface).
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default model name.
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Chat Completions client.
///
/// # Example
///
/// ```ignore
/// let provider = OpenAICompletion::new("llama-3.1-8b-instant", key, None, DEFAULT_TIMEOUT)?
///     .with_temperature(0.7);
/// let reply = provider.complete(&[ChatMessage::user("Hello")]).await?;
/// ```
#[derive(Clone)]
pub struct OpenAICompletion {
    model: String,
    api_key: String,
    base_url: Option<String>,
    provider: String,
    /// Sampling temperature; omitted from the request when `None`.
    pub temperature: Option<f64>,
    /// Maximum tokens in the reply; omitted from the request when `None`.
    pub max_tokens: Option<u32>,
    timeout: Duration,
    client: reqwest::Client,
}

impl fmt::Debug for OpenAICompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAICompletion")
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.api_base_url())
            .field("provider", &self.provider)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OpenAICompletion {
    /// Create a provider.
    ///
    /// # Arguments
    ///
    /// * `model` - Model name (e.g., "llama-3.1-8b-instant", "gpt-4o-mini").
    /// * `api_key` - Bearer token for the provider.
    /// * `base_url` - Optional custom base URL (defaults to [`DEFAULT_BASE_URL`]).
    /// * `timeout` - Whole-request timeout.
    pub fn new(
        model: impl Into<String>,
        api_key: impl Into<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ChatError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChatError::Configuration(format!("failed to build HTTP client: {}", e)))?;
        let provider = provider_from_base_url(base_url.as_deref());
        Ok(Self {
            model: model.into(),
            api_key: api_key.into(),
            base_url,
            provider,
            temperature: None,
            max_tokens: None,
            timeout,
            client,
        })
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Get the API base URL.
    pub fn api_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base_url().trim_end_matches('/'))
    }

    /// Build the request body for the Chat Completions API.
    pub fn build_request_body(&self, messages: &[ChatMessage]) -> Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
        });

        if let Some(temp) = self.temperature {
            body["temperature"] = serde_json::json!(temp);
        }
        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        body
    }

    /// Extract the reply text from a Chat Completions response.
    pub fn parse_response(&self, response: &Value) -> Result<String, ChatError> {
        let choice = response
            .get("choices")
            .and_then(|c| c.get(0))
            .ok_or_else(|| ChatError::Model(format!("No choices in {} response", self.provider)))?;

        let content = choice
            .get("message")
            .and_then(|m| m.get("content"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ChatError::Model(format!("No message content in {} choice", self.provider))
            })?;

        if let Some(usage) = response.get("usage") {
            log::debug!(
                "{} token usage: prompt={}, completion={}, total={}",
                self.provider,
                usage.get("prompt_tokens").and_then(Value::as_i64).unwrap_or(0),
                usage.get("completion_tokens").and_then(Value::as_i64).unwrap_or(0),
                usage.get("total_tokens").and_then(Value::as_i64).unwrap_or(0),
            );
        }

        Ok(content.to_string())
    }
}

/// Best-effort provider label from the base URL host.
fn provider_from_base_url(base_url: Option<&str>) -> String {
    let url = base_url.unwrap_or(DEFAULT_BASE_URL);
    let label = if url.contains("groq.com") {
        "groq"
    } else if url.contains("openai.com") {
        "openai"
    } else if url.contains("x.ai") {
        "xai"
    } else {
        "openai-compatible"
    };
    label.to_string()
}

#[async_trait]
impl ChatModel for OpenAICompletion {
    fn model(&self) -> &str {
        &self.model
    }

    fn provider(&self) -> &str {
        &self.provider
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ChatError> {
        log::debug!(
            "OpenAICompletion.complete: provider={}, model={}, messages={}",
            self.provider,
            self.model,
            messages.len(),
        );

        let body = self.build_request_body(messages);
        let response = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Model(format!("HTTP error: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| ChatError::Model(format!("HTTP error: {}", e)))?;

        if !status.is_success() {
            return Err(ChatError::Model(format!(
                "{} API error ({}): {}",
                self.provider,
                status,
                truncate_chars(&response_text, 500)
            )));
        }

        let response_json: Value = serde_json::from_str(&response_text).map_err(|e| {
            ChatError::Model(format!(
                "Failed to parse {} response: {} - Body: {}",
                self.provider,
                e,
                truncate_chars(&response_text, 500)
            ))
        })?;

        self.parse_response(&response_json)
    }
}
