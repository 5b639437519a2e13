//! Client side of the chat endpoint, as consumed by the chat UI.
//!
//! The turn pipeline only sees the [`ChatEndpoint`] trait; the HTTP
//! implementation maps every way the call can go wrong onto a
//! [`ChatError`] whose placeholder text the session records instead.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::server::ChatRequest;
use crate::utilities::errors::ChatError;
use crate::utilities::string_utils::truncate_chars;

/// Default timeout for one question/answer round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Something that answers a question with generated text.
#[async_trait]
pub trait ChatEndpoint: Send + Sync {
    /// Ask one question. Single attempt, no retries.
    async fn ask(&self, question: &str) -> Result<String, ChatError>;
}

/// `POST {url}` with `{"question": ...}`, expecting `{"response": ...}`.
#[derive(Debug, Clone)]
pub struct HttpChatEndpoint {
    client: reqwest::Client,
    url: String,
}

impl HttpChatEndpoint {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ChatError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChatError::Configuration(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ChatEndpoint for HttpChatEndpoint {
    async fn ask(&self, question: &str) -> Result<String, ChatError> {
        let payload = ChatRequest {
            question: question.to_string(),
        };

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ChatError::UpstreamTransport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ChatError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ChatError::UpstreamTransport(e.to_string()))?;

        let json: Value = serde_json::from_str(&body).map_err(|e| {
            ChatError::MalformedResponse(format!(
                "{} - Body: {}",
                e,
                truncate_chars(&body, 200)
            ))
        })?;

        json.get("response")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ChatError::MalformedResponse("missing `response` field".to_string()))
    }
}
