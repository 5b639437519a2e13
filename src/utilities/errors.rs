//! Error types shared by the chat endpoint and the chat UI.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Placeholder shown when the endpoint answered without a usable `response`.
pub const NO_RESPONSE_PLACEHOLDER: &str = "No response from the bot.";

/// Errors produced anywhere along the conversation-turn pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// The submitted question was empty or whitespace-only.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The chat endpoint answered with a non-success status.
    #[error("Upstream returned status {status}")]
    UpstreamStatus { status: u16 },

    /// The chat endpoint could not be reached (connect failure, timeout, ...).
    #[error("Upstream transport error: {0}")]
    UpstreamTransport(String),

    /// The chat endpoint answered 200 but the body was unusable.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Startup configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The hosted model failed to produce a completion.
    #[error("Model error: {0}")]
    Model(String),
}

impl ChatError {
    /// Shorthand for the empty-question rejection.
    pub fn empty_question() -> Self {
        Self::Validation("Message cannot be empty".to_string())
    }

    /// Text substituted for the bot reply when a turn fails upstream.
    ///
    /// Returns `None` for errors the session does not recover from.
    pub fn placeholder(&self) -> Option<String> {
        match self {
            Self::UpstreamStatus { status } => {
                Some(format!("Error: Received status code {}", status))
            }
            Self::UpstreamTransport(detail) => Some(format!(
                "An error occurred while connecting to the server: {}",
                detail
            )),
            Self::MalformedResponse(_) => Some(NO_RESPONSE_PLACEHOLDER.to_string()),
            Self::Validation(_) | Self::Configuration(_) | Self::Model(_) => None,
        }
    }

    /// HTTP status used when this error is returned from a route.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamStatus { .. }
            | Self::UpstreamTransport(_)
            | Self::MalformedResponse(_)
            | Self::Model(_) => StatusCode::BAD_GATEWAY,
            Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            Self::Validation(msg) => msg.clone(),
            other => other.to_string(),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
