//! Base chat-model abstraction.
//!
//! The chat endpoint talks to the hosted model only through [`ChatModel`],
//! which keeps route handlers testable with an in-process fake.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::utilities::errors::ChatError;

/// Who authored a message in the model conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single message in a chat-completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A hosted model that turns a message list into a reply.
///
/// Implementations make a single attempt per call and report every failure
/// (transport, status, unparseable body) as [`ChatError::Model`].
#[async_trait]
pub trait ChatModel: Send + Sync + fmt::Debug {
    /// Model identifier sent to the provider.
    fn model(&self) -> &str;

    /// Provider name, for logging.
    fn provider(&self) -> &str {
        "openai"
    }

    /// Generate the assistant reply for `messages`.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ChatError>;
}
