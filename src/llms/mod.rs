//! Hosted chat-model clients.

pub mod base_llm;
pub mod providers;

pub use base_llm::{ChatMessage, ChatModel, Role};
pub use providers::openai::OpenAICompletion;
