//! # sentichat
//!
//! A two-process chat application with per-message sentiment annotation.
//!
//! - The **chat endpoint** (`server` binary) answers `POST /chat` questions
//!   with a hosted model, replaying the last few exchanges as context.
//! - The **chat UI** (`chat-ui` binary) keeps a turn history per browser
//!   session, scores every user and bot message with a lexicon-based
//!   sentiment analyzer, and optionally prefixes replies with a tone phrase
//!   matched to the user's mood.

pub mod client;
pub mod config;
pub mod llms;
pub mod memory;
pub mod sentiment;
pub mod server;
pub mod session;
pub mod tone;
pub mod ui;
pub mod utilities;

pub use client::{ChatEndpoint, HttpChatEndpoint};
pub use config::{EndpointConfig, UiConfig};
pub use llms::base_llm::{ChatMessage, ChatModel};
pub use llms::providers::openai::OpenAICompletion;
pub use sentiment::{classify, SentimentBucket, SentimentResult};
pub use session::{ChatSession, SessionStore, Turn, TurnStatus};
pub use tone::ToneSelector;
pub use utilities::errors::ChatError;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
