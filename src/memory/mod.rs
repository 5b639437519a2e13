//! Conversation memory held by the chat endpoint.

pub mod short_term;

pub use short_term::{ConversationWindow, Exchange, DEFAULT_WINDOW};
