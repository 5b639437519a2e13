//! Axum route handlers for the chat endpoint.
//!
//! # Routes
//!
//! - `GET  /`           : Returns `{"message": "Welcome to the sentichat API"}`
//! - `GET  /health`     : Returns `{"status": "ok", "version": ..., "service": "sentichat"}`
//! - `POST /chat`       : Accepts `{"question"}`, returns `{"response"}`
//! - `POST /chat/reset` : Clears the conversation window

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::DEFAULT_SYSTEM_PROMPT;
use crate::llms::base_llm::{ChatMessage, ChatModel};
use crate::memory::ConversationWindow;
use crate::utilities::errors::ChatError;

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

/// Successful reply from `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Shared application state for the chat endpoint.
#[derive(Clone)]
pub struct AppState {
    /// Model that answers questions.
    pub model: Arc<dyn ChatModel>,
    /// Rolling window of recent exchanges, shared by every caller.
    pub memory: Arc<Mutex<ConversationWindow>>,
    /// System message placed ahead of the history.
    pub system_prompt: Arc<str>,
}

impl AppState {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            memory: Arc::new(Mutex::new(ConversationWindow::default())),
            system_prompt: Arc::from(DEFAULT_SYSTEM_PROMPT),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl AsRef<str>) -> Self {
        self.system_prompt = Arc::from(prompt.as_ref());
        self
    }

    pub fn with_memory_window(mut self, capacity: usize) -> Self {
        self.memory = Arc::new(Mutex::new(ConversationWindow::new(capacity)));
        self
    }

    /// System prompt, remembered exchanges, then the new question.
    fn context_for(&self, question: &str) -> Vec<ChatMessage> {
        let history = self.memory.lock().to_messages();
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(self.system_prompt.as_ref()));
        messages.extend(history);
        messages.push(ChatMessage::user(question));
        messages
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .route("/chat/reset", post(reset_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /: static welcome message.
async fn root_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "Welcome to the sentichat API" }))
}

/// GET /health: liveness probe.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "sentichat",
    }))
}

/// POST /chat: answer one question.
///
/// Empty questions are rejected before the model is called. The exchange is
/// remembered only when the model answered.
async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ChatError> {
    let question = request.question.trim();
    if question.is_empty() {
        return Err(ChatError::empty_question());
    }

    let messages = state.context_for(question);
    tracing::debug!(
        model = state.model.model(),
        context_messages = messages.len(),
        "answering question"
    );

    let answer = state.model.complete(&messages).await.map_err(|e| {
        tracing::warn!(provider = state.model.provider(), "model call failed: {}", e);
        e
    })?;

    state.memory.lock().push(question, answer.clone());
    Ok(Json(ChatResponse { response: answer }))
}

/// POST /chat/reset: forget the remembered exchanges.
async fn reset_handler(State(state): State<AppState>) -> impl IntoResponse {
    state.memory.lock().clear();
    tracing::info!("conversation window cleared");
    (StatusCode::OK, Json(serde_json::json!({ "status": "cleared" })))
}
