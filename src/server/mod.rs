//! HTTP server for the chat endpoint.
//!
//! Answers questions with a hosted model, threading a short rolling memory
//! of recent exchanges into each request.
//!
//! # Endpoints
//!
//! - `GET  /`          : Welcome message
//! - `GET  /health`    : Liveness probe
//! - `POST /chat`      : Ask a question
//! - `POST /chat/reset`: Forget remembered exchanges

pub mod routes;

pub use routes::{app_router, AppState, ChatRequest, ChatResponse};
