//! sentichat chat endpoint binary.
//!
//! Serves `POST /chat` backed by an OpenAI-compatible model provider.
//!
//! # Environment Variables
//!
//! - `HOST` / `PORT`: bind address (default: 0.0.0.0:8000)
//! - `GROQ_API_KEY`: provider key, or a secret file at `CHAT_API_KEY_FILE`
//! - `CHAT_MODEL`, `CHAT_MODEL_BASE_URL`, `CHAT_SYSTEM_PROMPT`,
//!   `CHAT_MEMORY_WINDOW`, `CHAT_MODEL_TEMPERATURE`, `CHAT_MODEL_MAX_TOKENS`,
//!   `CHAT_MODEL_TIMEOUT_SECS`
//! - `RUST_LOG`: Tracing filter (default: "info,sentichat=debug")
//!
//! # Usage
//!
//! ```bash
//! GROQ_API_KEY=... cargo run --bin server
//! ```

use std::sync::Arc;

use anyhow::Context;
use sentichat::config::EndpointConfig;
use sentichat::llms::providers::openai::OpenAICompletion;
use sentichat::server::{app_router, AppState};
use sentichat::utilities::logger::{init_tracing, DEFAULT_LOG_FILTER};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing(DEFAULT_LOG_FILTER);

    let config = EndpointConfig::from_env().context("invalid chat endpoint configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut model = OpenAICompletion::new(
        config.model.clone(),
        config.api_key.clone(),
        config.model_base_url.clone(),
        config.model_timeout,
    )?;
    if let Some(temperature) = config.temperature {
        model = model.with_temperature(temperature);
    }
    if let Some(max_tokens) = config.max_tokens {
        model = model.with_max_tokens(max_tokens);
    }

    let state = AppState::new(Arc::new(model))
        .with_system_prompt(&config.system_prompt)
        .with_memory_window(config.memory_window);
    let app = app_router(state);

    let bind_addr = config.bind_addr();
    tracing::info!("sentichat endpoint starting on {} (model {})", bind_addr, config.model);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /          : welcome");
    tracing::info!("  GET  /health    : liveness probe");
    tracing::info!("  POST /chat      : ask a question");
    tracing::info!("  POST /chat/reset: clear conversation memory");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
