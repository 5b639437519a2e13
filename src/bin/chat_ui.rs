//! sentichat browser UI binary.
//!
//! Renders the chat page and forwards each message to the chat endpoint.
//!
//! # Environment Variables
//!
//! - `UI_HOST` / `UI_PORT`: bind address (default: 0.0.0.0:8501)
//! - `CHAT_API_URL`: chat endpoint (default: http://127.0.0.1:8000/chat)
//! - `CHAT_API_TIMEOUT_SECS`, `CHAT_TONE_PREFIX`, `CHAT_NORMALIZE_TEXT`,
//!   `CHAT_UI_TITLE`, `CHAT_SESSION_IDLE_SECS`
//! - `RUST_LOG`: Tracing filter (default: "info,sentichat=debug")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin chat-ui
//! ```

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sentichat::client::HttpChatEndpoint;
use sentichat::config::UiConfig;
use sentichat::session::SessionStore;
use sentichat::ui::{ui_router, UiState};
use sentichat::utilities::logger::{init_tracing, DEFAULT_LOG_FILTER};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing(DEFAULT_LOG_FILTER);

    let config = UiConfig::from_env().context("invalid chat UI configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let endpoint = HttpChatEndpoint::new(config.api_url.clone(), config.api_timeout)?;
    let sessions = Arc::new(
        SessionStore::new(config.session_options()).with_idle_ttl(config.session_idle_ttl),
    );
    // Sweep at a tenth of the TTL, at most once a minute.
    let sweep_every = (config.session_idle_ttl / 10).min(Duration::from_secs(60));
    let _sweeper = sessions.spawn_sweeper(sweep_every);
    let state = UiState::new(sessions, Arc::new(endpoint), &config.title)?;
    let app = ui_router(state);

    let bind_addr = config.bind_addr();
    tracing::info!(
        "sentichat UI starting on {} (endpoint {})",
        bind_addr,
        config.api_url
    );

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
