//! Browser-facing chat UI.
//!
//! Keeps one [`ChatSession`](crate::session::ChatSession) per browser,
//! identified by the `sentichat_session` cookie, and renders its history
//! as HTML. Every submission runs the turn pipeline against a
//! [`ChatEndpoint`].

pub mod routes;

use std::sync::Arc;

use axum::http::{header, HeaderMap};
use serde::Serialize;
use tera::{Context, Tera};

use crate::client::ChatEndpoint;
use crate::sentiment::SentimentResult;
use crate::session::{SessionStore, Turn, TurnStatus};
use crate::utilities::errors::ChatError;

pub use routes::ui_router;

/// Cookie carrying the session id.
pub const SESSION_COOKIE: &str = "sentichat_session";

const CHAT_TEMPLATE: &str = "chat.html";

/// Shared state for the UI router.
#[derive(Clone)]
pub struct UiState {
    pub sessions: Arc<SessionStore>,
    pub endpoint: Arc<dyn ChatEndpoint>,
    pub templates: Arc<Tera>,
    pub title: Arc<str>,
}

impl UiState {
    pub fn new(
        sessions: Arc<SessionStore>,
        endpoint: Arc<dyn ChatEndpoint>,
        title: impl AsRef<str>,
    ) -> Result<Self, ChatError> {
        Ok(Self {
            sessions,
            endpoint,
            templates: Arc::new(load_templates()?),
            title: Arc::from(title.as_ref()),
        })
    }

    /// Render the chat page for `turns`, with an optional notice line.
    pub fn render(&self, turns: &[Turn], notice: Option<&str>) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("title", self.title.as_ref());
        context.insert("turns", &turns.iter().map(TurnView::from).collect::<Vec<_>>());
        context.insert("notice", &notice);
        self.templates.render(CHAT_TEMPLATE, &context)
    }
}

/// Compile the bundled templates. `.html` templates are auto-escaped.
pub fn load_templates() -> Result<Tera, ChatError> {
    let mut tera = Tera::default();
    tera.add_raw_template(CHAT_TEMPLATE, include_str!("templates/chat.html"))
        .map_err(|e| ChatError::Configuration(format!("invalid chat template: {}", e)))?;
    Ok(tera)
}

/// Session id from the request's `Cookie` headers, if present.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value binding the browser to session `id`.
pub fn session_cookie(id: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}

/// `Set-Cookie` value that drops the session cookie.
pub fn expired_session_cookie() -> String {
    format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", SESSION_COOKIE)
}

/// Sentiment as shown next to a message.
#[derive(Debug, Clone, Serialize)]
pub struct SentimentView {
    pub bucket: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub compound: String,
}

impl From<&SentimentResult> for SentimentView {
    fn from(result: &SentimentResult) -> Self {
        Self {
            bucket: result.bucket.as_str(),
            label: result.bucket.label(),
            color: result.bucket.color(),
            compound: format!("{:.2}", result.compound),
        }
    }
}

/// One turn, flattened for the template.
#[derive(Debug, Clone, Serialize)]
pub struct TurnView {
    pub user_text: String,
    pub bot_text: Option<String>,
    pub status: &'static str,
    pub user_sentiment: Option<SentimentView>,
    pub bot_sentiment: Option<SentimentView>,
}

impl From<&Turn> for TurnView {
    fn from(turn: &Turn) -> Self {
        Self {
            user_text: turn.user_text.clone(),
            bot_text: turn.bot_text.clone(),
            status: match turn.status {
                TurnStatus::Pending => "pending",
                TurnStatus::Complete => "complete",
                TurnStatus::Failed => "failed",
            },
            user_sentiment: turn.user_sentiment.as_ref().map(SentimentView::from),
            bot_sentiment: turn.bot_sentiment.as_ref().map(SentimentView::from),
        }
    }
}
