//! Axum route handlers for the chat UI.
//!
//! # Routes
//!
//! - `GET  /`           : Render the session's history
//! - `POST /send`       : Submit form field `message`, then redirect to `/`
//! - `POST /reset`      : End the session
//! - `GET  /api/history`: Session turns as JSON
//! - `GET  /health`     : Liveness probe

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::{expired_session_cookie, session_cookie, session_id_from_headers, UiState};
use crate::session::Turn;
use crate::utilities::errors::ChatError;

/// Body of `POST /send`.
#[derive(Debug, Deserialize)]
pub struct SendForm {
    #[serde(default)]
    pub message: String,
}

/// Build the UI router.
pub fn ui_router(state: UiState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/send", post(send_handler))
        .route("/reset", post(reset_handler))
        .route("/api/history", get(history_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn page(state: &UiState, status: StatusCode, turns: &[Turn], notice: Option<&str>) -> Response {
    match state.render(turns, notice) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("failed to render chat page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page").into_response()
        }
    }
}

/// Attach the session cookie when the session was just created.
fn with_cookie(response: Response, id: &str, created: bool) -> Response {
    if created {
        ([(header::SET_COOKIE, session_cookie(id))], response).into_response()
    } else {
        response
    }
}

/// GET /: render the history.
///
/// Viewing never starts a session; a browser without a known cookie sees an
/// empty history until its first `/send`.
async fn index_handler(State(state): State<UiState>, headers: HeaderMap) -> Response {
    match session_id_from_headers(&headers).and_then(|id| state.sessions.get(&id)) {
        Some(handle) => {
            let session = handle.lock().await;
            page(&state, StatusCode::OK, session.turns(), None)
        }
        None => page(&state, StatusCode::OK, &[], None),
    }
}

/// POST /send: run one turn.
///
/// The session lock is held across the endpoint call, so a browser has at
/// most one turn in flight.
async fn send_handler(
    State(state): State<UiState>,
    headers: HeaderMap,
    Form(form): Form<SendForm>,
) -> Response {
    let cookie = session_id_from_headers(&headers);
    let (id, handle, created) = state.sessions.get_or_create(cookie.as_deref());
    let mut session = handle.lock().await;

    let outcome = session
        .submit(&form.message, state.endpoint.as_ref())
        .await
        .map(|turn| turn.status);

    let response = match outcome {
        Ok(status) => {
            tracing::debug!(session = %id, ?status, "turn finished");
            Redirect::to("/").into_response()
        }
        Err(ChatError::Validation(message)) => {
            page(&state, StatusCode::BAD_REQUEST, session.turns(), Some(&message))
        }
        Err(e) => {
            tracing::error!(session = %id, "turn aborted: {}", e);
            page(&state, e.status_code(), session.turns(), Some(&e.to_string()))
        }
    };
    with_cookie(response, &id, created)
}

/// POST /reset: drop the session and its cookie.
async fn reset_handler(State(state): State<UiState>, headers: HeaderMap) -> Response {
    if let Some(id) = session_id_from_headers(&headers) {
        state.sessions.remove(&id);
    }
    (
        [(header::SET_COOKIE, expired_session_cookie())],
        Redirect::to("/"),
    )
        .into_response()
}

/// GET /api/history: the session's turns, oldest first.
async fn history_handler(State(state): State<UiState>, headers: HeaderMap) -> Response {
    let session = match session_id_from_headers(&headers).and_then(|id| state.sessions.get(&id)) {
        Some(handle) => handle,
        None => {
            return Json(serde_json::json!({ "session_id": null, "turns": [] })).into_response()
        }
    };
    let session = session.lock().await;
    Json(serde_json::json!({
        "session_id": session.id(),
        "turns": session.turns(),
    }))
    .into_response()
}

/// GET /health: liveness probe.
async fn health_handler(State(state): State<UiState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "sentichat-ui",
        "sessions": state.sessions.len(),
    }))
}
