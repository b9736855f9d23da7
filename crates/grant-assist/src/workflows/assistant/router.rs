use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::{AssistantSession, GrantAssistant, SAMPLE_QUESTIONS};
use crate::workflows::advisors::AdvisorDirectory;
use crate::workflows::content::{extract_text, ContentBlob};
use crate::workflows::grants::GrantDataService;

/// Everything the chat endpoints share for the lifetime of the server.
pub struct AssistantState {
    pub assistant: GrantAssistant,
    pub session: AssistantSession,
    pub grants: Arc<GrantDataService>,
    pub advisors: Arc<AdvisorDirectory>,
    /// Body limit for document uploads; other routes keep axum's default.
    pub max_upload_bytes: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AskRequest {
    question: String,
}

pub fn assistant_router(state: Arc<AssistantState>) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.max_upload_bytes);
    Router::new()
        .route("/api/v1/assistant/ask", post(ask_handler))
        .route(
            "/api/v1/assistant/messages",
            get(messages_handler).delete(clear_messages_handler),
        )
        .route("/api/v1/assistant/samples", get(samples_handler))
        .route("/api/v1/documents", delete(clear_documents_handler))
        .route(
            "/api/v1/documents/:name",
            post(upload_handler).layer(upload_limit),
        )
        .route("/api/v1/grants/status", get(status_handler))
        .route("/api/v1/grants/refresh", post(refresh_handler))
        .with_state(state)
}

pub(crate) async fn ask_handler(
    State(state): State<Arc<AssistantState>>,
    axum::Json(request): axum::Json<AskRequest>,
) -> Response {
    let question = request.question.trim();
    if question.is_empty() {
        let payload = json!({ "error": "question must not be empty" });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    }

    let reply = state.assistant.answer(&state.session, question).await;
    (StatusCode::OK, axum::Json(reply)).into_response()
}

pub(crate) async fn messages_handler(State(state): State<Arc<AssistantState>>) -> Response {
    (StatusCode::OK, axum::Json(state.session.messages())).into_response()
}

pub(crate) async fn clear_messages_handler(State(state): State<Arc<AssistantState>>) -> Response {
    state.session.clear_messages();
    StatusCode::NO_CONTENT.into_response()
}

pub(crate) async fn samples_handler() -> Response {
    (StatusCode::OK, axum::Json(SAMPLE_QUESTIONS)).into_response()
}

pub(crate) async fn upload_handler(
    State(state): State<Arc<AssistantState>>,
    Path(name): Path<String>,
    body: Bytes,
) -> Response {
    let text = extract_text(&name, &body);
    if text.trim().is_empty() {
        let payload = json!({
            "document": name,
            "error": "no text could be extracted",
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    }

    let blob = ContentBlob::document(&name, text);
    let payload = json!({
        "source_name": blob.source_name,
        "characters": blob.text.chars().count(),
    });
    state.session.content().upsert_document(blob);
    info!(document = %name, bytes = body.len(), "document ingested");
    (StatusCode::CREATED, axum::Json(payload)).into_response()
}

pub(crate) async fn clear_documents_handler(State(state): State<Arc<AssistantState>>) -> Response {
    state.session.content().clear_documents();
    StatusCode::NO_CONTENT.into_response()
}

pub(crate) async fn status_handler(State(state): State<Arc<AssistantState>>) -> Response {
    let now = Utc::now();
    match state.grants.status(now) {
        Some(status) => (StatusCode::OK, axum::Json(status)).into_response(),
        None => {
            let payload = json!({ "error": "grant data not loaded" });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn refresh_handler(State(state): State<Arc<AssistantState>>) -> Response {
    let now = Utc::now();
    let data = state.grants.refresh(now).await;
    state
        .session
        .content()
        .replace_reference(&data, &state.advisors);

    match state.grants.status(now) {
        Some(status) => (StatusCode::OK, axum::Json(status)).into_response(),
        None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
