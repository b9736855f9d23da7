use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use grant_assist::workflows::advisors::{advisor_router, AdvisorDirectory};
use grant_assist::workflows::applications::{application_router, EvaluationEngine};
use grant_assist::workflows::assistant::{assistant_router, AssistantState};
use serde_json::json;
use std::sync::Arc;

/// Composes every workflow router with the operational endpoints.
pub(crate) fn with_grant_routes(
    assistant: Arc<AssistantState>,
    engine: Arc<EvaluationEngine>,
    advisors: Arc<AdvisorDirectory>,
) -> axum::Router {
    application_router(engine)
        .merge(advisor_router(advisors))
        .merge(assistant_router(assistant))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
