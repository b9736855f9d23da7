use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tracing::debug;

use super::domain::{ApplicationFacts, EligibilityRequest};
use super::eligibility::{check_eligibility, ELIGIBILITY_CRITERIA};
use super::evaluation::EvaluationEngine;

/// Router exposing the eligibility checker and the application evaluator.
pub fn application_router(engine: Arc<EvaluationEngine>) -> Router {
    Router::new()
        .route("/api/v1/grants/criteria", get(criteria_handler))
        .route("/api/v1/grants/eligibility", post(eligibility_handler))
        .route("/api/v1/grants/evaluation", post(evaluation_handler))
        .with_state(engine)
}

pub(crate) async fn criteria_handler() -> Response {
    (StatusCode::OK, axum::Json(ELIGIBILITY_CRITERIA.to_vec())).into_response()
}

pub(crate) async fn eligibility_handler(
    axum::Json(request): axum::Json<EligibilityRequest>,
) -> Response {
    let report = check_eligibility(&request);
    debug!(
        entity_type = %request.entity_type,
        eligible = report.eligible_grants.len(),
        "eligibility checked"
    );
    (StatusCode::OK, axum::Json(report)).into_response()
}

pub(crate) async fn evaluation_handler(
    State(engine): State<Arc<EvaluationEngine>>,
    axum::Json(facts): axum::Json<ApplicationFacts>,
) -> Response {
    let result = engine.evaluate(&facts);
    debug!(score = result.score, band = %result.approval_chance, "application evaluated");
    (StatusCode::OK, axum::Json(result)).into_response()
}
