use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::AdvisorDirectory;

pub fn advisor_router(directory: Arc<AdvisorDirectory>) -> Router {
    Router::new()
        .route("/api/v1/advisors", get(list_handler))
        .route("/api/v1/advisors/:county", get(lookup_handler))
        .with_state(directory)
}

pub(crate) async fn list_handler(State(directory): State<Arc<AdvisorDirectory>>) -> Response {
    (StatusCode::OK, axum::Json(directory.regions().to_vec())).into_response()
}

pub(crate) async fn lookup_handler(
    State(directory): State<Arc<AdvisorDirectory>>,
    Path(county): Path<String>,
) -> Response {
    match directory.lookup(&county) {
        Some(record) => (StatusCode::OK, axum::Json(record.clone())).into_response(),
        None => {
            let payload = json!({
                "county": county,
                "error": "county not found in any DCNR region",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}
