use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::advisors::AdvisorDirectory;
use crate::workflows::applications::domain::ApplicationFacts;
use crate::workflows::applications::evaluation::EvaluationEngine;

pub(super) fn strong_facts() -> ApplicationFacts {
    ApplicationFacts {
        entity_type: "Municipality".to_string(),
        footfall: 12_500,
        population_served: 4_000,
        project_type: "Park Rehabilitation".to_string(),
        has_detailed_scope: true,
        has_consultant_quotes: true,
        has_site_control: true,
        has_matching_funds: true,
        match_percentage: 100,
        has_public_support: true,
        has_partnerships: true,
        addresses_equity: true,
        rehabilitation_project: true,
        county: Some("Lawrence".to_string()),
    }
}

pub(super) fn bare_facts() -> ApplicationFacts {
    ApplicationFacts {
        entity_type: "Other".to_string(),
        ..ApplicationFacts::default()
    }
}

pub(super) fn evaluation_engine() -> EvaluationEngine {
    EvaluationEngine::new(Arc::new(AdvisorDirectory::embedded()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
