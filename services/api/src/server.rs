use crate::cli::ServeArgs;
use crate::infra::{assistant_state, AppState};
use crate::routes::with_grant_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use grant_assist::config::AppConfig;
use grant_assist::error::AppError;
use grant_assist::telemetry;
use grant_assist::workflows::applications::EvaluationEngine;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let assistant = Arc::new(assistant_state(&config, Utc::now()).await?);
    let advisors = assistant.advisors.clone();
    let engine = Arc::new(EvaluationEngine::new(advisors.clone()));

    let app = with_grant_routes(assistant, engine, advisors)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        model = config.assistant.model_configured(),
        "grant assistant ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
