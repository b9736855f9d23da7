use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use grant_assist::config::AppConfig;
use grant_assist::error::AppError;
use grant_assist::workflows::advisors::AdvisorDirectory;
use grant_assist::workflows::assistant::{AssistantSession, AssistantState, GrantAssistant};
use grant_assist::workflows::content::ContentStore;
use grant_assist::workflows::grants::{
    DcnrSiteScraper, GrantDataService, GrantSource, SnapshotStore,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn load_advisors(config: &AppConfig) -> Result<AdvisorDirectory, AppError> {
    match &config.grants.advisor_table {
        Some(path) => {
            let directory = AdvisorDirectory::from_path(path)?;
            info!(path = %path.display(), regions = directory.regions().len(), "loaded advisor table");
            Ok(directory)
        }
        None => Ok(AdvisorDirectory::embedded()),
    }
}

pub(crate) fn grant_service(config: &AppConfig) -> Result<GrantDataService, AppError> {
    let scraper = DcnrSiteScraper::new(
        config.grants.source_url.clone(),
        Duration::from_secs(config.grants.request_timeout_secs),
    )
    .map_err(|err| AppError::Grants(err.into()))?;
    let source: Arc<dyn GrantSource> = Arc::new(scraper);

    Ok(GrantDataService::new(
        source,
        SnapshotStore::new(config.grants.snapshot_path.clone()),
        config.grants.stale_after_days,
    ))
}

/// Loads grant data, seeds the session content, and wires the assistant.
pub(crate) async fn assistant_state(
    config: &AppConfig,
    now: DateTime<Utc>,
) -> Result<AssistantState, AppError> {
    let advisors = Arc::new(load_advisors(config)?);
    let grants = Arc::new(grant_service(config)?);
    let data = grants.load(now).await;

    let content = ContentStore::new();
    content.replace_reference(&data, &advisors);

    let assistant = GrantAssistant::from_config(&config.assistant)?;
    if !assistant.model_configured() {
        info!("no OPENAI_API_KEY configured; answers fall back to search results");
    }

    Ok(AssistantState {
        assistant,
        session: AssistantSession::new(content),
        grants,
        advisors,
        max_upload_bytes: config.server.max_upload_bytes,
    })
}

pub(crate) fn parse_percentage(raw: &str) -> Result<u32, String> {
    let trimmed = raw.trim().trim_end_matches('%');
    trimmed
        .parse::<u32>()
        .map_err(|err| format!("failed to parse '{raw}' as a percentage ({err})"))
}
