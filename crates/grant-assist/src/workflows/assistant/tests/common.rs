use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::config::DEFAULT_MAX_UPLOAD_BYTES;
use crate::workflows::advisors::AdvisorDirectory;
use crate::workflows::assistant::{
    AssistantSession, AssistantState, CompletionClient, CompletionError, CompletionRequest,
    GrantAssistant,
};
use crate::workflows::content::{ContentBlob, ContentStore, SearchOptions};
use crate::workflows::grants::{
    GrantData, GrantDataService, GrantSource, ScrapeError, SnapshotStore,
};

/// Completion double that records prompts and replies from a script.
#[derive(Default)]
pub(super) struct ScriptedClient {
    pub(super) reply: Option<String>,
    pub(super) requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedClient {
    pub(super) fn answering(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            ..Self::default()
        }
    }

    pub(super) fn failing() -> Self {
        Self::default()
    }

    pub(super) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().expect("request log poisoned").clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.requests
            .lock()
            .expect("request log poisoned")
            .push(request.clone());
        self.reply.clone().ok_or(CompletionError::EmptyAnswer)
    }
}

pub(super) struct OfflineSource;

#[async_trait]
impl GrantSource for OfflineSource {
    async fn fetch(&self, _now: DateTime<Utc>) -> Result<GrantData, ScrapeError> {
        Err(ScrapeError::Status {
            url: "https://dcnr.test".to_string(),
            status: 503,
        })
    }
}

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

pub(super) fn session_with(blobs: Vec<ContentBlob>) -> AssistantSession {
    let content = ContentStore::new();
    content.replace_documents(blobs);
    AssistantSession::new(content)
}

pub(super) fn deadline_session() -> AssistantSession {
    session_with(vec![
        ContentBlob::document("guide.pdf", "The deadline is April 2nd for all applicants."),
        ContentBlob::document("budget.txt", "Matching funds must be documented."),
    ])
}

pub(super) fn assistant(client: Option<Arc<ScriptedClient>>) -> GrantAssistant {
    GrantAssistant::new(
        client.map(|client| client as Arc<dyn CompletionClient>),
        SearchOptions::default(),
    )
}

pub(super) fn state(
    client: Option<Arc<ScriptedClient>>,
    dir: &tempfile::TempDir,
) -> Arc<AssistantState> {
    state_with_upload_limit(client, dir, DEFAULT_MAX_UPLOAD_BYTES)
}

pub(super) fn state_with_upload_limit(
    client: Option<Arc<ScriptedClient>>,
    dir: &tempfile::TempDir,
    max_upload_bytes: usize,
) -> Arc<AssistantState> {
    let grants = GrantDataService::new(
        Arc::new(OfflineSource),
        SnapshotStore::new(dir.path().join("grant_data.json")),
        30,
    );
    Arc::new(AssistantState {
        assistant: assistant(client),
        session: deadline_session(),
        grants: Arc::new(grants),
        advisors: Arc::new(AdvisorDirectory::embedded()),
        max_upload_bytes,
    })
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
