use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::{GrantData, GrantSource, ScrapeError, SnapshotError, SnapshotStore};

/// Where the currently served grant data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantDataOrigin {
    Scraped,
    Snapshot,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrantDataStatus {
    pub last_updated: DateTime<Utc>,
    pub age_days: i64,
    pub stale: bool,
    pub grant_count: usize,
    pub origin: GrantDataOrigin,
}

#[derive(Debug, thiserror::Error)]
pub enum GrantDataError {
    #[error(transparent)]
    Scrape(#[from] ScrapeError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Keeps the served grant data fresh: snapshot first, scrape when stale.
pub struct GrantDataService {
    source: Arc<dyn GrantSource>,
    store: SnapshotStore,
    stale_after_days: i64,
    current: RwLock<Option<(Arc<GrantData>, GrantDataOrigin)>>,
}

impl GrantDataService {
    pub fn new(source: Arc<dyn GrantSource>, store: SnapshotStore, stale_after_days: i64) -> Self {
        Self {
            source,
            store,
            stale_after_days,
            current: RwLock::new(None),
        }
    }

    /// Serves the snapshot when it is fresh enough, otherwise scrapes.
    pub async fn load(&self, now: DateTime<Utc>) -> Arc<GrantData> {
        match self.store.load() {
            Ok(Some(data)) if !data.is_stale(now, self.stale_after_days) => {
                info!(
                    last_updated = %data.last_updated,
                    grants = data.grants.len(),
                    "using cached grant snapshot"
                );
                return self.publish(data, GrantDataOrigin::Snapshot);
            }
            Ok(Some(data)) => {
                info!(last_updated = %data.last_updated, "grant snapshot is stale, refreshing");
            }
            Ok(None) => info!(path = %self.store.path().display(), "no grant snapshot yet"),
            Err(err) => warn!(error = %err, "ignoring unreadable grant snapshot"),
        }

        self.refresh(now).await
    }

    /// Scrapes the program page and persists the result. On failure the static
    /// transcript is served instead and nothing is written.
    pub async fn refresh(&self, now: DateTime<Utc>) -> Arc<GrantData> {
        match self.try_refresh(now).await {
            Ok(data) => data,
            Err(err) => {
                warn!(error = %err, "grant refresh failed, serving static planning content");
                self.publish(GrantData::fallback(now), GrantDataOrigin::Fallback)
            }
        }
    }

    /// Like `refresh`, but reports why a scrape or save failed.
    ///
    /// A scraped page that cannot be saved is still served.
    pub async fn try_refresh(&self, now: DateTime<Utc>) -> Result<Arc<GrantData>, GrantDataError> {
        let data = self.source.fetch(now).await?;
        let saved = self.store.save(&data);
        let published = self.publish(data, GrantDataOrigin::Scraped);
        if let Err(err) = saved {
            warn!(error = %err, "scraped grant data could not be saved");
        }
        info!(grants = published.grants.len(), "grant data refreshed");
        Ok(published)
    }

    pub fn current(&self) -> Option<Arc<GrantData>> {
        self.read_current().map(|(data, _)| data)
    }

    pub fn status(&self, now: DateTime<Utc>) -> Option<GrantDataStatus> {
        self.read_current().map(|(data, origin)| GrantDataStatus {
            last_updated: data.last_updated,
            age_days: data.age_days(now),
            stale: data.is_stale(now, self.stale_after_days),
            grant_count: data.grants.len(),
            origin,
        })
    }

    fn read_current(&self) -> Option<(Arc<GrantData>, GrantDataOrigin)> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn publish(&self, data: GrantData, origin: GrantDataOrigin) -> Arc<GrantData> {
        let data = Arc::new(data);
        let next = Some((Arc::clone(&data), origin));
        match self.current.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct ScriptedSource {
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl GrantSource for ScriptedSource {
        async fn fetch(&self, now: DateTime<Utc>) -> Result<GrantData, ScrapeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ScrapeError::Status {
                    url: "https://example.test".to_string(),
                    status: 503,
                });
            }
            let mut data = GrantData::new(now);
            data.general_info = "Fresh program text\n".to_string();
            Ok(data)
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn service(dir: &tempfile::TempDir, source: Arc<ScriptedSource>) -> GrantDataService {
        GrantDataService::new(
            source,
            SnapshotStore::new(dir.path().join("grant_data.json")),
            30,
        )
    }

    #[tokio::test]
    async fn fresh_snapshot_skips_scraping() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = SnapshotStore::new(dir.path().join("grant_data.json"));
        let mut cached = GrantData::new(now() - Duration::days(10));
        cached.general_info = "Cached text\n".to_string();
        store.save(&cached).expect("seed snapshot");

        let source = Arc::new(ScriptedSource::default());
        let service = service(&dir, source.clone());
        let data = service.load(now()).await;

        assert_eq!(data.general_info, "Cached text\n");
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        let status = service.status(now()).expect("status available");
        assert_eq!(status.origin, GrantDataOrigin::Snapshot);
        assert_eq!(status.age_days, 10);
        assert!(!status.stale);
    }

    #[tokio::test]
    async fn stale_snapshot_is_rescraped_and_saved() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = SnapshotStore::new(dir.path().join("grant_data.json"));
        store
            .save(&GrantData::new(now() - Duration::days(31)))
            .expect("seed snapshot");

        let source = Arc::new(ScriptedSource::default());
        let service = service(&dir, source.clone());
        let data = service.load(now()).await;

        assert_eq!(data.general_info, "Fresh program text\n");
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        let saved = store.load().expect("load").expect("snapshot present");
        assert_eq!(saved.last_updated, now());
    }

    #[tokio::test]
    async fn scrape_failure_serves_fallback_without_saving() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = Arc::new(ScriptedSource {
            fail: true,
            ..ScriptedSource::default()
        });
        let service = service(&dir, source);

        let data = service.load(now()).await;

        assert!(data.general_info.is_empty());
        assert!(!data.planning_session_transcript.is_empty());
        assert_eq!(
            service.status(now()).map(|status| status.origin),
            Some(GrantDataOrigin::Fallback)
        );
        assert!(!dir.path().join("grant_data.json").exists());
    }

    #[tokio::test]
    async fn try_refresh_reports_scrape_errors() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = Arc::new(ScriptedSource {
            fail: true,
            ..ScriptedSource::default()
        });
        let service = service(&dir, source);

        let err = service.try_refresh(now()).await.expect_err("scrape fails");
        assert!(matches!(err, GrantDataError::Scrape(ScrapeError::Status { status: 503, .. })));
        assert!(service.current().is_none());
    }

    #[tokio::test]
    async fn unreadable_snapshot_triggers_refresh() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join("grant_data.json"), b"not json").expect("fixture");

        let source = Arc::new(ScriptedSource::default());
        let service = service(&dir, source.clone());
        let data = service.load(now()).await;

        assert_eq!(data.general_info, "Fresh program text\n");
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }
}
