use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::GrantData;

pub const SNAPSHOT_SCHEMA: &str = "dcnr-grant-snapshot/v1";

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot {} could not be accessed: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot {} is not valid JSON: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("snapshot {} uses schema '{found}', expected '{}'", .path.display(), SNAPSHOT_SCHEMA)]
    Schema { path: PathBuf, found: String },
}

/// JSON file holding the last scraped `GrantData`.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when no snapshot has been written yet.
    pub fn load(&self) -> Result<Option<GrantData>, SnapshotError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(self.io_error(source)),
        };

        let data: GrantData = serde_json::from_slice(&raw).map_err(|source| SnapshotError::Json {
            path: self.path.clone(),
            source,
        })?;
        if data.schema != SNAPSHOT_SCHEMA {
            return Err(SnapshotError::Schema {
                path: self.path.clone(),
                found: data.schema,
            });
        }

        debug!(path = %self.path.display(), last_updated = %data.last_updated, "loaded grant snapshot");
        Ok(Some(data))
    }

    /// Writes to a sibling temp file first so readers never see a half-written snapshot.
    pub fn save(&self, data: &GrantData) -> Result<(), SnapshotError> {
        let encoded = serde_json::to_vec_pretty(data).map_err(|source| SnapshotError::Json {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let mut tmp_path = self.path.clone().into_os_string();
        tmp_path.push(".tmp");
        let tmp_path = PathBuf::from(tmp_path);

        let mut file = fs::File::create(&tmp_path).map_err(|source| self.io_error(source))?;
        file.write_all(&encoded)
            .and_then(|_| file.sync_all())
            .map_err(|source| self.io_error(source))?;
        fs::rename(&tmp_path, &self.path).map_err(|source| self.io_error(source))?;

        debug!(path = %self.path.display(), "saved grant snapshot");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> SnapshotError {
        SnapshotError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::grants::GrantListing;
    use chrono::{TimeZone, Utc};

    fn sample() -> GrantData {
        let mut data = GrantData::new(Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap());
        data.general_info = "Applications accepted through April 2nd.\n".to_string();
        data.grants.push(GrantListing {
            title: "Community Recreation".to_string(),
            description: "Parks and trails.".to_string(),
            eligibility: "Municipalities".to_string(),
            deadline: "April 2nd".to_string(),
        });
        data
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = SnapshotStore::new(dir.path().join("grant_data.json"));
        assert!(store.load().expect("load succeeds").is_none());
    }

    #[test]
    fn saved_snapshot_loads_back() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = SnapshotStore::new(dir.path().join("nested").join("grant_data.json"));

        store.save(&sample()).expect("save succeeds");
        let loaded = store.load().expect("load succeeds").expect("snapshot present");

        assert_eq!(loaded, sample());
    }

    #[test]
    fn snapshot_timestamp_is_iso_8601() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = SnapshotStore::new(dir.path().join("grant_data.json"));
        store.save(&sample()).expect("save succeeds");

        let raw = fs::read_to_string(store.path()).expect("snapshot readable");
        let json: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(json["schema"], SNAPSHOT_SCHEMA);
        assert_eq!(json["last_updated"], "2025-01-15T08:00:00Z");
    }

    #[test]
    fn rejects_foreign_schema() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("grant_data.json");
        fs::write(
            &path,
            r#"{"schema":"other/v9","last_updated":"2025-01-15T08:00:00Z"}"#,
        )
        .expect("write fixture");

        let err = SnapshotStore::new(&path).load().expect_err("schema mismatch");
        assert!(matches!(err, SnapshotError::Schema { found, .. } if found == "other/v9"));
    }

    #[test]
    fn rejects_corrupt_json() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("grant_data.json");
        fs::write(&path, b"\x80\x04pickle").expect("write fixture");

        let err = SnapshotStore::new(&path).load().expect_err("corrupt snapshot");
        assert!(matches!(err, SnapshotError::Json { .. }));
    }
}
