//! Program information scraped from the DCNR website, cached as a JSON snapshot.

mod site;
mod service;
mod snapshot;
mod transcript;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use site::{parse_grant_page, DcnrSiteScraper, GrantSource, ScrapeError};
pub use service::{GrantDataError, GrantDataOrigin, GrantDataService, GrantDataStatus};
pub use snapshot::{SnapshotError, SnapshotStore, SNAPSHOT_SCHEMA};
pub use transcript::PLANNING_SESSION_TRANSCRIPT;

/// One grant program section found on the program page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantListing {
    pub title: String,
    pub description: String,
    pub eligibility: String,
    pub deadline: String,
}

/// Everything known about the program at `last_updated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantData {
    pub schema: String,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub general_info: String,
    #[serde(default)]
    pub grants: Vec<GrantListing>,
    #[serde(default)]
    pub planning_session_transcript: String,
}

impl GrantData {
    pub fn new(last_updated: DateTime<Utc>) -> Self {
        Self {
            schema: SNAPSHOT_SCHEMA.to_string(),
            last_updated,
            general_info: String::new(),
            grants: Vec::new(),
            planning_session_transcript: PLANNING_SESSION_TRANSCRIPT.to_string(),
        }
    }

    /// Static content used when the website cannot be scraped.
    pub fn fallback(now: DateTime<Utc>) -> Self {
        Self::new(now)
    }

    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.last_updated).num_days()
    }

    /// Stale once strictly older than `stale_after_days`.
    pub fn is_stale(&self, now: DateTime<Utc>, stale_after_days: i64) -> bool {
        now - self.last_updated > chrono::Duration::days(stale_after_days)
    }
}
