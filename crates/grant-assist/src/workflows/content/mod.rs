//! Text blobs searched when answering questions, plus ingestion of uploaded files.

mod ingest;
mod search;

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::workflows::advisors::AdvisorDirectory;
use crate::workflows::grants::GrantData;

pub use ingest::{decode_text, extract_text, is_pdf, IngestError};
pub use search::{search, SearchHit, SearchOptions, SnippetAnchor};

pub const WEBSITE_SOURCE: &str = "PA DCNR Website";
pub const PLANNING_SESSION_SOURCE: &str = "DCNR Planning Session";
pub const ADVISOR_SOURCE: &str = "DCNR Regional Advisors";

/// A named piece of searchable text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlob {
    pub source_name: String,
    pub text: String,
}

impl ContentBlob {
    pub fn new(source_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            text: text.into(),
        }
    }

    pub fn document(file_name: &str, text: impl Into<String>) -> Self {
        Self::new(format!("Document: {file_name}"), text)
    }
}

/// Uploaded documents and reference content for one session.
///
/// Each group is swapped wholesale so readers never observe a partial refresh.
#[derive(Debug, Default)]
pub struct ContentStore {
    documents: RwLock<Arc<Vec<ContentBlob>>>,
    reference: RwLock<Arc<Vec<ContentBlob>>>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_documents(&self, documents: Vec<ContentBlob>) {
        let documents = documents
            .into_iter()
            .filter(|blob| !blob.text.is_empty())
            .collect();
        swap(&self.documents, documents);
    }

    /// Adds or replaces a single document, keeping upload order.
    /// The write guard is held across the whole read-modify-write.
    pub fn upsert_document(&self, blob: ContentBlob) {
        let mut guard = match self.documents.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut documents: Vec<ContentBlob> = guard.as_ref().clone();
        documents.retain(|existing| existing.source_name != blob.source_name);
        if !blob.text.is_empty() {
            documents.push(blob);
        }
        *guard = Arc::new(documents);
    }

    pub fn clear_documents(&self) {
        swap(&self.documents, Vec::new());
    }

    pub fn replace_reference(&self, grant_data: &GrantData, advisors: &AdvisorDirectory) {
        let mut reference = Vec::new();
        if !grant_data.general_info.is_empty() {
            reference.push(ContentBlob::new(WEBSITE_SOURCE, grant_data.general_info.clone()));
        }
        if !grant_data.planning_session_transcript.is_empty() {
            reference.push(ContentBlob::new(
                PLANNING_SESSION_SOURCE,
                grant_data.planning_session_transcript.clone(),
            ));
        }
        reference.push(ContentBlob::new(ADVISOR_SOURCE, advisors.render_text()));
        swap(&self.reference, reference);
    }

    pub fn documents(&self) -> Arc<Vec<ContentBlob>> {
        read(&self.documents)
    }

    pub fn reference(&self) -> Arc<Vec<ContentBlob>> {
        read(&self.reference)
    }

    /// Documents first, then reference content.
    pub fn blobs(&self) -> Vec<ContentBlob> {
        let documents = self.documents();
        let reference = self.reference();
        documents.iter().chain(reference.iter()).cloned().collect()
    }
}

fn swap(slot: &RwLock<Arc<Vec<ContentBlob>>>, next: Vec<ContentBlob>) {
    let next = Arc::new(next);
    match slot.write() {
        Ok(mut guard) => *guard = next,
        Err(poisoned) => *poisoned.into_inner() = next,
    }
}

fn read(slot: &RwLock<Arc<Vec<ContentBlob>>>) -> Arc<Vec<ContentBlob>> {
    match slot.read() {
        Ok(guard) => Arc::clone(&guard),
        Err(poisoned) => Arc::clone(&poisoned.into_inner()),
    }
}
