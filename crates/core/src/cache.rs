//! In-memory media cache.
//!
//! Two independent slots: the last known picture page state and the last
//! fetched raw document list (the videos and documents categories are views
//! computed over the one documents slot). Slots start cold, are replaced
//! wholesale by a successful fetch, and are cleared only by explicit
//! invalidation; there is no TTL or per-item expiry.

use tokio::sync::RwLock;

use crate::model::{DocumentRecord, PictureState};

/// Process-lifetime media cache with slot-level invalidation.
///
/// Reads return a cloned snapshot and writes replace a slot wholesale, so a
/// reader never observes a partially updated slot. A refresh still in flight
/// when a slot is invalidated will repopulate it on completion (last writer
/// wins).
///
/// Construct once at startup and share via `Arc`; each instance has fully
/// independent state.
#[derive(Debug, Default)]
pub struct MediaCache {
    pictures: RwLock<Option<PictureState>>,
    documents: RwLock<Option<Vec<DocumentRecord>>>,
}

impl MediaCache {
    /// Create an empty (cold) cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the pictures slot, or `None` when cold.
    pub async fn pictures(&self) -> Option<PictureState> {
        self.pictures.read().await.clone()
    }

    /// Replace the pictures slot wholesale (items and cursor together).
    pub async fn replace_pictures(&self, state: PictureState) {
        *self.pictures.write().await = Some(state);
    }

    /// Snapshot of the documents slot, or `None` when cold.
    pub async fn documents(&self) -> Option<Vec<DocumentRecord>> {
        self.documents.read().await.clone()
    }

    /// Replace the documents slot wholesale.
    pub async fn replace_documents(&self, records: Vec<DocumentRecord>) {
        *self.documents.write().await = Some(records);
    }

    /// Clear both slots unconditionally.
    pub async fn invalidate_all(&self) {
        *self.pictures.write().await = None;
        *self.documents.write().await = None;
        tracing::debug!("media cache invalidated");
    }

    /// Clear only the pictures slot, rewinding pagination.
    pub async fn reset_pictures(&self) {
        *self.pictures.write().await = None;
        tracing::debug!("picture pagination reset");
    }
}
