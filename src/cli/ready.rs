//! Sync-ready command: recompute the aggregate Ready condition.

use super::document::StatusDocument;
use crate::config::Config;
use crate::core::{ConditionStatus, Marker};

/// The sync-ready command implementation.
pub struct SyncReadyCommand {
    marker: Marker,
}

impl SyncReadyCommand {
    pub fn new(config: &Config) -> Self {
        Self {
            marker: config.marker(),
        }
    }

    /// Recompute Ready on `doc` and return its new status.
    pub fn run(&self, doc: &mut StatusDocument) -> ConditionStatus {
        let status = self.marker.sync_ready(doc);
        tracing::info!(status = %status, "synced Ready");
        status
    }
}
