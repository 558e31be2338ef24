//! Camera snapshot gallery state.

#[cfg(test)]
#[path = "gallery_test.rs"]
mod gallery_test;

use crate::net::types::{Snapshot, SnapshotCategory};

#[derive(Clone, Debug, Default)]
pub struct GalleryState {
    pub snapshots: Vec<Snapshot>,
    pub loaded: bool,
    pub error: Option<String>,
    /// Filename shown in the zoom modal.
    pub zoomed: Option<String>,
}

impl GalleryState {
    pub fn apply_fetch(&mut self, result: Result<Vec<Snapshot>, String>) {
        match result {
            Ok(snapshots) => {
                self.snapshots = snapshots;
                self.error = None;
            }
            Err(e) => {
                self.snapshots.clear();
                self.error = Some(e);
            }
        }
        self.loaded = true;
    }

    /// Snapshots in `category`, preserving backend order.
    #[must_use]
    pub fn in_category(&self, category: SnapshotCategory) -> Vec<Snapshot> {
        self.snapshots.iter().filter(|s| s.category == category).cloned().collect()
    }

    pub fn remove(&mut self, filename: &str) {
        self.snapshots.retain(|s| s.filename != filename);
        if self.zoomed.as_deref() == Some(filename) {
            self.zoomed = None;
        }
    }
}

/// Empty-state line for a gallery column.
#[must_use]
pub fn empty_message(category: SnapshotCategory) -> &'static str {
    match category {
        SnapshotCategory::During => "📷 No \"During Feeding\" images captured yet",
        SnapshotCategory::After | SnapshotCategory::Unknown => "📷 No \"After Feeding\" images captured yet",
    }
}
