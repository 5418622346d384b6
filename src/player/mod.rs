pub mod playerctl;

use serde::Serialize;

/// Snapshot of what the active player reports.
///
/// There is no stable track id available from browser players, so two
/// snapshots describe the same track when their titles are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackMetadata {
    pub title: String,
    /// May be empty.
    pub artist: String,
    pub duration_ms: Option<u64>,
}

impl TrackMetadata {
    pub fn duration_secs(&self) -> Option<f64> {
        self.duration_ms.map(|ms| ms as f64 / 1000.0)
    }

    pub fn artist(&self) -> Option<&str> {
        Some(self.artist.trim()).filter(|a| !a.is_empty())
    }

    pub fn same_track(&self, title: &str) -> bool {
        self.title == title
    }
}

/// Live view of whichever supported player is active.
///
/// Both calls return `None` when no supported player is running.
pub trait PlayerSource {
    async fn metadata(&self) -> Option<TrackMetadata>;
    async fn position_ms(&self) -> Option<u64>;
}
