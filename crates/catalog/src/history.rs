//! Bounded "recently viewed" list.
//!
//! Entries are kept most-recent first. Re-viewing a scene moves it back to
//! the front instead of adding a second row, and once `capacity` is reached
//! the oldest row falls off the back.

use crate::error::ValidationError;
use crate::types::{SceneId, ViewHistoryEntry};
use serde::Serialize;

/// Default number of rows kept by the UI's recently-viewed strip.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewHistory {
    capacity: usize,
    entries: Vec<ViewHistoryEntry>,
}

impl ViewHistory {
    /// Create an empty history retaining at most `capacity` rows.
    pub fn new(capacity: usize) -> Result<Self, ValidationError> {
        if capacity == 0 {
            return Err(ValidationError::new(
                "historyCapacity",
                "capacity must be at least 1",
            ));
        }
        Ok(Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        })
    }

    /// Rebuild a history from unordered API rows.
    ///
    /// Rows are replayed oldest first so that the newest view of each scene
    /// wins and the capacity bound keeps the most recent ones.
    pub fn from_entries(
        capacity: usize,
        rows: impl IntoIterator<Item = ViewHistoryEntry>,
    ) -> Result<Self, ValidationError> {
        let mut history = Self::new(capacity)?;
        let mut rows: Vec<ViewHistoryEntry> = rows.into_iter().collect();
        rows.sort_by(|a, b| {
            a.viewed_at
                .cmp(&b.viewed_at)
                .then_with(|| a.scene_id.cmp(&b.scene_id))
        });
        for row in rows {
            history.record(row);
        }
        Ok(history)
    }

    /// Record a view at the front of the list.
    pub fn record(&mut self, entry: ViewHistoryEntry) {
        self.entries.retain(|e| e.scene_id != entry.scene_id);
        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);
    }

    /// Rows, most recent first.
    pub fn entries(&self) -> &[ViewHistoryEntry] {
        &self.entries
    }

    pub fn contains(&self, scene_id: SceneId) -> bool {
        self.entries.iter().any(|e| e.scene_id == scene_id)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ViewHistory {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_CAPACITY,
            entries: Vec::with_capacity(DEFAULT_HISTORY_CAPACITY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(scene_id: SceneId, hour: u32) -> ViewHistoryEntry {
        ViewHistoryEntry::new(
            scene_id,
            Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = ViewHistory::new(0).unwrap_err();
        assert_eq!(err.field, "historyCapacity");
    }

    #[test]
    fn test_record_keeps_most_recent_first() {
        let mut history = ViewHistory::new(5).unwrap();
        history.record(at(1, 8));
        history.record(at(2, 9));
        history.record(at(3, 10));

        let ids: Vec<SceneId> = history.entries().iter().map(|e| e.scene_id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = ViewHistory::new(2).unwrap();
        history.record(at(1, 8));
        history.record(at(2, 9));
        history.record(at(3, 10));

        assert_eq!(history.len(), 2);
        assert!(!history.contains(1));
        assert!(history.contains(2));
        assert!(history.contains(3));
    }

    #[test]
    fn test_reviewing_moves_to_front_without_duplicate() {
        let mut history = ViewHistory::new(5).unwrap();
        history.record(at(1, 8));
        history.record(at(2, 9));
        history.record(at(1, 11));

        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0], at(1, 11));
        assert_eq!(history.entries()[1].scene_id, 2);
    }

    #[test]
    fn test_from_entries_orders_by_viewed_at() {
        let rows = vec![at(4, 12), at(5, 7), at(6, 20), at(7, 9)];
        let history = ViewHistory::from_entries(3, rows).unwrap();

        let ids: Vec<SceneId> = history.entries().iter().map(|e| e.scene_id).collect();
        assert_eq!(ids, vec![6, 4, 7]);
    }
}
