use std::sync::{Arc, Mutex};

use heckstats_core::award::Award;
use heckstats_core::snapshot::Snapshot;

/// Outbound notifications for presentation and logging collaborators.
/// Every method defaults to doing nothing.
pub trait StatsObserver: Send {
    fn on_snapshot_ready(&mut self, _snapshot: &Snapshot) {}

    fn on_awards_ready(&mut self, _awards: &[Award]) {}

    fn on_player_count_changed(&mut self, _count: usize) {}
}

pub struct NullObserver;

impl StatsObserver for NullObserver {}

/// Keeps every completed snapshot. Clones share the same buffer, so one
/// clone can be handed to the engine and the other read afterwards.
#[derive(Clone, Default)]
pub struct SnapshotCollector {
    snapshots: Arc<Mutex<Vec<Snapshot>>>,
    player_counts: Arc<Mutex<Vec<usize>>>,
}

impl SnapshotCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self) -> Vec<Snapshot> {
        self.snapshots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Drain collected snapshots.
    pub fn take(&self) -> Vec<Snapshot> {
        std::mem::take(
            &mut *self
                .snapshots
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }

    /// Every player count reported so far, oldest first.
    pub fn player_counts(&self) -> Vec<usize> {
        self.player_counts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl StatsObserver for SnapshotCollector {
    fn on_snapshot_ready(&mut self, snapshot: &Snapshot) {
        self.snapshots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(snapshot.clone());
    }

    fn on_player_count_changed(&mut self, count: usize) {
        self.player_counts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(count);
    }
}

#[cfg(test)]
mod tests {
    use heckstats_core::test_helpers::{make_record, snapshot_with};

    use super::*;

    #[test]
    fn collector_clones_share_storage() {
        let reader = SnapshotCollector::new();
        let mut writer = reader.clone();
        writer.on_snapshot_ready(&snapshot_with(vec![make_record(1, "Alpha")]));
        writer.on_player_count_changed(1);
        assert_eq!(reader.snapshots().len(), 1);
        assert_eq!(reader.player_counts(), vec![1]);
        assert_eq!(reader.take().len(), 1);
        assert!(reader.snapshots().is_empty());
    }

    #[test]
    fn null_observer_accepts_everything() {
        let mut observer = NullObserver;
        observer.on_awards_ready(&[]);
        observer.on_player_count_changed(3);
    }
}
