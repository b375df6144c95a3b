//! Deduplication of deaths reported by several hit sources at once.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use heckstats_core::hit::EntityId;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // The guarded maps stay valid even if a holder panicked mid-call.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct Window {
    seen: HashSet<EntityId>,
    last_clear: Duration,
}

/// Time-windowed "already dead" set for one identity namespace.
///
/// The whole set is wiped once `interval` has passed since the last wipe;
/// there is no per-entry expiry.
pub struct DedupLedger {
    interval: Duration,
    window: Mutex<Window>,
}

impl DedupLedger {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            window: Mutex::new(Window {
                seen: HashSet::new(),
                last_clear: Duration::ZERO,
            }),
        }
    }

    /// True the first time `id` is reported dead inside the current window.
    /// The id is recorded immediately, so concurrent reports see it.
    pub fn first_death(&self, id: EntityId, now: Duration) -> bool {
        let mut window = lock(&self.window);
        if now.saturating_sub(window.last_clear) > self.interval {
            window.seen.clear();
            window.last_clear = now;
        }
        window.seen.insert(id)
    }

    pub fn len(&self) -> usize {
        lock(&self.window).seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Remaining-strut counters for composite roller enemies.
#[derive(Default)]
pub struct RollerHealth {
    remaining: Mutex<HashMap<EntityId, u32>>,
}

impl RollerHealth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one strut death on `brain_id`. The counter is seeded with
    /// `active_struts` the first time the brain is seen. Returns true when
    /// the count drops below `min_struts`, at which point the brain is
    /// forgotten.
    pub fn strut_destroyed(&self, brain_id: EntityId, active_struts: u32, min_struts: u32) -> bool {
        let mut remaining = lock(&self.remaining);
        let left = remaining.entry(brain_id).or_insert(active_struts);
        *left = left.saturating_sub(1);
        if *left < min_struts {
            remaining.remove(&brain_id);
            return true;
        }
        false
    }

    pub fn remaining(&self, brain_id: EntityId) -> Option<u32> {
        lock(&self.remaining).get(&brain_id).copied()
    }

    pub fn clear(&self) {
        lock(&self.remaining).clear();
    }

    pub fn len(&self) -> usize {
        lock(&self.remaining).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
