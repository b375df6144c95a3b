use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The per-player timers kept by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    Alive,
    WebSwing,
    Airborne,
}

impl TimerKind {
    pub const ALL: [TimerKind; 3] = [TimerKind::Alive, TimerKind::WebSwing, TimerKind::Airborne];
}

/// Accumulating start/stop timer.
///
/// `running_since` is a clock reading; pausing is done by the owner, which
/// pushes `running_since` forward by the paused span via [`Stopwatch::shift`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stopwatch {
    pub accumulated: Duration,
    pub running_since: Option<Duration>,
}

impl Stopwatch {
    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Returns false if already running.
    pub fn start(&mut self, now: Duration) -> bool {
        if self.running_since.is_some() {
            return false;
        }
        self.running_since = Some(now);
        true
    }

    /// Returns false if not running.
    pub fn stop(&mut self, now: Duration) -> bool {
        let Some(since) = self.running_since.take() else {
            return false;
        };
        self.accumulated += now.saturating_sub(since);
        true
    }

    /// Accumulated time plus the live span, without mutating.
    pub fn current(&self, now: Duration) -> Duration {
        match self.running_since {
            Some(since) => self.accumulated + now.saturating_sub(since),
            None => self.accumulated,
        }
    }

    pub fn shift(&mut self, by: Duration) {
        if let Some(since) = self.running_since.as_mut() {
            *since += by;
        }
    }

    /// Stopped copy holding the value at `now`.
    pub fn frozen(&self, now: Duration) -> Stopwatch {
        Stopwatch {
            accumulated: self.current(now),
            running_since: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Stopwatch::default();
    }
}
