use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Source of "now" for every timer, ledger window and session reference.
///
/// Timestamps are offsets from an arbitrary origin fixed by the clock, so
/// two readings from the same clock can be subtracted directly.
pub trait Clock: Send + Sync {
    fn now(&self) -> Duration;
}

/// Wall clock anchored at construction time.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to. Used by event replay and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    nanos: AtomicU64,
}

impl ManualClock {
    pub fn new(start: Duration) -> Self {
        Self {
            nanos: AtomicU64::new(duration_to_nanos(start)),
        }
    }

    /// Jump to an absolute time. Moving backwards is ignored.
    pub fn set(&self, at: Duration) {
        self.nanos
            .fetch_max(duration_to_nanos(at), Ordering::Relaxed);
    }

    pub fn advance(&self, by: Duration) {
        self.nanos
            .fetch_add(duration_to_nanos(by), Ordering::Relaxed);
    }

    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::from_secs_f64(secs.max(0.0)));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::Relaxed))
    }
}

fn duration_to_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new(Duration::from_secs(5));
        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now(), Duration::from_millis(5250));
        clock.advance_secs(1.5);
        assert_eq!(clock.now(), Duration::from_millis(6750));
    }

    #[test]
    fn manual_clock_never_moves_backwards() {
        let clock = ManualClock::new(Duration::from_secs(10));
        clock.set(Duration::from_secs(3));
        assert_eq!(clock.now(), Duration::from_secs(10));
        clock.set(Duration::from_secs(12));
        assert_eq!(clock.now(), Duration::from_secs(12));
    }

    #[test]
    fn negative_advance_is_clamped() {
        let clock = ManualClock::default();
        clock.advance_secs(-4.0);
        assert_eq!(clock.now(), Duration::ZERO);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
