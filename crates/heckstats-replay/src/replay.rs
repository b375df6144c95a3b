use std::sync::Arc;
use std::time::Duration;

use heckstats_core::config::EngineConfig;
use heckstats_core::events::TimedEvent;
use heckstats_core::snapshot::{Snapshot, SnapshotError};
use heckstats_core::time::{Clock, ManualClock};
use heckstats_engine::StatsEngine;
use heckstats_engine::observer::SnapshotCollector;

#[derive(Debug)]
pub enum ReplayError {
    Io(std::io::Error),
    Parse { line: usize, message: String },
    Output(SnapshotError),
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "read error: {e}"),
            Self::Parse { line, message } => write!(f, "line {line}: {message}"),
            Self::Output(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Output(e) => Some(e),
            Self::Parse { .. } => None,
        }
    }
}

impl From<std::io::Error> for ReplayError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<SnapshotError> for ReplayError {
    fn from(e: SnapshotError) -> Self {
        Self::Output(e)
    }
}

/// Parse one log line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<(Duration, TimedEvent)>, ReplayError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let event: TimedEvent = serde_json::from_str(line).map_err(|e| ReplayError::Parse {
        line: line_no,
        message: e.to_string(),
    })?;
    let at = Duration::try_from_secs_f64(event.at).map_err(|e| ReplayError::Parse {
        line: line_no,
        message: format!("bad timestamp {}: {e}", event.at),
    })?;
    Ok(Some((at, event)))
}

/// Parse a whole JSON-lines log, stopping at the first bad line.
pub fn parse_log(content: &str) -> Result<Vec<(Duration, TimedEvent)>, ReplayError> {
    let mut events = Vec::new();
    for (i, line) in content.lines().enumerate() {
        if let Some(event) = parse_line(i + 1, line)? {
            events.push(event);
        }
    }
    Ok(events)
}

/// Drives a [`StatsEngine`] on a manual clock from recorded events.
pub struct Replayer {
    engine: StatsEngine,
    clock: Arc<ManualClock>,
    collector: SnapshotCollector,
}

impl Replayer {
    pub fn new(config: EngineConfig) -> Self {
        let clock = Arc::new(ManualClock::new(Duration::ZERO));
        let collector = SnapshotCollector::new();
        let engine = StatsEngine::new(
            config,
            Arc::clone(&clock) as Arc<dyn Clock>,
            Box::new(collector.clone()),
        );
        Self {
            engine,
            clock,
            collector,
        }
    }

    pub fn engine(&self) -> &StatsEngine {
        &self.engine
    }

    /// Apply one event. Timestamps earlier than the clock are applied at
    /// the current time.
    pub fn feed(&mut self, at: Duration, event: &TimedEvent) {
        if at < self.clock.now() {
            tracing::warn!(at = event.at, "Event out of order, applying at current time");
        }
        self.clock.set(at);
        self.engine.apply(&event.event);
    }

    /// Apply every event and return the snapshots of sessions that ended.
    pub fn run(&mut self, events: &[(Duration, TimedEvent)]) -> Vec<Snapshot> {
        for (at, event) in events {
            self.feed(*at, event);
        }
        if self.engine.session().is_active() {
            tracing::warn!("Log ended with a session still running");
        }
        self.collector.take()
    }
}

/// Human-readable awards listing for one session.
pub fn format_awards(snapshot: &Snapshot) -> String {
    let mut out = format!(
        "{} session {} ({:.1}s, {} enemy kills, {} waves)\n",
        snapshot.mode,
        snapshot.session_id,
        snapshot.duration().as_secs_f64(),
        snapshot.enemy_kills,
        snapshot.waves_survived,
    );
    if snapshot.awards.is_empty() {
        out.push_str("  no titles awarded\n");
    }
    for award in &snapshot.awards {
        out.push_str(&format!(
            "  [{:>3}] {} - {}: {}\n",
            award.priority, award.player_name, award.title, award.description
        ));
    }
    out
}
