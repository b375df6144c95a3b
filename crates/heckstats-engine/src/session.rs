use std::time::Duration;

use heckstats_core::award::Award;
use heckstats_core::config::TitleConfig;
use heckstats_core::player::{Counter, PlayerId};
use heckstats_core::session::{SessionMode, SessionPhase, SessionState};
use heckstats_core::snapshot::Snapshot;
use heckstats_core::timer::{Stopwatch, TimerKind};
use uuid::Uuid;

use crate::tracker::PlayerTracker;

/// Session state machine: Inactive, then Survival or Versus, then back.
#[derive(Debug)]
pub struct SessionManager {
    state: SessionState,
    timer: Stopwatch,
    paused_at: Option<Duration>,
    session_id: Uuid,
    enemy_kills: u32,
    waves_survived: u32,
    maps: Vec<String>,
    perks: Vec<String>,
    awards: Vec<Award>,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            state: SessionState::default(),
            timer: Stopwatch::default(),
            paused_at: None,
            session_id: Uuid::nil(),
            enemy_kills: 0,
            waves_survived: 0,
            maps: Vec::new(),
            perks: Vec::new(),
            awards: Vec::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.phase.is_active()
    }

    pub fn mode(&self) -> Option<SessionMode> {
        self.state.phase.mode()
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn enemy_kills(&self) -> u32 {
        self.enemy_kills
    }

    pub fn waves_survived(&self) -> u32 {
        self.waves_survived
    }

    pub fn maps(&self) -> &[String] {
        &self.maps
    }

    pub fn perks(&self) -> &[String] {
        &self.perks
    }

    /// Awards of the last completed session.
    pub fn awards(&self) -> &[Award] {
        &self.awards
    }

    /// Session time so far, excluding pauses.
    pub fn current_duration(&self, now: Duration) -> Duration {
        self.timer.current(self.paused_at.unwrap_or(now))
    }

    /// Returns false (and changes nothing) if a session is already running.
    pub fn start(&mut self, mode: SessionMode, now: Duration, tracker: &mut PlayerTracker) -> bool {
        if let Some(current) = self.mode() {
            tracing::warn!(%current, requested = %mode, "Session already active, ignoring start");
            return false;
        }

        tracker.reset_session_stats();
        self.enemy_kills = 0;
        self.waves_survived = 0;
        self.maps.clear();
        self.perks.clear();
        self.awards.clear();
        self.session_id = Uuid::new_v4();
        self.paused_at = None;

        self.timer.reset();
        self.timer.start(now);
        self.state = SessionState {
            phase: SessionPhase::from(mode),
            paused: false,
            started_at: Some(now),
            last_duration: Duration::ZERO,
        };
        tracker.start_all(TimerKind::Alive, now);

        tracing::info!(%mode, session_id = %self.session_id, players = tracker.len(), "Session started");
        true
    }

    /// End the session and produce its snapshot with awards attached.
    /// Returns None if no session of `mode` is running.
    pub fn stop(
        &mut self,
        mode: SessionMode,
        now: Duration,
        tracker: &mut PlayerTracker,
        titles: &TitleConfig,
    ) -> Option<Snapshot> {
        match self.mode() {
            None => {
                tracing::warn!(requested = %mode, "No active session, ignoring stop");
                return None;
            },
            Some(current) if current != mode => {
                tracing::warn!(%current, requested = %mode, "Session mode mismatch, ignoring stop");
                return None;
            },
            Some(_) => {},
        }
        if self.is_paused() {
            self.resume(now, tracker);
        }

        tracker.stop_all(now);
        self.timer.stop(now);
        self.state.phase = SessionPhase::Inactive;
        self.state.last_duration = self.timer.accumulated;

        let mut snapshot = Snapshot {
            session_id: self.session_id,
            mode,
            session: self.state.clone(),
            players: tracker.snapshot(now),
            enemy_kills: self.enemy_kills,
            waves_survived: self.waves_survived,
            maps: self.maps.clone(),
            perks: self.perks.clone(),
            awards: Vec::new(),
        };
        self.awards = heckstats_titles::compute_awards(&snapshot, titles);
        snapshot.awards = self.awards.clone();

        tracing::info!(
            %mode,
            session_id = %self.session_id,
            duration_secs = self.state.last_duration.as_secs_f64(),
            enemy_kills = self.enemy_kills,
            awards = snapshot.awards.len(),
            "Session stopped"
        );
        Some(snapshot)
    }

    pub fn pause(&mut self, now: Duration, tracker: &mut PlayerTracker) -> bool {
        if !self.is_active() {
            tracing::debug!("Pause outside a session");
            return false;
        }
        if self.paused_at.is_some() {
            return false;
        }
        self.paused_at = Some(now);
        self.state.paused = true;
        tracker.pause_all(now);
        true
    }

    pub fn resume(&mut self, now: Duration, tracker: &mut PlayerTracker) -> bool {
        if !self.is_active() {
            tracing::debug!("Resume outside a session");
            return false;
        }
        let Some(paused_at) = self.paused_at.take() else {
            return false;
        };
        self.timer.shift(now.saturating_sub(paused_at));
        self.state.paused = false;
        tracker.resume_all(now);
        true
    }

    /// A wave ended. Credits a clutch to the sole survivor of a multiplayer
    /// session and returns them.
    pub fn checkpoint(&mut self, tracker: &mut PlayerTracker) -> Option<PlayerId> {
        if !self.is_active() {
            tracing::debug!("Checkpoint outside a session");
            return None;
        }
        self.waves_survived += 1;
        if tracker.len() < 2 {
            return None;
        }
        let survivor = tracker.sole_survivor()?;
        tracker.increment(survivor, Counter::WaveClutches);
        tracing::info!(player_id = survivor, wave = self.waves_survived, "Wave clutch");
        Some(survivor)
    }

    pub fn note_enemy_kill(&mut self) {
        self.enemy_kills += 1;
    }

    pub fn map_entered(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.is_active() {
            tracing::debug!(map = %name, "Map entered outside a session");
            return;
        }
        self.maps.push(name);
    }

    pub fn perk_chosen(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.is_active() {
            tracing::debug!(perk = %name, "Perk chosen outside a session");
            return;
        }
        self.perks.push(name);
    }
}

#[cfg(test)]
mod tests {
    use heckstats_core::player::PlayerColor;

    use super::*;

    fn s(secs: u64) -> Duration {
        Duration::from_secs(secs)
    }

    fn two_players() -> PlayerTracker {
        let mut t = PlayerTracker::new();
        t.register(1, "One", PlayerColor::default(), Duration::ZERO);
        t.register(2, "Two", PlayerColor::for_slot(1), Duration::ZERO);
        t
    }

    #[test]
    fn start_resets_and_starts_alive_timers() {
        let mut tracker = two_players();
        tracker.increment(1, Counter::Kills);
        let mut session = SessionManager::new();
        session.note_enemy_kill();

        assert!(session.start(SessionMode::Survival, s(10), &mut tracker));
        assert_eq!(session.mode(), Some(SessionMode::Survival));
        assert_eq!(session.enemy_kills(), 0);
        assert_ne!(session.session_id(), Uuid::nil());
        assert_eq!(tracker.get(1).unwrap().stats.kills, 0);
        assert_eq!(tracker.current_value(TimerKind::Alive, 2, s(15)), Some(s(5)));
    }

    #[test]
    fn double_start_is_rejected() {
        let mut tracker = two_players();
        let mut session = SessionManager::new();
        session.start(SessionMode::Versus, s(0), &mut tracker);
        let id = session.session_id();
        tracker.increment(1, Counter::Kills);

        assert!(!session.start(SessionMode::Survival, s(5), &mut tracker));
        assert_eq!(session.mode(), Some(SessionMode::Versus));
        assert_eq!(session.session_id(), id);
        assert_eq!(tracker.get(1).unwrap().stats.kills, 1);
    }

    #[test]
    fn stop_requires_matching_mode() {
        let mut tracker = two_players();
        let mut session = SessionManager::new();
        let titles = TitleConfig::default();
        assert!(session.stop(SessionMode::Survival, s(1), &mut tracker, &titles).is_none());

        session.start(SessionMode::Survival, s(0), &mut tracker);
        assert!(session.stop(SessionMode::Versus, s(5), &mut tracker, &titles).is_none());
        assert!(session.is_active());

        let snap = session.stop(SessionMode::Survival, s(5), &mut tracker, &titles).unwrap();
        assert!(!session.is_active());
        assert_eq!(snap.mode, SessionMode::Survival);
        assert_eq!(snap.duration(), s(5));
        assert_eq!(snap.players.len(), 2);
        assert_eq!(snap.players[0].stats.alive_time.accumulated, s(5));
    }

    #[test]
    fn session_timer_excludes_pause() {
        let mut tracker = two_players();
        let mut session = SessionManager::new();
        session.start(SessionMode::Survival, s(0), &mut tracker);
        assert!(session.pause(s(10), &mut tracker));
        assert!(!session.pause(s(12), &mut tracker));
        assert_eq!(session.current_duration(s(20)), s(10));
        assert!(session.resume(s(40), &mut tracker));
        assert!(!session.resume(s(41), &mut tracker));

        let snap = session
            .stop(SessionMode::Survival, s(50), &mut tracker, &TitleConfig::default())
            .unwrap();
        assert_eq!(snap.duration(), s(20));
        for rec in &snap.players {
            assert_eq!(rec.stats.alive_time.accumulated, s(20));
        }
    }

    #[test]
    fn stop_while_paused_ends_at_pause_instant() {
        let mut tracker = two_players();
        let mut session = SessionManager::new();
        session.start(SessionMode::Versus, s(0), &mut tracker);
        session.pause(s(8), &mut tracker);
        let snap = session
            .stop(SessionMode::Versus, s(30), &mut tracker, &TitleConfig::default())
            .unwrap();
        assert_eq!(snap.duration(), s(8));
        assert!(!snap.session.paused);
        assert!(!tracker.is_paused());
    }

    #[test]
    fn pause_outside_session_is_noop() {
        let mut tracker = two_players();
        let mut session = SessionManager::new();
        assert!(!session.pause(s(1), &mut tracker));
        assert!(!tracker.is_paused());
    }

    #[test]
    fn wave_clutch_needs_multiplayer_and_one_survivor() {
        let mut tracker = two_players();
        let mut session = SessionManager::new();
        session.start(SessionMode::Survival, s(0), &mut tracker);

        assert!(session.checkpoint(&mut tracker).is_none());
        tracker.record_death(2, s(3));
        assert_eq!(session.checkpoint(&mut tracker), Some(1));
        assert_eq!(tracker.get(1).unwrap().stats.wave_clutches, 1);
        assert_eq!(session.waves_survived(), 2);
    }

    #[test]
    fn solo_session_never_clutches() {
        let mut tracker = PlayerTracker::new();
        tracker.register(1, "Solo", PlayerColor::default(), Duration::ZERO);
        let mut session = SessionManager::new();
        session.start(SessionMode::Survival, s(0), &mut tracker);
        assert!(session.checkpoint(&mut tracker).is_none());
        assert_eq!(tracker.get(1).unwrap().stats.wave_clutches, 0);
    }

    #[test]
    fn maps_and_perks_only_recorded_in_session() {
        let mut tracker = two_players();
        let mut session = SessionManager::new();
        session.map_entered("Lobby");
        session.start(SessionMode::Survival, s(0), &mut tracker);
        session.map_entered("Hive");
        session.perk_chosen("Double Jump");
        let snap = session
            .stop(SessionMode::Survival, s(1), &mut tracker, &TitleConfig::default())
            .unwrap();
        assert_eq!(snap.maps, vec!["Hive".to_string()]);
        assert_eq!(snap.perks, vec!["Double Jump".to_string()]);

        session.start(SessionMode::Survival, s(2), &mut tracker);
        assert!(session.maps().is_empty());
        assert!(session.awards().is_empty());
    }
}
