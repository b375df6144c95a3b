use std::collections::BTreeMap;
use std::time::Duration;

use heckstats_core::player::{Counter, PlayerColor, PlayerId, PlayerRecord};
use heckstats_core::timer::TimerKind;

/// Owns every player record and its timers.
///
/// Timers take clock readings from the caller. While paused, all reads and
/// writes use the pause instant, and resuming shifts every running timer by
/// the paused span.
#[derive(Debug, Default)]
pub struct PlayerTracker {
    players: BTreeMap<PlayerId, PlayerRecord>,
    paused_at: Option<Duration>,
}

impl PlayerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock reading timers should see: frozen while paused.
    fn effective(&self, now: Duration) -> Duration {
        self.paused_at.unwrap_or(now)
    }

    fn record_mut(&mut self, id: PlayerId, what: &str) -> Option<&mut PlayerRecord> {
        let rec = self.players.get_mut(&id);
        if rec.is_none() {
            tracing::warn!(player_id = id, "Ignoring {what} for unregistered player");
        }
        rec
    }

    /// Returns false if already registered.
    pub fn register(
        &mut self,
        id: PlayerId,
        name: impl Into<String>,
        color: PlayerColor,
        now: Duration,
    ) -> bool {
        if self.players.contains_key(&id) {
            tracing::debug!(player_id = id, "Player already registered");
            return false;
        }
        let name = name.into();
        tracing::info!(player_id = id, name = %name, "Player registered");
        self.players
            .insert(id, PlayerRecord::new(id, name, color, now));
        true
    }

    pub fn unregister(&mut self, id: PlayerId) -> Option<PlayerRecord> {
        let removed = self.players.remove(&id);
        if removed.is_some() {
            tracing::info!(player_id = id, "Player unregistered");
        }
        removed
    }

    pub fn get(&self, id: PlayerId) -> Option<&PlayerRecord> {
        self.players.get(&id)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Registration order.
    pub fn records(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.values()
    }

    pub fn alive_count(&self) -> usize {
        self.players.values().filter(|p| p.alive).count()
    }

    /// The single alive player, if exactly one is alive.
    pub fn sole_survivor(&self) -> Option<PlayerId> {
        let mut alive = self.players.values().filter(|p| p.alive);
        match (alive.next(), alive.next()) {
            (Some(p), None) => Some(p.id),
            _ => None,
        }
    }

    pub fn set_name(&mut self, id: PlayerId, name: impl Into<String>) -> bool {
        let Some(rec) = self.record_mut(id, "name change") else {
            return false;
        };
        rec.display_name = name.into();
        true
    }

    pub fn set_color(&mut self, id: PlayerId, color: PlayerColor) -> bool {
        let Some(rec) = self.record_mut(id, "colour change") else {
            return false;
        };
        rec.color = color;
        true
    }

    pub fn increment(&mut self, id: PlayerId, counter: Counter) -> bool {
        self.increment_by(id, counter, 1)
    }

    pub fn increment_by(&mut self, id: PlayerId, counter: Counter, by: u32) -> bool {
        let Some(rec) = self.record_mut(id, "counter update") else {
            return false;
        };
        let slot = rec.stats.counter_mut(counter);
        *slot = slot.saturating_add(by);
        true
    }

    pub fn record_weapon_hit(&mut self, id: PlayerId, weapon: &str) -> bool {
        let Some(rec) = self.record_mut(id, "weapon hit") else {
            return false;
        };
        *rec.stats.weapon_hits.entry(weapon.to_string()).or_default() += 1;
        true
    }

    /// Credit an enemy kill: kill count, per-type tally and streaks.
    pub fn record_enemy_kill(&mut self, id: PlayerId, enemy: &str) -> bool {
        let solo = self.sole_survivor() == Some(id);
        let Some(rec) = self.record_mut(id, "enemy kill") else {
            return false;
        };
        let stats = &mut rec.stats;
        stats.kills += 1;
        *stats.enemy_kills.entry(enemy.to_string()).or_default() += 1;
        stats.kill_streak += 1;
        stats.max_kill_streak = stats.max_kill_streak.max(stats.kill_streak);
        if solo {
            stats.solo_kill_streak += 1;
            stats.max_solo_kill_streak = stats.max_solo_kill_streak.max(stats.solo_kill_streak);
        } else {
            stats.solo_kill_streak = 0;
        }
        true
    }

    /// Keep the highest altitude seen this session.
    pub fn record_altitude(&mut self, id: PlayerId, altitude: f32) -> bool {
        if !altitude.is_finite() {
            tracing::debug!(player_id = id, altitude, "Ignoring non-finite altitude");
            return false;
        }
        let Some(rec) = self.record_mut(id, "altitude") else {
            return false;
        };
        let best = &mut rec.stats.highest_altitude;
        if best.is_none_or(|b| altitude > b) {
            *best = Some(altitude);
        }
        true
    }

    /// Count a death and stop everything a dead spider cannot be doing.
    pub fn record_death(&mut self, id: PlayerId, now: Duration) -> bool {
        let now = self.effective(now);
        let Some(rec) = self.record_mut(id, "death") else {
            return false;
        };
        rec.stats.deaths += 1;
        rec.alive = false;
        rec.stats.kill_streak = 0;
        rec.stats.solo_kill_streak = 0;
        for kind in TimerKind::ALL {
            rec.stats.timer_mut(kind).stop(now);
        }
        true
    }

    /// Revert a death the host later cancelled (astral revival).
    pub fn undo_death(&mut self, id: PlayerId, now: Duration, restart_alive: bool) -> bool {
        let now = self.effective(now);
        let Some(rec) = self.record_mut(id, "death correction") else {
            return false;
        };
        if rec.alive {
            tracing::debug!(player_id = id, "Death correction for a living player");
            return false;
        }
        rec.stats.deaths = rec.stats.deaths.saturating_sub(1);
        rec.alive = true;
        if restart_alive {
            rec.stats.alive_time.start(now);
        }
        true
    }

    pub fn record_respawn(&mut self, id: PlayerId, now: Duration, restart_alive: bool) -> bool {
        let now = self.effective(now);
        let Some(rec) = self.record_mut(id, "respawn") else {
            return false;
        };
        rec.alive = true;
        if restart_alive {
            rec.stats.alive_time.start(now);
        }
        true
    }

    /// Returns false if the player is unknown or the timer already runs.
    pub fn start_timer(&mut self, kind: TimerKind, id: PlayerId, now: Duration) -> bool {
        let now = self.effective(now);
        let Some(rec) = self.record_mut(id, "timer start") else {
            return false;
        };
        rec.stats.timer_mut(kind).start(now)
    }

    /// Returns false if the player is unknown or the timer is not running.
    pub fn stop_timer(&mut self, kind: TimerKind, id: PlayerId, now: Duration) -> bool {
        let now = self.effective(now);
        let Some(rec) = self.record_mut(id, "timer stop") else {
            return false;
        };
        rec.stats.timer_mut(kind).stop(now)
    }

    /// Live value for display; does not touch state.
    pub fn current_value(&self, kind: TimerKind, id: PlayerId, now: Duration) -> Option<Duration> {
        let now = self.effective(now);
        self.players
            .get(&id)
            .map(|rec| rec.stats.timer(kind).current(now))
    }

    pub fn start_all(&mut self, kind: TimerKind, now: Duration) {
        let now = self.effective(now);
        for rec in self.players.values_mut().filter(|p| p.alive) {
            rec.stats.timer_mut(kind).start(now);
        }
    }

    pub fn stop_all(&mut self, now: Duration) {
        let now = self.effective(now);
        for rec in self.players.values_mut() {
            for kind in TimerKind::ALL {
                rec.stats.timer_mut(kind).stop(now);
            }
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Returns false if already paused.
    pub fn pause_all(&mut self, now: Duration) -> bool {
        if self.paused_at.is_some() {
            return false;
        }
        self.paused_at = Some(now);
        true
    }

    /// Returns false if not paused.
    pub fn resume_all(&mut self, now: Duration) -> bool {
        let Some(paused_at) = self.paused_at.take() else {
            return false;
        };
        let gap = now.saturating_sub(paused_at);
        for rec in self.players.values_mut() {
            for kind in TimerKind::ALL {
                rec.stats.timer_mut(kind).shift(gap);
            }
        }
        true
    }

    pub fn reset_session_stats(&mut self) {
        for rec in self.players.values_mut() {
            rec.reset_session();
        }
    }

    /// Copies of every record with timers frozen at `now`.
    pub fn snapshot(&self, now: Duration) -> Vec<PlayerRecord> {
        let now = self.effective(now);
        self.players
            .values()
            .map(|rec| {
                let mut copy = rec.clone();
                for kind in TimerKind::ALL {
                    let frozen = copy.stats.timer(kind).frozen(now);
                    *copy.stats.timer_mut(kind) = frozen;
                }
                copy
            })
            .collect()
    }
}
