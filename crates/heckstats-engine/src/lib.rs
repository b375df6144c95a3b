//! Stats engine: the single entry point the host simulation calls into.
//!
//! Owns the player tracker, session manager and dedup ledgers, shares the
//! projectile ownership registry behind `Arc`, and reports finished
//! sessions to a [`StatsObserver`].

pub mod attribution;
pub mod ledger;
pub mod observer;
pub mod ownership;
pub mod session;
pub mod tracker;

use std::sync::Arc;
use std::time::Duration;

use heckstats_core::catalog::EntityCatalog;
use heckstats_core::config::EngineConfig;
use heckstats_core::events::EngineEvent;
use heckstats_core::hit::{Attacker, HitTarget, ObjectId};
use heckstats_core::player::{Counter, PlayerColor, PlayerId};
use heckstats_core::session::SessionMode;
use heckstats_core::snapshot::Snapshot;
use heckstats_core::time::{Clock, SystemClock};
use heckstats_core::timer::TimerKind;

use attribution::{HitAttributor, HitOutcome};
use ledger::{DedupLedger, RollerHealth};
use observer::{NullObserver, StatsObserver};
use ownership::OwnershipRegistry;
use session::SessionManager;
use tracker::PlayerTracker;

pub struct StatsEngine {
    config: EngineConfig,
    catalog: EntityCatalog,
    clock: Arc<dyn Clock>,
    tracker: PlayerTracker,
    session: SessionManager,
    enemy_deaths: DedupLedger,
    player_deaths: DedupLedger,
    rollers: RollerHealth,
    ownership: Arc<OwnershipRegistry>,
    observer: Box<dyn StatsObserver>,
    last_snapshot: Option<Snapshot>,
}

impl Default for StatsEngine {
    fn default() -> Self {
        Self::new(
            EngineConfig::default(),
            Arc::new(SystemClock::new()),
            Box::new(NullObserver),
        )
    }
}

impl StatsEngine {
    pub fn new(config: EngineConfig, clock: Arc<dyn Clock>, observer: Box<dyn StatsObserver>) -> Self {
        let interval = config.ledger.clear_interval();
        Self {
            catalog: EntityCatalog::with_overrides(&config.catalog),
            config,
            clock,
            tracker: PlayerTracker::new(),
            session: SessionManager::new(),
            enemy_deaths: DedupLedger::new(interval),
            player_deaths: DedupLedger::new(interval),
            rollers: RollerHealth::new(),
            ownership: Arc::new(OwnershipRegistry::new()),
            observer,
            last_snapshot: None,
        }
    }

    /// Engine configured from `heckstats.toml` and the environment.
    pub fn from_env() -> Self {
        Self::new(
            EngineConfig::load(),
            Arc::new(SystemClock::new()),
            Box::new(NullObserver),
        )
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_observer(mut self, observer: Box<dyn StatsObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &EntityCatalog {
        &self.catalog
    }

    pub fn tracker(&self) -> &PlayerTracker {
        &self.tracker
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Shared handle for hosts that register projectiles from other threads.
    pub fn ownership(&self) -> Arc<OwnershipRegistry> {
        Arc::clone(&self.ownership)
    }

    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.last_snapshot.as_ref()
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Live timer value for HUD display.
    pub fn timer_value(&self, kind: TimerKind, id: PlayerId) -> Option<Duration> {
        self.tracker.current_value(kind, id, self.now())
    }

    pub fn session_duration(&self) -> Duration {
        self.session.current_duration(self.now())
    }

    /// Register a player. Without a colour, the next palette slot is used.
    pub fn player_joined(&mut self, id: PlayerId, name: &str, color: Option<PlayerColor>) -> bool {
        let now = self.now();
        let color = color.unwrap_or_else(|| PlayerColor::for_slot(self.tracker.len()));
        if !self.tracker.register(id, name, color, now) {
            return false;
        }
        if self.session.is_active() {
            self.tracker.start_timer(TimerKind::Alive, id, now);
        }
        self.observer.on_player_count_changed(self.tracker.len());
        true
    }

    pub fn player_left(&mut self, id: PlayerId) -> bool {
        if self.tracker.unregister(id).is_none() {
            tracing::debug!(player_id = id, "Unknown player left");
            return false;
        }
        let dropped = self.ownership.remove_owner(id);
        if dropped > 0 {
            tracing::debug!(player_id = id, dropped, "Dropped projectiles of departed player");
        }
        self.observer.on_player_count_changed(self.tracker.len());
        true
    }

    pub fn color_changed(&mut self, id: PlayerId, color: PlayerColor) -> bool {
        self.tracker.set_color(id, color)
    }

    pub fn name_changed(&mut self, id: PlayerId, name: &str) -> bool {
        self.tracker.set_name(id, name)
    }

    pub fn record_death(&mut self, id: PlayerId) -> bool {
        let now = self.now();
        self.tracker.record_death(id, now)
    }

    pub fn undo_death(&mut self, id: PlayerId) -> bool {
        let now = self.now();
        let active = self.session.is_active();
        self.tracker.undo_death(id, now, active)
    }

    pub fn record_respawn(&mut self, id: PlayerId) -> bool {
        let now = self.now();
        let active = self.session.is_active();
        self.tracker.record_respawn(id, now, active)
    }

    pub fn record_altitude(&mut self, id: PlayerId, altitude: f32) -> bool {
        self.tracker.record_altitude(id, altitude)
    }

    pub fn record_web_swing(&mut self, id: PlayerId) -> bool {
        if !self.tracker.increment(id, Counter::WebSwings) {
            return false;
        }
        if self.session.is_active() {
            let now = self.now();
            self.tracker.start_timer(TimerKind::WebSwing, id, now);
        }
        true
    }

    pub fn record_web_release(&mut self, id: PlayerId) -> bool {
        let now = self.now();
        self.tracker.stop_timer(TimerKind::WebSwing, id, now)
    }

    pub fn set_airborne(&mut self, id: PlayerId, airborne: bool) -> bool {
        let now = self.now();
        if !airborne {
            return self.tracker.stop_timer(TimerKind::Airborne, id, now);
        }
        if !self.session.is_active() {
            return false;
        }
        self.tracker.start_timer(TimerKind::Airborne, id, now)
    }

    pub fn projectile_spawned(&self, object_id: ObjectId, owner: PlayerId) {
        self.ownership.register(object_id, owner);
    }

    pub fn projectile_despawned(&self, object_id: ObjectId) {
        self.ownership.unregister(object_id);
    }

    pub fn record_hit(&mut self, target: &HitTarget, attacker: Attacker, weapon: &str) -> HitOutcome {
        let now = self.now();
        let attributor = HitAttributor {
            catalog: &self.catalog,
            enemy_deaths: &self.enemy_deaths,
            player_deaths: &self.player_deaths,
            rollers: &self.rollers,
            ownership: &self.ownership,
        };
        let outcome = attributor.record_hit(&mut self.tracker, target, attacker, weapon, now);
        if matches!(outcome, HitOutcome::EnemyKill { .. }) {
            self.session.note_enemy_kill();
        }
        outcome
    }

    pub fn session_start(&mut self, mode: SessionMode) -> bool {
        let now = self.now();
        if !self.session.start(mode, now, &mut self.tracker) {
            return false;
        }
        self.rollers.clear();
        true
    }

    /// Stop the session, compute titles and notify the observer.
    pub fn session_stop(&mut self, mode: SessionMode) -> Option<&Snapshot> {
        let now = self.now();
        let snapshot = self
            .session
            .stop(mode, now, &mut self.tracker, &self.config.titles)?;
        self.observer.on_awards_ready(&snapshot.awards);
        self.observer.on_snapshot_ready(&snapshot);
        self.last_snapshot = Some(snapshot);
        self.last_snapshot.as_ref()
    }

    pub fn pause(&mut self) -> bool {
        let now = self.now();
        self.session.pause(now, &mut self.tracker)
    }

    pub fn resume(&mut self) -> bool {
        let now = self.now();
        self.session.resume(now, &mut self.tracker)
    }

    pub fn checkpoint_reached(&mut self) -> Option<PlayerId> {
        self.session.checkpoint(&mut self.tracker)
    }

    pub fn map_entered(&mut self, name: &str) {
        self.session.map_entered(name);
    }

    pub fn perk_chosen(&mut self, name: &str) {
        self.session.perk_chosen(name);
    }

    /// Dispatch one recorded event to the matching inbound call.
    pub fn apply(&mut self, event: &EngineEvent) {
        match event {
            EngineEvent::PlayerJoined {
                player_id,
                name,
                color,
            } => {
                self.player_joined(*player_id, name, *color);
            },
            EngineEvent::PlayerLeft { player_id } => {
                self.player_left(*player_id);
            },
            EngineEvent::Hit {
                target,
                attacker,
                weapon,
            } => {
                self.record_hit(target, *attacker, weapon);
            },
            EngineEvent::Death { player_id } => {
                self.record_death(*player_id);
            },
            EngineEvent::UndoDeath { player_id } => {
                self.undo_death(*player_id);
            },
            EngineEvent::Respawn { player_id } => {
                self.record_respawn(*player_id);
            },
            EngineEvent::SessionStart { mode } => {
                self.session_start(*mode);
            },
            EngineEvent::SessionStop { mode } => {
                self.session_stop(*mode);
            },
            EngineEvent::Pause => {
                self.pause();
            },
            EngineEvent::Resume => {
                self.resume();
            },
            EngineEvent::CheckpointReached => {
                self.checkpoint_reached();
            },
            EngineEvent::ColorChanged { player_id, color } => {
                self.color_changed(*player_id, *color);
            },
            EngineEvent::NameChanged { player_id, name } => {
                self.name_changed(*player_id, name);
            },
            EngineEvent::MapEntered { name } => self.map_entered(name),
            EngineEvent::PerkChosen { name } => self.perk_chosen(name),
            EngineEvent::Altitude {
                player_id,
                altitude,
            } => {
                self.record_altitude(*player_id, *altitude);
            },
            EngineEvent::WebSwing { player_id } => {
                self.record_web_swing(*player_id);
            },
            EngineEvent::WebRelease { player_id } => {
                self.record_web_release(*player_id);
            },
            EngineEvent::Airborne {
                player_id,
                airborne,
            } => {
                self.set_airborne(*player_id, *airborne);
            },
            EngineEvent::ProjectileSpawned { object_id, owner } => {
                self.projectile_spawned(*object_id, *owner);
            },
            EngineEvent::ProjectileDespawned { object_id } => {
                self.projectile_despawned(*object_id);
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use heckstats_core::time::ManualClock;

    use super::*;

    fn engine() -> (StatsEngine, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Duration::ZERO));
        let engine = StatsEngine::default().with_clock(Arc::clone(&clock) as Arc<dyn Clock>);
        (engine, clock)
    }

    #[test]
    fn join_uses_palette_when_no_color() {
        let (mut engine, _) = engine();
        engine.player_joined(1, "A", None);
        engine.player_joined(2, "B", None);
        assert_eq!(engine.tracker().get(2).unwrap().color, PlayerColor::for_slot(1));
    }

    #[test]
    fn late_joiner_starts_alive_timer() {
        let (mut engine, clock) = engine();
        engine.session_start(SessionMode::Survival);
        clock.advance_secs(4.0);
        engine.player_joined(3, "Late", None);
        clock.advance_secs(6.0);
        assert_eq!(engine.timer_value(TimerKind::Alive, 3), Some(Duration::from_secs(6)));
    }

    #[test]
    fn airborne_and_swing_only_time_in_session() {
        let (mut engine, clock) = engine();
        engine.player_joined(1, "A", None);
        assert!(engine.record_web_swing(1));
        assert!(!engine.set_airborne(1, true));
        assert_eq!(engine.timer_value(TimerKind::WebSwing, 1), Some(Duration::ZERO));

        engine.session_start(SessionMode::Versus);
        engine.record_web_swing(1);
        engine.set_airborne(1, true);
        clock.advance_secs(2.0);
        engine.record_web_release(1);
        clock.advance_secs(1.0);
        engine.set_airborne(1, false);
        let stats = &engine.tracker().get(1).unwrap().stats;
        assert_eq!(stats.web_swings, 1);
        assert_eq!(stats.swing_time.accumulated, Duration::from_secs(2));
        assert_eq!(stats.airborne_time.accumulated, Duration::from_secs(3));
    }

    #[test]
    fn player_left_drops_their_projectiles() {
        let (mut engine, _) = engine();
        engine.player_joined(1, "A", None);
        engine.projectile_spawned(10, 1);
        assert!(engine.player_left(1));
        assert!(engine.ownership().owner_of(10).is_none());
        assert!(!engine.player_left(1));
    }

    #[test]
    fn enemy_kills_feed_session_counter() {
        let (mut engine, _) = engine();
        engine.player_joined(1, "A", None);
        engine.session_start(SessionMode::Survival);
        engine.record_hit(&HitTarget::enemy(5, "EnemyWasp"), Attacker::Player(1), "Disc");
        engine.record_hit(&HitTarget::enemy(5, "EnemyWasp"), Attacker::Player(1), "Disc");
        assert_eq!(engine.session().enemy_kills(), 1);
    }

    #[test]
    fn apply_dispatches_events() {
        let (mut engine, _) = engine();
        engine.apply(&EngineEvent::PlayerJoined {
            player_id: 1,
            name: "A".to_string(),
            color: None,
        });
        engine.apply(&EngineEvent::NameChanged {
            player_id: 1,
            name: "Renamed".to_string(),
        });
        engine.apply(&EngineEvent::Altitude {
            player_id: 1,
            altitude: 9.0,
        });
        let rec = engine.tracker().get(1).unwrap();
        assert_eq!(rec.display_name, "Renamed");
        assert_eq!(rec.stats.highest_altitude, Some(9.0));
    }
}
