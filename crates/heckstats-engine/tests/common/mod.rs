use std::sync::Arc;
use std::time::Duration;

use heckstats_core::catalog::PLAYER_ROOT_NAME;
use heckstats_core::config::EngineConfig;
use heckstats_core::hit::{Attacker, HitTarget};
use heckstats_core::player::{PlayerId, PlayerStats};
use heckstats_core::time::{Clock, ManualClock};

use heckstats_engine::StatsEngine;
use heckstats_engine::attribution::HitOutcome;
use heckstats_engine::observer::SnapshotCollector;

pub struct TestEngine {
    pub engine: StatsEngine,
    pub clock: Arc<ManualClock>,
    pub collector: SnapshotCollector,
}

impl TestEngine {
    /// Engine on a manual clock at t=0 with default config.
    pub fn new() -> Self {
        Self::from_config(EngineConfig::default())
    }

    pub fn from_config(config: EngineConfig) -> Self {
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

    /// Engine with players `1..=n` already joined.
    pub fn with_players(n: u64) -> Self {
        let mut t = Self::new();
        for id in 1..=n {
            t.engine.player_joined(id, &format!("Player{id}"), None);
        }
        t
    }

    pub fn at(&self, secs: f64) {
        self.clock.set(Duration::from_secs_f64(secs));
    }

    pub fn stats(&self, id: PlayerId) -> &PlayerStats {
        &self.engine.tracker().get(id).unwrap().stats
    }

    pub fn kill_enemy(&mut self, attacker: PlayerId, enemy_id: u64, name: &str, weapon: &str) -> HitOutcome {
        self.engine
            .record_hit(&HitTarget::enemy(enemy_id, name), Attacker::Player(attacker), weapon)
    }

    pub fn hit_player(&mut self, attacker: PlayerId, victim: PlayerId, weapon: &str) -> HitOutcome {
        self.engine.record_hit(
            &HitTarget::player(victim, PLAYER_ROOT_NAME),
            Attacker::Player(attacker),
            weapon,
        )
    }
}

pub fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}
