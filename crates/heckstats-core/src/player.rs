use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::timer::{Stopwatch, TimerKind};

/// Host-assigned player identifier. Assigned monotonically, so ascending
/// order is join order.
pub type PlayerId = u64;

/// Display colour reported by the host's customiser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for PlayerColor {
    fn default() -> Self {
        Self::PALETTE[0]
    }
}

impl PlayerColor {
    /// Spider body colours handed out before the host reports a real one.
    pub const PALETTE: &[PlayerColor] = &[
        PlayerColor { r: 230, g: 57, b: 70 },
        PlayerColor { r: 69, g: 123, b: 157 },
        PlayerColor { r: 241, g: 196, b: 15 },
        PlayerColor { r: 46, g: 204, b: 113 },
    ];

    /// Palette entry for the n-th joined player.
    pub fn for_slot(slot: usize) -> Self {
        Self::PALETTE[slot % Self::PALETTE.len()]
    }
}

/// Plain counters bumped by the tracker's `increment` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Counter {
    Kills,
    FriendlyKills,
    Deaths,
    EnemyShieldsBroken,
    FriendlyShieldsHit,
    ShieldsLost,
    WebSwings,
    WaveClutches,
}

/// Per-session statistics. Reset wholesale on session start.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub kills: u32,
    pub friendly_kills: u32,
    pub deaths: u32,
    pub enemy_shields_broken: u32,
    pub friendly_shields_hit: u32,
    pub shields_lost: u32,
    pub web_swings: u32,
    pub wave_clutches: u32,
    /// None until the host reports an altitude this session.
    pub highest_altitude: Option<f32>,
    pub kill_streak: u32,
    pub max_kill_streak: u32,
    pub solo_kill_streak: u32,
    pub max_solo_kill_streak: u32,
    pub weapon_hits: BTreeMap<String, u32>,
    pub enemy_kills: BTreeMap<String, u32>,
    pub alive_time: Stopwatch,
    pub airborne_time: Stopwatch,
    pub swing_time: Stopwatch,
}

impl PlayerStats {
    pub fn counter(&self, counter: Counter) -> u32 {
        match counter {
            Counter::Kills => self.kills,
            Counter::FriendlyKills => self.friendly_kills,
            Counter::Deaths => self.deaths,
            Counter::EnemyShieldsBroken => self.enemy_shields_broken,
            Counter::FriendlyShieldsHit => self.friendly_shields_hit,
            Counter::ShieldsLost => self.shields_lost,
            Counter::WebSwings => self.web_swings,
            Counter::WaveClutches => self.wave_clutches,
        }
    }

    pub fn counter_mut(&mut self, counter: Counter) -> &mut u32 {
        match counter {
            Counter::Kills => &mut self.kills,
            Counter::FriendlyKills => &mut self.friendly_kills,
            Counter::Deaths => &mut self.deaths,
            Counter::EnemyShieldsBroken => &mut self.enemy_shields_broken,
            Counter::FriendlyShieldsHit => &mut self.friendly_shields_hit,
            Counter::ShieldsLost => &mut self.shields_lost,
            Counter::WebSwings => &mut self.web_swings,
            Counter::WaveClutches => &mut self.wave_clutches,
        }
    }

    pub fn timer(&self, kind: TimerKind) -> &Stopwatch {
        match kind {
            TimerKind::Alive => &self.alive_time,
            TimerKind::WebSwing => &self.swing_time,
            TimerKind::Airborne => &self.airborne_time,
        }
    }

    pub fn timer_mut(&mut self, kind: TimerKind) -> &mut Stopwatch {
        match kind {
            TimerKind::Alive => &mut self.alive_time,
            TimerKind::WebSwing => &mut self.swing_time,
            TimerKind::Airborne => &mut self.airborne_time,
        }
    }
}

/// A tracked player: fixed identity plus resettable statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub display_name: String,
    pub color: PlayerColor,
    pub joined_at: Duration,
    pub alive: bool,
    pub stats: PlayerStats,
}

impl PlayerRecord {
    pub fn new(id: PlayerId, display_name: String, color: PlayerColor, joined_at: Duration) -> Self {
        Self {
            id,
            display_name,
            color,
            joined_at,
            alive: true,
            stats: PlayerStats::default(),
        }
    }

    /// Clear the session counters, keeping identity and join time.
    pub fn reset_session(&mut self) {
        self.stats = PlayerStats::default();
        self.alive = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_keeps_identity() {
        let mut rec = PlayerRecord::new(
            7,
            "Webby".to_string(),
            PlayerColor::for_slot(2),
            Duration::from_secs(3),
        );
        rec.stats.kills = 4;
        rec.stats.weapon_hits.insert("Laser Cube".to_string(), 2);
        rec.alive = false;
        rec.reset_session();
        assert_eq!(rec.id, 7);
        assert_eq!(rec.display_name, "Webby");
        assert_eq!(rec.joined_at, Duration::from_secs(3));
        assert!(rec.alive);
        assert_eq!(rec.stats, PlayerStats::default());
    }

    #[test]
    fn counter_accessors_agree() {
        let mut stats = PlayerStats::default();
        *stats.counter_mut(Counter::ShieldsLost) += 3;
        *stats.counter_mut(Counter::WaveClutches) += 1;
        assert_eq!(stats.counter(Counter::ShieldsLost), 3);
        assert_eq!(stats.shields_lost, 3);
        assert_eq!(stats.counter(Counter::WaveClutches), 1);
        assert_eq!(stats.counter(Counter::Kills), 0);
    }

    #[test]
    fn palette_wraps() {
        assert_eq!(PlayerColor::for_slot(0), PlayerColor::for_slot(4));
        assert_eq!(PlayerColor::default(), PlayerColor::PALETTE[0]);
    }
}
