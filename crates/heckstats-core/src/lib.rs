pub mod award;
pub mod catalog;
pub mod config;
pub mod events;
pub mod hit;
pub mod player;
pub mod session;
pub mod snapshot;
pub mod time;
pub mod timer;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::time::Duration;

    use uuid::Uuid;

    use crate::player::{PlayerColor, PlayerId, PlayerRecord};
    use crate::session::{SessionMode, SessionPhase, SessionState};
    use crate::snapshot::Snapshot;
    use crate::timer::Stopwatch;

    /// A fresh record with a palette colour and zeroed stats.
    pub fn make_record(id: PlayerId, name: &str) -> PlayerRecord {
        PlayerRecord::new(
            id,
            name.to_string(),
            PlayerColor::for_slot(id as usize),
            Duration::ZERO,
        )
    }

    /// A stopped stopwatch holding `secs`.
    pub fn stopped_secs(secs: f64) -> Stopwatch {
        Stopwatch {
            accumulated: Duration::from_secs_f64(secs),
            running_since: None,
        }
    }

    /// A finished survival snapshot over the given players, no awards yet.
    pub fn snapshot_with(players: Vec<PlayerRecord>) -> Snapshot {
        Snapshot {
            session_id: Uuid::nil(),
            mode: SessionMode::Survival,
            session: SessionState {
                phase: SessionPhase::Inactive,
                paused: false,
                started_at: Some(Duration::ZERO),
                last_duration: Duration::from_secs(300),
            },
            players,
            enemy_kills: 0,
            waves_survived: 0,
            maps: Vec::new(),
            perks: Vec::new(),
            awards: Vec::new(),
        }
    }

    /// Two-player fixture: player 1 dominates the fight, player 2 barely
    /// took part.
    pub fn dominant_duo() -> Snapshot {
        let mut p1 = make_record(1, "Alpha");
        p1.stats.kills = 10;
        p1.stats.highest_altitude = Some(40.0);
        p1.stats.alive_time = stopped_secs(280.0);
        p1.stats.airborne_time = stopped_secs(20.0);
        p1.stats.weapon_hits.insert("Shotgun".to_string(), 10);

        let mut p2 = make_record(2, "Beta");
        p2.stats.kills = 1;
        p2.stats.deaths = 3;
        p2.stats.shields_lost = 2;
        p2.stats.highest_altitude = Some(12.0);
        p2.stats.alive_time = stopped_secs(120.0);
        p2.stats.airborne_time = stopped_secs(5.0);
        p2.stats.weapon_hits.insert("Disc".to_string(), 1);

        snapshot_with(vec![p1, p2])
    }
}
