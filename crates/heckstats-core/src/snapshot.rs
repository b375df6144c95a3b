use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::award::Award;
use crate::player::{PlayerId, PlayerRecord};
use crate::session::{SessionMode, SessionState};

#[derive(Debug)]
pub enum SnapshotError {
    Encode(String),
    Decode(String),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(e) => write!(f, "snapshot encode error: {e}"),
            Self::Decode(e) => write!(f, "snapshot decode error: {e}"),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Frozen copy of everything tracked during one session, taken at stop.
/// Sole input to the title engine and to session logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub session_id: Uuid,
    pub mode: SessionMode,
    pub session: SessionState,
    /// Registration order.
    pub players: Vec<PlayerRecord>,
    pub enemy_kills: u32,
    pub waves_survived: u32,
    pub maps: Vec<String>,
    pub perks: Vec<String>,
    pub awards: Vec<Award>,
}

impl Snapshot {
    pub fn duration(&self) -> Duration {
        self.session.last_duration
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn awards_for(&self, id: PlayerId) -> impl Iterator<Item = &Award> {
        self.awards.iter().filter(move |a| a.player_id == id)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::Encode(e.to_string()))
    }

    pub fn to_msgpack(&self) -> Result<Vec<u8>, SnapshotError> {
        rmp_serde::to_vec_named(self).map_err(|e| SnapshotError::Encode(e.to_string()))
    }

    pub fn from_msgpack(bytes: &[u8]) -> Result<Self, SnapshotError> {
        rmp_serde::from_slice(bytes).map_err(|e| SnapshotError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{make_record, snapshot_with};

    #[test]
    fn msgpack_preserves_snapshot() {
        let mut p1 = make_record(1, "Alpha");
        p1.stats.kills = 3;
        p1.stats
            .enemy_kills
            .insert("Wasp".to_string(), 3);
        p1.stats.highest_altitude = Some(42.5);
        let snap = snapshot_with(vec![p1, make_record(2, "Beta")]);
        let bytes = snap.to_msgpack().unwrap();
        let back = Snapshot::from_msgpack(&bytes).unwrap();
        assert_eq!(snap, back);
    }

    #[test]
    fn decode_garbage_fails() {
        let err = Snapshot::from_msgpack(&[0xc1, 0x00]).unwrap_err();
        assert!(matches!(err, SnapshotError::Decode(_)));
    }

    #[test]
    fn json_contains_player_names() {
        let snap = snapshot_with(vec![make_record(1, "Alpha")]);
        let json = snap.to_json().unwrap();
        assert!(json.contains("\"Alpha\""));
        assert!(json.contains("\"survival\""));
    }

    #[test]
    fn player_lookup() {
        let snap = snapshot_with(vec![make_record(4, "Delta"), make_record(9, "Nine")]);
        assert_eq!(snap.player(9).map(|p| p.display_name.as_str()), Some("Nine"));
        assert!(snap.player(5).is_none());
        assert_eq!(snap.awards_for(4).count(), 0);
    }
}
