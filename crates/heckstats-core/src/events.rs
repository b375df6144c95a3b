use serde::{Deserialize, Serialize};

use crate::hit::{Attacker, HitTarget, ObjectId};
use crate::player::{PlayerColor, PlayerId};
use crate::session::SessionMode;

/// One inbound call from the host simulation, in serialisable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    PlayerJoined {
        player_id: PlayerId,
        name: String,
        #[serde(default)]
        color: Option<PlayerColor>,
    },
    PlayerLeft {
        player_id: PlayerId,
    },
    Hit {
        target: HitTarget,
        attacker: Attacker,
        weapon: String,
    },
    Death {
        player_id: PlayerId,
    },
    UndoDeath {
        player_id: PlayerId,
    },
    Respawn {
        player_id: PlayerId,
    },
    SessionStart {
        mode: SessionMode,
    },
    SessionStop {
        mode: SessionMode,
    },
    Pause,
    Resume,
    CheckpointReached,
    ColorChanged {
        player_id: PlayerId,
        color: PlayerColor,
    },
    NameChanged {
        player_id: PlayerId,
        name: String,
    },
    MapEntered {
        name: String,
    },
    PerkChosen {
        name: String,
    },
    Altitude {
        player_id: PlayerId,
        altitude: f32,
    },
    WebSwing {
        player_id: PlayerId,
    },
    WebRelease {
        player_id: PlayerId,
    },
    Airborne {
        player_id: PlayerId,
        airborne: bool,
    },
    ProjectileSpawned {
        object_id: ObjectId,
        owner: PlayerId,
    },
    ProjectileDespawned {
        object_id: ObjectId,
    },
}

/// An event stamped with the host clock reading (seconds) it happened at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub at: f64,
    #[serde(flatten)]
    pub event: EngineEvent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hit::TargetKind;

    #[test]
    fn unit_events_parse() {
        let ev: EngineEvent = serde_json::from_str(r#"{"type":"pause"}"#).unwrap();
        assert_eq!(ev, EngineEvent::Pause);
        let ev: EngineEvent = serde_json::from_str(r#"{"type":"checkpoint_reached"}"#).unwrap();
        assert_eq!(ev, EngineEvent::CheckpointReached);
    }

    #[test]
    fn timed_event_flattens_payload() {
        let json = r#"{"at": 12.5, "type": "session_start", "mode": "versus"}"#;
        let ev: TimedEvent = serde_json::from_str(json).unwrap();
        assert!((ev.at - 12.5).abs() < f64::EPSILON);
        assert_eq!(
            ev.event,
            EngineEvent::SessionStart {
                mode: SessionMode::Versus
            }
        );
    }

    #[test]
    fn player_joined_color_is_optional() {
        let ev: EngineEvent =
            serde_json::from_str(r#"{"type":"player_joined","player_id":1,"name":"Ann"}"#)
                .unwrap();
        assert_eq!(
            ev,
            EngineEvent::PlayerJoined {
                player_id: 1,
                name: "Ann".to_string(),
                color: None
            }
        );
    }

    #[test]
    fn hit_event_roundtrip() {
        let ev = EngineEvent::Hit {
            target: HitTarget::enemy(5, "EnemyWasp").with_shield(),
            attacker: Attacker::Player(2),
            weapon: "Shotgun".to_string(),
        };
        let json = serde_json::to_string(&ev).unwrap();
        let back: EngineEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(ev, back);
        if let EngineEvent::Hit { target, .. } = back {
            assert!(matches!(target.kind, TargetKind::Enemy { enemy_id: 5, .. }));
        }
    }

    #[test]
    fn unknown_type_is_rejected() {
        let res = serde_json::from_str::<EngineEvent>(r#"{"type":"explode"}"#);
        assert!(res.is_err());
    }
}
