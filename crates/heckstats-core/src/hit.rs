use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// Stable host identity of an enemy or composite enemy.
pub type EntityId = u64;

/// Host identity of a short-lived projectile or thrown object.
pub type ObjectId = u64;

/// A sub-part of a composite "roller" enemy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollerPart {
    /// Identity of the roller brain that owns this strut.
    pub brain_id: EntityId,
    /// Object name of the brain, used for the strut threshold and kill tally.
    pub brain_name: String,
    /// Struts still active at the moment of the hit, this one included.
    pub active_struts: u32,
}

/// What the damaged object turned out to be, as resolved by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetKind {
    /// Attached to a player health component.
    Player {
        player_id: PlayerId,
        root_name: String,
    },
    /// Has an enemy brain ancestor.
    Enemy {
        enemy_id: EntityId,
        #[serde(default)]
        roller: Option<RollerPart>,
    },
    /// Anything else the host forwarded (scenery, props).
    Other,
}

/// Target side of a damage event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitTarget {
    pub name: String,
    pub kind: TargetKind,
    #[serde(default)]
    pub shielded: bool,
    /// Clock reading until which the target cannot be hurt.
    #[serde(default)]
    pub immune_until: Option<Duration>,
}

impl HitTarget {
    pub fn player(player_id: PlayerId, root_name: impl Into<String>) -> Self {
        let root_name = root_name.into();
        Self {
            name: root_name.clone(),
            kind: TargetKind::Player {
                player_id,
                root_name,
            },
            shielded: false,
            immune_until: None,
        }
    }

    pub fn enemy(enemy_id: EntityId, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TargetKind::Enemy {
                enemy_id,
                roller: None,
            },
            shielded: false,
            immune_until: None,
        }
    }

    pub fn roller_strut(strut_id: EntityId, name: impl Into<String>, roller: RollerPart) -> Self {
        Self {
            name: name.into(),
            kind: TargetKind::Enemy {
                enemy_id: strut_id,
                roller: Some(roller),
            },
            shielded: false,
            immune_until: None,
        }
    }

    pub fn with_shield(mut self) -> Self {
        self.shielded = true;
        self
    }

    pub fn immune_until(mut self, until: Duration) -> Self {
        self.immune_until = Some(until);
        self
    }

    /// Name looked up in the killable catalog: the player's root object for
    /// player parts, the object's own name otherwise.
    pub fn trackable_name(&self) -> &str {
        match &self.kind {
            TargetKind::Player { root_name, .. } => root_name,
            _ => &self.name,
        }
    }

    pub fn is_immune(&self, now: Duration) -> bool {
        self.immune_until.is_some_and(|until| now < until)
    }
}

/// Source of a damage event before ownership resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Attacker {
    /// Damage dealt by something attached to a player.
    Player(PlayerId),
    /// Damage dealt by a detached projectile; owner comes from the registry.
    Object(ObjectId),
    /// The host could not name a source.
    Unknown,
}
