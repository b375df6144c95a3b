//! Classifies one damage event into a shield hit, a kill, or nothing, and
//! credits the responsible player.

use std::time::Duration;

use heckstats_core::catalog::EntityCatalog;
use heckstats_core::hit::{Attacker, HitTarget, TargetKind};
use heckstats_core::player::{Counter, PlayerId};

use crate::ledger::{DedupLedger, RollerHealth};
use crate::ownership::OwnershipRegistry;
use crate::tracker::PlayerTracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Target name is not in the killable catalog.
    NotTrackable,
    Immune,
    NoAttacker,
    /// Projectile with no live ownership entry.
    UnknownOwner,
    /// Attacker resolved to a player the tracker does not know.
    UnknownAttacker,
    SelfHit,
    /// Shields on roller struts are not counted.
    RollerShield,
    /// Strut died but the roller is still standing.
    RollerAlive,
    AlreadyCounted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitOutcome {
    Ignored(IgnoreReason),
    ShieldHit {
        attacker: PlayerId,
        /// Set when the shield belonged to a player.
        victim: Option<PlayerId>,
    },
    EnemyKill {
        attacker: PlayerId,
        /// Catalog display name of the enemy type.
        enemy: String,
    },
    PlayerKill {
        attacker: PlayerId,
        victim: PlayerId,
    },
}

impl HitOutcome {
    pub fn is_kill(&self) -> bool {
        matches!(self, Self::EnemyKill { .. } | Self::PlayerKill { .. })
    }
}

/// Borrowed view over the shared ledgers needed to classify a hit.
pub struct HitAttributor<'a> {
    pub catalog: &'a EntityCatalog,
    pub enemy_deaths: &'a DedupLedger,
    pub player_deaths: &'a DedupLedger,
    pub rollers: &'a RollerHealth,
    pub ownership: &'a OwnershipRegistry,
}

impl HitAttributor<'_> {
    pub fn record_hit(
        &self,
        tracker: &mut PlayerTracker,
        target: &HitTarget,
        attacker: Attacker,
        weapon: &str,
        now: Duration,
    ) -> HitOutcome {
        let name = target.trackable_name();
        if !self.catalog.is_killable(name) {
            return HitOutcome::Ignored(IgnoreReason::NotTrackable);
        }
        if target.is_immune(now) {
            tracing::debug!(entity = name, "Hit inside immunity window");
            return HitOutcome::Ignored(IgnoreReason::Immune);
        }

        let attacker = match self.resolve(attacker) {
            Ok(id) => id,
            Err(reason) => return HitOutcome::Ignored(reason),
        };
        if !tracker.contains(attacker) {
            tracing::warn!(player_id = attacker, entity = name, "Ignoring hit credited to unregistered player");
            return HitOutcome::Ignored(IgnoreReason::UnknownAttacker);
        }

        if target.shielded {
            self.shield_hit(tracker, target, attacker, weapon)
        } else {
            self.kill(tracker, target, attacker, weapon, now)
        }
    }

    fn resolve(&self, attacker: Attacker) -> Result<PlayerId, IgnoreReason> {
        match attacker {
            Attacker::Player(id) => Ok(id),
            Attacker::Object(object_id) => self.ownership.owner_of(object_id).ok_or_else(|| {
                tracing::debug!(object_id, "Hit from projectile with no known owner");
                IgnoreReason::UnknownOwner
            }),
            Attacker::Unknown => {
                tracing::debug!("Hit with no attacker");
                Err(IgnoreReason::NoAttacker)
            },
        }
    }

    fn shield_hit(
        &self,
        tracker: &mut PlayerTracker,
        target: &HitTarget,
        attacker: PlayerId,
        weapon: &str,
    ) -> HitOutcome {
        match &target.kind {
            TargetKind::Player { player_id, .. } => {
                if *player_id == attacker {
                    return HitOutcome::Ignored(IgnoreReason::SelfHit);
                }
                tracker.increment(attacker, Counter::FriendlyShieldsHit);
                tracker.increment(*player_id, Counter::ShieldsLost);
                tracker.record_weapon_hit(attacker, weapon);
                tracing::debug!(player_id = attacker, victim = player_id, weapon, "Friendly shield hit");
                HitOutcome::ShieldHit {
                    attacker,
                    victim: Some(*player_id),
                }
            },
            TargetKind::Enemy {
                roller: Some(_), ..
            } => HitOutcome::Ignored(IgnoreReason::RollerShield),
            TargetKind::Enemy { roller: None, .. } | TargetKind::Other => {
                tracker.increment(attacker, Counter::EnemyShieldsBroken);
                tracker.record_weapon_hit(attacker, weapon);
                tracing::debug!(player_id = attacker, entity = %target.name, weapon, "Enemy shield broken");
                HitOutcome::ShieldHit {
                    attacker,
                    victim: None,
                }
            },
        }
    }

    fn kill(
        &self,
        tracker: &mut PlayerTracker,
        target: &HitTarget,
        attacker: PlayerId,
        weapon: &str,
        now: Duration,
    ) -> HitOutcome {
        match &target.kind {
            TargetKind::Player { player_id, .. } => {
                let victim = *player_id;
                if victim == attacker {
                    return HitOutcome::Ignored(IgnoreReason::SelfHit);
                }
                if !self.player_deaths.first_death(victim, now) {
                    return HitOutcome::Ignored(IgnoreReason::AlreadyCounted);
                }
                tracker.increment(attacker, Counter::FriendlyKills);
                tracker.record_weapon_hit(attacker, weapon);
                tracing::info!(player_id = attacker, victim, weapon, "Friendly kill");
                HitOutcome::PlayerKill { attacker, victim }
            },
            TargetKind::Enemy { enemy_id, roller } => {
                let (dedup_id, type_name) = match roller {
                    Some(part) => {
                        let min = self.catalog.roller_min_struts(&part.brain_name);
                        if !self
                            .rollers
                            .strut_destroyed(part.brain_id, part.active_struts, min)
                        {
                            return HitOutcome::Ignored(IgnoreReason::RollerAlive);
                        }
                        (part.brain_id, part.brain_name.as_str())
                    },
                    None => (*enemy_id, target.name.as_str()),
                };
                if !self.enemy_deaths.first_death(dedup_id, now) {
                    return HitOutcome::Ignored(IgnoreReason::AlreadyCounted);
                }
                let enemy = self.catalog.display_name(type_name).to_string();
                tracker.record_enemy_kill(attacker, &enemy);
                tracker.record_weapon_hit(attacker, weapon);
                tracing::debug!(player_id = attacker, enemy = %enemy, weapon, "Enemy kill");
                HitOutcome::EnemyKill { attacker, enemy }
            },
            TargetKind::Other => {
                // Killable by name but carries no identity to dedup on.
                tracing::debug!(entity = %target.name, "Kill on target without an entity id");
                HitOutcome::Ignored(IgnoreReason::NotTrackable)
            },
        }
    }
}
