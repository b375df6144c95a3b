use std::cmp::Ordering;
use std::collections::BTreeMap;

use heckstats_core::award::Category;
use heckstats_core::player::{PlayerId, PlayerRecord};

/// Which end of a ranking wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Most,
    Least,
}

/// Secondary key when two players share a value. Always "more is better".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tiebreak {
    AliveTime,
    Kills,
}

pub fn direction(category: Category) -> Direction {
    use Category::*;
    match category {
        LeastOffense | LeastFriendlyFire | LeastDamageTaken | LeastDeaths | LowestPoint
        | LeastWebSwings | LeastAirTime | LeastAliveTime => Direction::Least,
        _ => Direction::Most,
    }
}

/// Time-valued statistics break ties on kills; everything else on alive time.
pub fn tiebreak(category: Category) -> Tiebreak {
    use Category::*;
    match category {
        SwingTime | AirTime | LeastAirTime | AliveTime | LeastAliveTime => Tiebreak::Kills,
        _ => Tiebreak::AliveTime,
    }
}

/// Numeric value of a statistic for one player.
pub fn value(category: Category, player: &PlayerRecord) -> f64 {
    use Category::*;
    let s = &player.stats;
    match category {
        Offense | LeastOffense => f64::from(s.kills),
        FriendlyFire | LeastFriendlyFire => f64::from(s.friendly_kills + s.friendly_shields_hit),
        DamageTaken | LeastDamageTaken => f64::from(s.deaths + s.shields_lost),
        Deaths | LeastDeaths => f64::from(s.deaths),
        ShieldBreaker => f64::from(s.enemy_shields_broken),
        HighestPoint => s
            .highest_altitude
            .map(f64::from)
            .unwrap_or(f64::NEG_INFINITY),
        LowestPoint => s.highest_altitude.map(f64::from).unwrap_or(f64::INFINITY),
        WebSwings | LeastWebSwings => f64::from(s.web_swings),
        SwingTime => s.swing_time.accumulated.as_secs_f64(),
        AirTime | LeastAirTime => s.airborne_time.accumulated.as_secs_f64(),
        AliveTime | LeastAliveTime => s.alive_time.accumulated.as_secs_f64(),
        KillStreak => f64::from(s.max_kill_streak),
        SoloStreak => f64::from(s.max_solo_kill_streak),
        WaveClutches => f64::from(s.wave_clutches),
        WeaponVariety => s.weapon_hits.len() as f64,
        EnemyVariety => s.enemy_kills.len() as f64,
    }
}

/// Whether a leader's value is worth a title. "Most" statistics need
/// something to show for it; altitude needs to have been recorded at all.
pub fn qualifies(category: Category, value: f64) -> bool {
    match category {
        Category::HighestPoint | Category::LowestPoint => value.is_finite(),
        c if direction(c) == Direction::Most => value > 0.0,
        _ => true,
    }
}

fn tiebreak_value(kind: Tiebreak, player: &PlayerRecord) -> f64 {
    match kind {
        Tiebreak::AliveTime => player.stats.alive_time.accumulated.as_secs_f64(),
        Tiebreak::Kills => f64::from(player.stats.kills),
    }
}

/// Ordering under `category`: best player first, then tie-break value,
/// then registration order.
pub fn compare(category: Category, a: &PlayerRecord, b: &PlayerRecord) -> Ordering {
    let (va, vb) = (value(category, a), value(category, b));
    let primary = match direction(category) {
        Direction::Most => vb.total_cmp(&va),
        Direction::Least => va.total_cmp(&vb),
    };
    let kind = tiebreak(category);
    primary
        .then_with(|| tiebreak_value(kind, b).total_cmp(&tiebreak_value(kind, a)))
        .then_with(|| a.id.cmp(&b.id))
}

/// Players ordered best-first under `category`.
pub fn rank(category: Category, players: &[PlayerRecord]) -> Vec<&PlayerRecord> {
    let mut ranked: Vec<&PlayerRecord> = players.iter().collect();
    ranked.sort_by(|a, b| compare(category, a, b));
    ranked
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leader {
    pub player_id: PlayerId,
    pub value: f64,
}

/// First-ranked player for every category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatLeaders {
    leaders: BTreeMap<Category, Leader>,
}

impl StatLeaders {
    pub fn compute(players: &[PlayerRecord]) -> Self {
        let leaders = Category::ALL
            .iter()
            .filter_map(|&category| {
                let best = *rank(category, players).first()?;
                Some((
                    category,
                    Leader {
                        player_id: best.id,
                        value: value(category, best),
                    },
                ))
            })
            .collect();
        Self { leaders }
    }

    pub fn get(&self, category: Category) -> Option<Leader> {
        self.leaders.get(&category).copied()
    }

    pub fn led_by(&self, player_id: PlayerId) -> impl Iterator<Item = Category> + '_ {
        self.leaders
            .iter()
            .filter(move |(_, l)| l.player_id == player_id)
            .map(|(c, _)| *c)
    }
}
