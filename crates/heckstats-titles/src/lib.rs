//! End-of-session titles.
//!
//! Pure function of a [`Snapshot`]: rank every player under every
//! [`Category`], fire each rule whose categories are all led by the same
//! player, drop awards a player already holds a superset of, rebalance
//! priorities so titles spread across players, and sort.

pub mod rules;
pub mod stats;

use heckstats_core::award::Award;
use heckstats_core::config::TitleConfig;
use heckstats_core::snapshot::Snapshot;

use rules::TitleRule;
use stats::StatLeaders;

/// Titles need at least this many players to compare.
pub const MIN_PLAYERS: usize = 2;

/// Awards for a finished session, highest priority first.
pub fn compute_awards(snapshot: &Snapshot, config: &TitleConfig) -> Vec<Award> {
    evaluate_rules(snapshot, &rules::catalog(config), config)
}

/// Run an arbitrary rule table through the matcher.
pub fn evaluate_rules(snapshot: &Snapshot, rules: &[TitleRule], config: &TitleConfig) -> Vec<Award> {
    if snapshot.players.len() < MIN_PLAYERS {
        tracing::debug!(
            players = snapshot.players.len(),
            "Not enough players for titles"
        );
        return Vec::new();
    }

    let leaders = StatLeaders::compute(&snapshot.players);

    let mut ordered: Vec<&TitleRule> = rules.iter().collect();
    ordered.sort_by_key(|r| r.categories.len());

    let mut awards: Vec<Award> = ordered
        .into_iter()
        .filter_map(|rule| evaluate(rule, &leaders, snapshot))
        .collect();

    remove_dominated(&mut awards);
    rebalance(&mut awards, config.rebalance_weight);
    awards.sort_by(|a, b| b.priority.cmp(&a.priority));

    if config.max_awards > 0 {
        awards.truncate(config.max_awards);
    }

    tracing::debug!(session = %snapshot.session_id, awards = awards.len(), "Titles computed");
    awards
}

/// Fire `rule` if one player leads all of its categories.
fn evaluate(rule: &TitleRule, leaders: &StatLeaders, snapshot: &Snapshot) -> Option<Award> {
    let mut holder = None;
    for &category in &rule.categories {
        let leader = leaders.get(category)?;
        if !stats::qualifies(category, leader.value) {
            return None;
        }
        match holder {
            None => holder = Some(leader.player_id),
            Some(id) if id != leader.player_id => return None,
            Some(_) => {},
        }
    }
    let player = snapshot.player(holder?)?;

    if let Some((category, min)) = rule.min_value
        && stats::value(category, player) < min
    {
        return None;
    }

    let (title, priority, describe) = match &rule.upgrade {
        Some(up) if stats::value(up.category, player) >= up.threshold => {
            (up.name, up.priority, up.describe)
        },
        _ => (rule.name, rule.priority, rule.describe),
    };

    let mut categories = rule.categories.to_vec();
    categories.sort();

    Some(Award {
        player_id: player.id,
        player_name: player.display_name.clone(),
        title: title.to_string(),
        description: describe(player),
        categories,
        base_priority: priority,
        priority,
    })
}

/// Drop every award whose categories are a strict subset of another award
/// held by the same player.
pub fn remove_dominated(awards: &mut Vec<Award>) {
    let keep: Vec<bool> = awards
        .iter()
        .map(|a| {
            !awards
                .iter()
                .any(|b| b.player_id == a.player_id && a.is_dominated_by(b))
        })
        .collect();
    let mut keep = keep.into_iter();
    awards.retain(|_| keep.next().unwrap_or(true));
}

/// `priority = base + weight * (awards held by other players)`.
pub fn rebalance(awards: &mut [Award], weight: i32) {
    let total = awards.len();
    let held: Vec<usize> = awards
        .iter()
        .map(|a| awards.iter().filter(|b| b.player_id == a.player_id).count())
        .collect();
    for (award, own) in awards.iter_mut().zip(held) {
        let others = i32::try_from(total - own).unwrap_or(i32::MAX);
        award.priority = award.base_priority.saturating_add(weight.saturating_mul(others));
    }
}
