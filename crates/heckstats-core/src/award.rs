use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// Statistics players are ranked under at session end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Offense,
    LeastOffense,
    FriendlyFire,
    LeastFriendlyFire,
    DamageTaken,
    LeastDamageTaken,
    Deaths,
    LeastDeaths,
    ShieldBreaker,
    HighestPoint,
    LowestPoint,
    WebSwings,
    LeastWebSwings,
    SwingTime,
    AirTime,
    LeastAirTime,
    AliveTime,
    LeastAliveTime,
    KillStreak,
    SoloStreak,
    WaveClutches,
    WeaponVariety,
    EnemyVariety,
}

impl Category {
    pub const ALL: [Category; 23] = [
        Category::Offense,
        Category::LeastOffense,
        Category::FriendlyFire,
        Category::LeastFriendlyFire,
        Category::DamageTaken,
        Category::LeastDamageTaken,
        Category::Deaths,
        Category::LeastDeaths,
        Category::ShieldBreaker,
        Category::HighestPoint,
        Category::LowestPoint,
        Category::WebSwings,
        Category::LeastWebSwings,
        Category::SwingTime,
        Category::AirTime,
        Category::LeastAirTime,
        Category::AliveTime,
        Category::LeastAliveTime,
        Category::KillStreak,
        Category::SoloStreak,
        Category::WaveClutches,
        Category::WeaponVariety,
        Category::EnemyVariety,
    ];
}

/// A title bound to one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Award {
    pub player_id: PlayerId,
    pub player_name: String,
    pub title: String,
    pub description: String,
    /// Leaderships this award was derived from, sorted.
    pub categories: Vec<Category>,
    pub base_priority: i32,
    /// Priority after rebalancing; awards are ordered by this, descending.
    pub priority: i32,
}

impl Award {
    /// True when this award's categories are a strict subset of `other`'s.
    pub fn is_dominated_by(&self, other: &Award) -> bool {
        self.categories.len() < other.categories.len()
            && self
                .categories
                .iter()
                .all(|c| other.categories.contains(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn award(categories: &[Category]) -> Award {
        Award {
            player_id: 1,
            player_name: "P1".to_string(),
            title: "T".to_string(),
            description: String::new(),
            categories: categories.to_vec(),
            base_priority: 0,
            priority: 0,
        }
    }

    #[test]
    fn strict_subset_is_dominated() {
        let small = award(&[Category::Offense]);
        let big = award(&[Category::Offense, Category::HighestPoint]);
        assert!(small.is_dominated_by(&big));
        assert!(!big.is_dominated_by(&small));
    }

    #[test]
    fn equal_sets_do_not_dominate() {
        let a = award(&[Category::Offense, Category::AirTime]);
        let b = award(&[Category::AirTime, Category::Offense]);
        assert!(!a.is_dominated_by(&b));
        assert!(!b.is_dominated_by(&a));
    }

    #[test]
    fn disjoint_sets_do_not_dominate() {
        let a = award(&[Category::Deaths]);
        let b = award(&[Category::Offense, Category::AirTime]);
        assert!(!a.is_dominated_by(&b));
    }

    #[test]
    fn all_lists_every_category_once() {
        let mut seen = Category::ALL.to_vec();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), Category::ALL.len());
    }
}
