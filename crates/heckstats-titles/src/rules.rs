use std::time::Duration;

use smallvec::SmallVec;

use heckstats_core::award::Category;
use heckstats_core::config::TitleConfig;
use heckstats_core::player::PlayerRecord;

use Category::*;

/// Builds the description shown under a title from the holder's record.
pub type Describe = fn(&PlayerRecord) -> String;

/// Name/priority swap applied when the holder's value reaches a threshold.
#[derive(Debug, Clone)]
pub struct Upgrade {
    pub category: Category,
    pub threshold: f64,
    pub name: &'static str,
    pub priority: i32,
    pub describe: Describe,
}

/// A title and the leaderships that earn it.
#[derive(Debug, Clone)]
pub struct TitleRule {
    pub name: &'static str,
    pub categories: SmallVec<[Category; 5]>,
    pub priority: i32,
    pub describe: Describe,
    /// Holder's value in this category must be at least this much.
    pub min_value: Option<(Category, f64)>,
    pub upgrade: Option<Upgrade>,
}

impl TitleRule {
    pub fn new(
        name: &'static str,
        categories: &[Category],
        priority: i32,
        describe: Describe,
    ) -> Self {
        debug_assert!((1..=5).contains(&categories.len()));
        Self {
            name,
            categories: SmallVec::from_slice(categories),
            priority,
            describe,
            min_value: None,
            upgrade: None,
        }
    }

    pub fn at_least(mut self, category: Category, min: f64) -> Self {
        self.min_value = Some((category, min));
        self
    }

    pub fn upgraded(mut self, upgrade: Upgrade) -> Self {
        self.upgrade = Some(upgrade);
        self
    }
}

/// "1m 05s" / "42s".
pub fn clock_label(d: Duration) -> String {
    let total = d.as_secs();
    if total >= 60 {
        format!("{}m {:02}s", total / 60, total % 60)
    } else {
        format!("{total}s")
    }
}

fn altitude(p: &PlayerRecord) -> f32 {
    p.stats.highest_altitude.unwrap_or_default()
}

/// The full title table. Order within a category count is the tie order
/// for equal final priorities.
pub fn catalog(config: &TitleConfig) -> Vec<TitleRule> {
    vec![
        // Single leaderships.
        TitleRule::new("Destroyer", &[Offense], 20, |p| {
            format!("Most kills: {}", p.stats.kills)
        }),
        TitleRule::new("Pacifist", &[LeastOffense], 5, |p| {
            format!("Only {} kills all session", p.stats.kills)
        }),
        TitleRule::new("Traitor", &[FriendlyFire], 15, |p| {
            format!(
                "{} friendly kills and {} friendly shields popped",
                p.stats.friendly_kills, p.stats.friendly_shields_hit
            )
        }),
        TitleRule::new("Team Player", &[LeastFriendlyFire], 6, |_| {
            "Least friendly fire".to_string()
        }),
        TitleRule::new("Punching Bag", &[DamageTaken], 10, |p| {
            format!(
                "Took the most punishment: {} deaths, {} shields lost",
                p.stats.deaths, p.stats.shields_lost
            )
        }),
        TitleRule::new("Untouchable", &[LeastDamageTaken], 12, |_| {
            "Took the least damage".to_string()
        }),
        TitleRule::new("Martyr", &[Deaths], 6, |p| {
            format!("Died {} times", p.stats.deaths)
        }),
        TitleRule::new("Nine Lives", &[LeastDeaths], 8, |p| {
            format!("Only died {} times", p.stats.deaths)
        }),
        TitleRule::new("Shield Breaker", &[ShieldBreaker], 12, |p| {
            format!("Broke {} enemy shields", p.stats.enemy_shields_broken)
        }),
        TitleRule::new("Skybound", &[HighestPoint], 8, |p| {
            format!("Highest point reached: {:.1}", altitude(p))
        })
        .upgraded(Upgrade {
            category: HighestPoint,
            threshold: f64::from(config.high_altitude_threshold),
            name: "Astronaut",
            priority: 18,
            describe: |p| format!("Touched the sky at {:.1}", altitude(p)),
        }),
        TitleRule::new("Grounded", &[LowestPoint], 4, |p| {
            format!("Never climbed above {:.1}", altitude(p))
        }),
        TitleRule::new("Web Slinger", &[WebSwings], 10, |p| {
            format!("Swung {} webs", p.stats.web_swings)
        }),
        TitleRule::new("Swing Dancer", &[SwingTime], 8, |p| {
            format!(
                "Spent {} hanging from webs",
                clock_label(p.stats.swing_time.accumulated)
            )
        }),
        TitleRule::new("Frequent Flyer", &[AirTime], 8, |p| {
            format!(
                "Spent {} in the air",
                clock_label(p.stats.airborne_time.accumulated)
            )
        }),
        TitleRule::new("Earthbound", &[LeastAirTime], 3, |_| {
            "Kept their feet on the ground".to_string()
        }),
        TitleRule::new("Survivor", &[AliveTime], 10, |p| {
            format!(
                "Stayed alive for {}",
                clock_label(p.stats.alive_time.accumulated)
            )
        }),
        TitleRule::new("Early Exit", &[LeastAliveTime], 4, |p| {
            format!(
                "Alive for only {}",
                clock_label(p.stats.alive_time.accumulated)
            )
        }),
        TitleRule::new("Rampage", &[KillStreak], 14, |p| {
            format!("Kill streak of {}", p.stats.max_kill_streak)
        })
        .at_least(KillStreak, 3.0),
        TitleRule::new("Lone Wolf", &[SoloStreak], 16, |p| {
            format!(
                "{} kills in a row as the last spider standing",
                p.stats.max_solo_kill_streak
            )
        })
        .at_least(SoloStreak, 2.0),
        TitleRule::new("Clutch", &[WaveClutches], 18, |p| {
            format!("Carried the team through {} waves alone", p.stats.wave_clutches)
        }),
        TitleRule::new("Arsenal", &[WeaponVariety], 9, |p| {
            format!("Scored hits with {} different weapons", p.stats.weapon_hits.len())
        })
        .at_least(WeaponVariety, 2.0),
        TitleRule::new("Exterminator", &[EnemyVariety], 9, |p| {
            format!("Killed {} kinds of enemy", p.stats.enemy_kills.len())
        })
        .at_least(EnemyVariety, 2.0),
        // Two leaderships.
        TitleRule::new("Glass Cannon", &[Offense, DamageTaken], 25, |p| {
            format!(
                "Most kills ({}) and most damage taken",
                p.stats.kills
            )
        }),
        TitleRule::new("Spectator", &[LeastOffense, LeastDamageTaken], 12, |_| {
            "Stayed out of trouble, and out of the fight".to_string()
        }),
        TitleRule::new("Turret", &[Offense, LeastAirTime], 22, |p| {
            format!("{} kills without leaving the ground", p.stats.kills)
        }),
        TitleRule::new("Headhunter", &[Offense, KillStreak], 26, |p| {
            format!(
                "Most kills ({}) and the longest streak ({})",
                p.stats.kills, p.stats.max_kill_streak
            )
        }),
        TitleRule::new("Acrobat", &[WebSwings, AirTime], 20, |p| {
            format!(
                "{} swings and {} airborne",
                p.stats.web_swings,
                clock_label(p.stats.airborne_time.accumulated)
            )
        }),
        TitleRule::new("Double Agent", &[Offense, FriendlyFire], 24, |p| {
            format!(
                "Friend and foe alike: {} kills, {} friendly kills",
                p.stats.kills, p.stats.friendly_kills
            )
        }),
        TitleRule::new("Guardian Angel", &[LeastFriendlyFire, LeastDamageTaken], 18, |_| {
            "Hurt nobody and nobody hurt them".to_string()
        }),
        TitleRule::new("Siege Engine", &[Offense, ShieldBreaker], 24, |p| {
            format!(
                "{} kills and {} shields broken",
                p.stats.kills, p.stats.enemy_shields_broken
            )
        }),
        TitleRule::new("Immortal", &[AliveTime, LeastDeaths], 22, |p| {
            format!(
                "Alive for {} with only {} deaths",
                clock_label(p.stats.alive_time.accumulated),
                p.stats.deaths
            )
        }),
        TitleRule::new("Clutch King", &[WaveClutches, SoloStreak], 30, |p| {
            format!(
                "{} clutch waves and a solo streak of {}",
                p.stats.wave_clutches, p.stats.max_solo_kill_streak
            )
        }),
        // Three leaderships.
        TitleRule::new("Spider-Man", &[WebSwings, AirTime, HighestPoint], 32, |p| {
            format!(
                "Swung {} webs up to {:.1}",
                p.stats.web_swings,
                altitude(p)
            )
        }),
        TitleRule::new("Warlord", &[Offense, KillStreak, ShieldBreaker], 35, |p| {
            format!(
                "{} kills, a {} kill streak and {} broken shields",
                p.stats.kills, p.stats.max_kill_streak, p.stats.enemy_shields_broken
            )
        }),
        TitleRule::new("Chaos Agent", &[FriendlyFire, DamageTaken, Deaths], 28, |p| {
            format!(
                "Hurt friends {} times and died {} times",
                p.stats.friendly_kills + p.stats.friendly_shields_hit,
                p.stats.deaths
            )
        }),
        TitleRule::new(
            "Last One Standing",
            &[AliveTime, LeastDeaths, WaveClutches],
            34,
            |p| {
                format!(
                    "Clutched {} waves and outlived everyone",
                    p.stats.wave_clutches
                )
            },
        ),
        // Four leaderships.
        TitleRule::new(
            "God Complex",
            &[Offense, LeastDamageTaken, HighestPoint, LeastFriendlyFire],
            45,
            |p| {
                format!(
                    "{} kills from {:.1} up, untouched and without hurting a friend",
                    p.stats.kills,
                    altitude(p)
                )
            },
        ),
        TitleRule::new(
            "Menace",
            &[Offense, FriendlyFire, KillStreak, DamageTaken],
            40,
            |p| {
                format!(
                    "{} kills, {} of them friends, and a trail of destruction",
                    p.stats.kills + p.stats.friendly_kills,
                    p.stats.friendly_kills
                )
            },
        ),
        TitleRule::new(
            "Tourist",
            &[LeastOffense, LeastAirTime, LowestPoint, LeastWebSwings],
            26,
            |_| "Came for the sights".to_string(),
        ),
        // Five leaderships.
        TitleRule::new(
            "Apex Predator",
            &[Offense, KillStreak, SoloStreak, LeastDamageTaken, AliveTime],
            55,
            |p| {
                format!(
                    "{} kills, a {} streak and barely a scratch",
                    p.stats.kills, p.stats.max_kill_streak
                )
            },
        ),
        TitleRule::new(
            "Untethered",
            &[WebSwings, SwingTime, AirTime, HighestPoint, WeaponVariety],
            50,
            |p| {
                format!(
                    "{} swings, {} weapons and a peak of {:.1}",
                    p.stats.web_swings,
                    p.stats.weapon_hits.len(),
                    altitude(p)
                )
            },
        ),
    ]
}
