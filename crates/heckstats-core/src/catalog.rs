use std::collections::{HashMap, HashSet};

use crate::config::CatalogConfig;

/// Root object name of every player spider.
pub const PLAYER_ROOT_NAME: &str = "PlayerSpider";

/// Strut threshold used for roller brains missing from the table.
pub const DEFAULT_MIN_STRUTS: u32 = 3;

/// Enemy object names and their display names.
const ENEMY_NAMES: &[(&str, &str)] = &[
    ("EnemyWasp", "Wasp"),
    ("EnemyWaspShielded", "Shielded Wasp"),
    ("EnemyHornet", "Hornet"),
    ("EnemyWhisp", "Whisp"),
    ("EnemyMeleeWhisp", "Melee Whisp"),
    ("EnemyPowerWhisp", "Power Whisp"),
    ("EnemyKhepri", "Khepri"),
    ("EnemyHothead", "Hothead"),
    ("EnemyLaserCube", "Laser Cube"),
    ("RollerStrut", "Roller"),
    ("RollerBrain", "Roller"),
    ("RollerBrainLarge", "Big Roller"),
];

/// Minimum live struts a roller brain needs before it collapses.
const ROLLER_MIN_STRUTS: &[(&str, u32)] = &[("RollerBrain", 3), ("RollerBrainLarge", 5)];

/// Static lookup tables for what can die and what it is called.
#[derive(Debug, Clone)]
pub struct EntityCatalog {
    killable: HashSet<String>,
    display_names: HashMap<String, String>,
    roller_min_struts: HashMap<String, u32>,
}

impl Default for EntityCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl EntityCatalog {
    pub fn builtin() -> Self {
        let mut killable: HashSet<String> = ENEMY_NAMES
            .iter()
            .map(|(name, _)| (*name).to_string())
            .collect();
        killable.insert(PLAYER_ROOT_NAME.to_string());
        Self {
            killable,
            display_names: ENEMY_NAMES
                .iter()
                .map(|(name, display)| ((*name).to_string(), (*display).to_string()))
                .collect(),
            roller_min_struts: ROLLER_MIN_STRUTS
                .iter()
                .map(|(name, n)| ((*name).to_string(), *n))
                .collect(),
        }
    }

    /// Built-in tables with config entries merged over them.
    pub fn with_overrides(config: &CatalogConfig) -> Self {
        let mut catalog = Self::builtin();
        for name in &config.killable {
            catalog.killable.insert(canonical_name(name).to_string());
        }
        for (name, display) in &config.display_names {
            let name = canonical_name(name).to_string();
            catalog.killable.insert(name.clone());
            catalog.display_names.insert(name, display.clone());
        }
        for (name, n) in &config.roller_min_struts {
            catalog
                .roller_min_struts
                .insert(canonical_name(name).to_string(), *n);
        }
        catalog
    }

    pub fn is_killable(&self, name: &str) -> bool {
        self.killable.contains(canonical_name(name))
    }

    /// Display name for the kill tally. Unknown names fall back to the
    /// canonical object name.
    pub fn display_name<'a>(&'a self, name: &'a str) -> &'a str {
        let name = canonical_name(name);
        self.display_names
            .get(name)
            .map(String::as_str)
            .unwrap_or(name)
    }

    pub fn roller_min_struts(&self, brain_name: &str) -> u32 {
        self.roller_min_struts
            .get(canonical_name(brain_name))
            .copied()
            .unwrap_or(DEFAULT_MIN_STRUTS)
    }
}

/// Strip the engine's instantiation suffix: `"EnemyWasp(Clone)"` and
/// `"EnemyWasp (Clone)"` both become `"EnemyWasp"`.
pub fn canonical_name(name: &str) -> &str {
    let mut name = name.trim();
    while let Some(stripped) = name.strip_suffix("(Clone)") {
        name = stripped.trim_end();
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn players_and_enemies_are_killable() {
        let catalog = EntityCatalog::builtin();
        assert!(catalog.is_killable(PLAYER_ROOT_NAME));
        assert!(catalog.is_killable("EnemyWasp"));
        assert!(catalog.is_killable("EnemyWasp(Clone)"));
        assert!(!catalog.is_killable("Crate"));
        assert!(!catalog.is_killable(""));
    }

    #[test]
    fn display_name_lookup() {
        let catalog = EntityCatalog::builtin();
        assert_eq!(catalog.display_name("EnemyWaspShielded (Clone)"), "Shielded Wasp");
        assert_eq!(catalog.display_name("RollerBrain"), "Roller");
        assert_eq!(catalog.display_name("MysteryBug(Clone)"), "MysteryBug");
    }

    #[test]
    fn roller_thresholds() {
        let catalog = EntityCatalog::builtin();
        assert_eq!(catalog.roller_min_struts("RollerBrain"), 3);
        assert_eq!(catalog.roller_min_struts("RollerBrainLarge(Clone)"), 5);
        assert_eq!(catalog.roller_min_struts("SomethingNew"), DEFAULT_MIN_STRUTS);
    }

    #[test]
    fn overrides_merge_over_builtin() {
        let mut config = CatalogConfig::default();
        config.killable.push("TrainingDummy".to_string());
        config
            .display_names
            .insert("EnemyMoth".to_string(), "Moth".to_string());
        config
            .roller_min_struts
            .insert("RollerBrain".to_string(), 2);
        let catalog = EntityCatalog::with_overrides(&config);
        assert!(catalog.is_killable("TrainingDummy"));
        assert!(catalog.is_killable("EnemyMoth"));
        assert_eq!(catalog.display_name("EnemyMoth"), "Moth");
        assert_eq!(catalog.roller_min_struts("RollerBrain"), 2);
        assert!(catalog.is_killable("EnemyWasp"));
    }

    #[test]
    fn canonical_name_strips_nested_clone_suffixes() {
        assert_eq!(canonical_name("EnemyWasp(Clone)(Clone)"), "EnemyWasp");
        assert_eq!(canonical_name("  EnemyWasp  "), "EnemyWasp");
    }
}
