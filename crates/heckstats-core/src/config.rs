use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default config file, read from the working directory.
pub const CONFIG_FILE: &str = "heckstats.toml";

#[derive(Debug)]
pub enum ConfigError {
    Parse(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "config parse error: {e}"),
            Self::Invalid(e) => write!(f, "invalid config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level engine configuration, loaded from `heckstats.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub ledger: LedgerConfig,
    pub titles: TitleConfig,
    pub catalog: CatalogConfig,
}

/// Dedup ledger windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Both ledgers are wiped once this much time has passed since the
    /// previous wipe.
    pub clear_interval_secs: f32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            clear_interval_secs: 1.0,
        }
    }
}

impl LedgerConfig {
    /// Falls back to the default window when the configured value is not a
    /// usable interval.
    pub fn clear_interval(&self) -> Duration {
        interval_from_secs(self.clear_interval_secs)
            .unwrap_or_else(|| Duration::from_secs_f32(LedgerConfig::default().clear_interval_secs))
    }
}

/// A positive, representable number of seconds.
fn interval_from_secs(secs: f32) -> Option<Duration> {
    Duration::try_from_secs_f32(secs)
        .ok()
        .filter(|d| !d.is_zero())
}

/// Title engine tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleConfig {
    /// Priority added to an award per award held by somebody else.
    pub rebalance_weight: i32,
    /// Altitude at which the highest-point award is upgraded.
    pub high_altitude_threshold: f32,
    /// Keep only the first N awards after sorting. 0 keeps everything.
    pub max_awards: usize,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            rebalance_weight: 5,
            high_altitude_threshold: 100.0,
            max_awards: 0,
        }
    }
}

/// Additions to the built-in entity tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub killable: Vec<String>,
    pub display_names: HashMap<String, String>,
    pub roller_min_struts: HashMap<String, u32>,
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if interval_from_secs(self.ledger.clear_interval_secs).is_none() {
            return Err(ConfigError::Invalid(format!(
                "ledger.clear_interval_secs must be a positive duration, got {}",
                self.ledger.clear_interval_secs
            )));
        }
        if self.titles.rebalance_weight < 0 {
            return Err(ConfigError::Invalid(
                "titles.rebalance_weight must be >= 0".to_string(),
            ));
        }
        if !self.titles.high_altitude_threshold.is_finite() {
            return Err(ConfigError::Invalid(
                "titles.high_altitude_threshold must be finite".to_string(),
            ));
        }
        if let Some((name, _)) = self
            .catalog
            .roller_min_struts
            .iter()
            .find(|(_, n)| **n == 0)
        {
            return Err(ConfigError::Invalid(format!(
                "catalog.roller_min_struts.{name} must be > 0"
            )));
        }
        Ok(())
    }

    /// Load from `HECKSTATS_CONFIG` or `heckstats.toml`, then apply env var
    /// overrides. Missing or broken files fall back to defaults.
    pub fn load() -> Self {
        let path = std::env::var("HECKSTATS_CONFIG").unwrap_or_else(|_| CONFIG_FILE.to_string());
        let mut config = match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from {path}");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to load {path}: {e}, using defaults");
                    EngineConfig::default()
                },
            },
            Err(_) => {
                tracing::debug!("No {path} found, using defaults");
                EngineConfig::default()
            },
        };

        if let Ok(val) = std::env::var("HECKSTATS_LEDGER_CLEAR_SECS")
            && !config.override_clear_interval(&val)
        {
            tracing::warn!("Ignoring HECKSTATS_LEDGER_CLEAR_SECS={val}");
        }

        config
    }

    /// Apply a ledger interval given as text. Returns false, leaving the
    /// config unchanged, if it is not a positive representable duration.
    pub fn override_clear_interval(&mut self, val: &str) -> bool {
        match val.trim().parse::<f32>() {
            Ok(secs) if interval_from_secs(secs).is_some() => {
                self.ledger.clear_interval_secs = secs;
                true
            },
            _ => false,
        }
    }
}
