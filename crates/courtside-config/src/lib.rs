//! Configuration system for Courtside.
//!
//! Load contest rules, generation settings and solver termination from TOML
//! or YAML files without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use courtside_config::OptimizerConfig;
//! use std::time::Duration;
//!
//! let config = OptimizerConfig::from_toml_str(r#"
//!     [contest]
//!     salary_cap = 50000
//!
//!     [generation]
//!     lineups = 20
//!     min_unique = 3
//!
//!     [rules]
//!     max_per_team = 4
//!     excluded = ["1002"]
//!
//!     [termination]
//!     seconds_spent_limit = 2
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(2)));
//! assert_eq!(config.contest.slots.len(), 8);
//! assert_eq!(config.generation.lineups, 20);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use courtside_config::OptimizerConfig;
//!
//! let config = OptimizerConfig::load("contest.toml").unwrap_or_default();
//! // Proceeds with the DraftKings NBA classic defaults if the file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use courtside_core::{Category, RosterSlot, RosterSpec, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// DraftKings NBA salary cap.
pub const DEFAULT_SALARY_CAP: u64 = 50_000;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid roster: {0}")]
    Roster(#[from] ValidationError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main optimizer configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct OptimizerConfig {
    /// Contest format: salary limits and roster slots.
    #[serde(default)]
    pub contest: ContestConfig,

    /// How many lineups to build and how different they must be.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Player-level rules.
    #[serde(default)]
    pub rules: RulesConfig,

    /// Termination configuration for each solve.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,
}

impl OptimizerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, choosing YAML for `.yaml`/`.yml`
    /// extensions and TOML otherwise.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the salary cap.
    pub fn with_salary_cap(mut self, cap: u64) -> Self {
        self.contest.salary_cap = cap;
        self
    }

    /// Replaces the roster slots.
    pub fn with_slots(mut self, slots: Vec<SlotConfig>) -> Self {
        self.contest.slots = slots;
        self
    }

    /// Sets the number of lineups to generate.
    pub fn with_lineups(mut self, count: usize) -> Self {
        self.generation.lineups = count;
        self
    }

    /// Sets the minimum number of differing players between lineups.
    pub fn with_min_unique(mut self, min_unique: usize) -> Self {
        self.generation.min_unique = min_unique;
        self
    }

    /// Sets the per-team player limit.
    pub fn with_max_per_team(mut self, max: usize) -> Self {
        self.rules.max_per_team = Some(max);
        self
    }

    /// Sets the per-solve time limit in milliseconds.
    pub fn with_termination_millis(mut self, millis: u64) -> Self {
        self.termination = Some(TerminationConfig {
            millis_spent_limit: Some(millis),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Returns the per-solve time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Returns the per-solve node limit, if configured.
    pub fn node_limit(&self) -> Option<u64> {
        self.termination.as_ref().and_then(|t| t.node_limit)
    }

    /// Builds the roster described by `contest.slots`.
    pub fn roster_spec(&self) -> Result<RosterSpec, ConfigError> {
        let slots = self
            .contest
            .slots
            .iter()
            .map(|s| RosterSlot::new(&s.label, s.accepts.iter().map(Category::new).collect()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RosterSpec::new(slots)?)
    }

    /// Checks the configuration for values no run could use.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] or [`ConfigError::Roster`] describing
    /// the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let roster = self.roster_spec()?;

        if self.contest.salary_cap == 0 {
            return Err(ConfigError::Invalid(
                "salary_cap must be positive".to_string(),
            ));
        }
        if let Some(floor) = self.contest.min_salary {
            if floor > self.contest.salary_cap {
                return Err(ConfigError::Invalid(format!(
                    "min_salary {} exceeds salary_cap {}",
                    floor, self.contest.salary_cap
                )));
            }
        }
        if self.generation.lineups == 0 {
            return Err(ConfigError::Invalid(
                "lineups must be at least 1".to_string(),
            ));
        }
        if self.generation.min_unique == 0 || self.generation.min_unique > roster.len() {
            return Err(ConfigError::Invalid(format!(
                "min_unique must be between 1 and {} (roster size), got {}",
                roster.len(),
                self.generation.min_unique
            )));
        }
        if let Some(exposure) = self.generation.max_exposure {
            if !(exposure > 0.0 && exposure <= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "max_exposure must be in (0, 1], got {}",
                    exposure
                )));
            }
        }
        if self.rules.max_per_team == Some(0) {
            return Err(ConfigError::Invalid(
                "max_per_team must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Contest format.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ContestConfig {
    /// Ceiling on total lineup salary.
    #[serde(default = "default_salary_cap")]
    pub salary_cap: u64,

    /// Floor on total lineup salary.
    #[serde(default)]
    pub min_salary: Option<u64>,

    /// Ordered roster slots.
    #[serde(default = "default_slots")]
    pub slots: Vec<SlotConfig>,
}

impl Default for ContestConfig {
    fn default() -> Self {
        Self {
            salary_cap: DEFAULT_SALARY_CAP,
            min_salary: None,
            slots: default_slots(),
        }
    }
}

fn default_salary_cap() -> u64 {
    DEFAULT_SALARY_CAP
}

fn default_slots() -> Vec<SlotConfig> {
    RosterSpec::draftkings_classic()
        .slots()
        .iter()
        .map(SlotConfig::from)
        .collect()
}

/// One roster slot and the positions it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SlotConfig {
    pub label: String,
    pub accepts: Vec<String>,
}

impl SlotConfig {
    pub fn new(label: &str, accepts: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            accepts: accepts.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl From<&RosterSlot> for SlotConfig {
    fn from(slot: &RosterSlot) -> Self {
        Self {
            label: slot.label().to_string(),
            accepts: slot.accepts().iter().map(|c| c.as_str().to_string()).collect(),
        }
    }
}

/// Lineup generation settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GenerationConfig {
    /// Number of lineups requested.
    #[serde(default = "default_one")]
    pub lineups: usize,

    /// Minimum number of players each lineup must not share with any other.
    #[serde(default = "default_one")]
    pub min_unique: usize,

    /// Largest fraction of lineups a single player may appear in.
    #[serde(default)]
    pub max_exposure: Option<f64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            lineups: 1,
            min_unique: 1,
            max_exposure: None,
        }
    }
}

fn default_one() -> usize {
    1
}

/// Player-level rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RulesConfig {
    /// Maximum players drawn from any single team.
    #[serde(default)]
    pub max_per_team: Option<usize>,

    /// Identifiers of players every lineup must contain.
    #[serde(default)]
    pub locked: Vec<String>,

    /// Identifiers of players no lineup may contain.
    #[serde(default)]
    pub excluded: Vec<String>,
}

/// Termination configuration, applied to each individual solve.
///
/// With no limit set the solve runs until optimality is proved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend per solve.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend per solve.
    pub millis_spent_limit: Option<u64>,

    /// Maximum search nodes per solve.
    pub node_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self.seconds_spent_limit.unwrap_or(0) * 1_000
            + self.millis_spent_limit.unwrap_or(0);
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }
}
