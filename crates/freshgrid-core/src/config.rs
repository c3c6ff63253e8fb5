//! Configuration loading and typed config structures for the Freshgrid
//! simulation.
//!
//! The canonical configuration lives in `freshgrid-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure, and provides a loader that reads and validates the file.
//! Every section is optional; an empty document yields the shipped store.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use freshgrid_cargo::CargoRules;
use freshgrid_types::{ItemCategory, ItemDefinition, StorageAttribute, Weather};
use freshgrid_world::{GridConfig, ZoneConfig};
use serde::Deserialize;

use crate::catalog;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but is not usable.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `freshgrid-config.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Floor dimensions and placement.
    #[serde(default)]
    pub grid: GridConfig,

    /// Danger, no-drop, and safe band sizes.
    #[serde(default)]
    pub zones: ZoneConfig,

    /// Cargo evolution thresholds.
    #[serde(default)]
    pub cargo: CargoRules,

    /// Tick pacing and run length.
    #[serde(default)]
    pub time: TimeConfig,

    /// Weather by store day. Days not listed are `Normal`.
    #[serde(default = "default_weather_schedule")]
    pub weather_schedule: BTreeMap<u32, Weather>,

    /// Conveyor spawner settings.
    #[serde(default)]
    pub spawner: SpawnerConfig,

    /// Item catalog. Defaults to the built-in convenience-store items.
    #[serde(default = "default_items")]
    pub items: Vec<ItemConfig>,

    /// Cargo placed on the floor before the first tick.
    #[serde(default)]
    pub placements: Vec<PlacementConfig>,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            zones: ZoneConfig::default(),
            cargo: CargoRules::default(),
            time: TimeConfig::default(),
            weather_schedule: default_weather_schedule(),
            spawner: SpawnerConfig::default(),
            items: default_items(),
            placements: Vec::new(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the cross-field constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(invalid("grid width and height must be at least 1"));
        }
        if !(self.grid.cell_size.is_finite() && self.grid.cell_size > 0.0) {
            return Err(invalid("grid cell_size must be a positive number"));
        }
        if self.time.ticks_per_day == 0 {
            return Err(invalid("time.ticks_per_day must be at least 1"));
        }
        if self.time.max_days == 0 {
            return Err(invalid("time.max_days must be at least 1"));
        }
        if self.cargo.stench_interval_ticks == 0 || self.cargo.freeze_window_ticks == 0 {
            return Err(invalid("cargo intervals must be at least 1 tick"));
        }
        if self.spawner.enabled && self.spawner.interval_ticks == 0 {
            return Err(invalid("spawner.interval_ticks must be at least 1"));
        }
        if self.items.is_empty() {
            return Err(invalid("the item catalog must not be empty"));
        }

        let mut names = BTreeSet::new();
        for item in &self.items {
            if !names.insert(item.name.as_str()) {
                return Err(invalid(format!("duplicate item name '{}'", item.name)));
            }
            if item.max_freshness.is_some_and(|max| !(max.is_finite() && max >= 0.0)) {
                return Err(invalid(format!(
                    "item '{}' max_freshness must be a non-negative number",
                    item.name
                )));
            }
            if !(item.decay_rate.is_finite() && item.decay_rate >= 0.0) {
                return Err(invalid(format!(
                    "item '{}' decay_rate must be a non-negative number",
                    item.name
                )));
            }
        }

        let unknown = self
            .placements
            .iter()
            .find_map(|p| {
                p.item
                    .as_deref()
                    .filter(|item| !names.contains(item))
                    .map(|item| (p, item))
            });
        if let Some((placement, item)) = unknown {
            return Err(invalid(format!(
                "placement at ({}, {}) names unknown item '{item}'",
                placement.x, placement.y
            )));
        }

        Ok(())
    }

    /// Resolve the item catalog into shareable definitions.
    pub fn item_definitions(&self) -> Vec<ItemDefinition> {
        self.items.iter().map(ItemConfig::to_definition).collect()
    }
}

fn invalid(reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.into(),
    }
}

fn default_weather_schedule() -> BTreeMap<u32, Weather> {
    BTreeMap::from([
        (2, Weather::HeatWave),
        (4, Weather::RainySeason),
        (6, Weather::ColdWave),
    ])
}

fn default_items() -> Vec<ItemConfig> {
    catalog::default_items()
        .into_iter()
        .map(|def| ItemConfig {
            name: def.name,
            attribute: def.attribute,
            category: def.category,
            max_freshness: Some(def.max_freshness),
            base_price: def.base_price,
            decay_rate: def.decay_rate,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Tick pacing and run length.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimeConfig {
    /// Real-time milliseconds per tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Ticks in one store day.
    #[serde(default = "default_ticks_per_day")]
    pub ticks_per_day: u64,

    /// Number of store days in a run.
    #[serde(default = "default_max_days")]
    pub max_days: u32,

    /// Hard stop after this many ticks, if set.
    #[serde(default)]
    pub max_ticks: Option<u64>,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            ticks_per_day: default_ticks_per_day(),
            max_days: default_max_days(),
            max_ticks: None,
        }
    }
}

const fn default_tick_interval_ms() -> u64 {
    1000
}

const fn default_ticks_per_day() -> u64 {
    810
}

const fn default_max_days() -> u32 {
    14
}

// ---------------------------------------------------------------------------
// Spawner
// ---------------------------------------------------------------------------

/// Conveyor spawner settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpawnerConfig {
    /// Whether conveyor waves run at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Ticks between waves.
    #[serde(default = "default_spawn_interval_ticks")]
    pub interval_ticks: u64,

    /// Rows fed per wave, centred on the floor's horizontal midline.
    #[serde(default = "default_spawn_rows")]
    pub rows: u32,

    /// Seed for item selection.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ticks: default_spawn_interval_ticks(),
            rows: default_spawn_rows(),
            seed: default_seed(),
        }
    }
}

const fn default_true() -> bool {
    true
}

const fn default_spawn_interval_ticks() -> u64 {
    5
}

const fn default_spawn_rows() -> u32 {
    5
}

const fn default_seed() -> u64 {
    42
}

// ---------------------------------------------------------------------------
// Items and placements
// ---------------------------------------------------------------------------

/// One catalog entry as written in configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemConfig {
    /// Unique item name.
    pub name: String,

    /// Storage attribute.
    #[serde(default)]
    pub attribute: StorageAttribute,

    /// Product category.
    #[serde(default)]
    pub category: ItemCategory,

    /// Freshness ceiling. Defaults per attribute (101 for chilled goods,
    /// 100 otherwise).
    #[serde(default)]
    pub max_freshness: Option<f32>,

    /// Sale price.
    #[serde(default = "default_base_price")]
    pub base_price: u32,

    /// Freshness lost per tick at a multiplier of 1.
    #[serde(default = "default_decay_rate")]
    pub decay_rate: f32,
}

impl ItemConfig {
    /// Build the runtime definition, filling attribute defaults.
    pub fn to_definition(&self) -> ItemDefinition {
        let def = ItemDefinition::new(self.name.clone(), self.attribute, self.category)
            .with_base_price(self.base_price)
            .with_decay_rate(self.decay_rate);
        match self.max_freshness {
            Some(max) => def.with_max_freshness(max),
            None => def,
        }
    }
}

const fn default_base_price() -> u32 {
    ItemDefinition::DEFAULT_BASE_PRICE
}

const fn default_decay_rate() -> f32 {
    ItemDefinition::DEFAULT_DECAY_RATE
}

/// A cargo placed before the first tick.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlacementConfig {
    /// Catalog item name. Omit to place an inert cargo.
    #[serde(default)]
    pub item: Option<String>,

    /// Column.
    pub x: i32,

    /// Row.
    pub y: i32,
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,

    /// Log a full cargo snapshot every N ticks. Zero disables it.
    #[serde(default = "default_snapshot_interval_ticks")]
    pub snapshot_interval_ticks: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            snapshot_interval_ticks: default_snapshot_interval_ticks(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_snapshot_interval_ticks() -> u64 {
    100
}
