//! Tunable rules for cargo evolution.
//!
//! [`CargoRules`] bundles every threshold the per-tick logic consults so
//! that the simulation, tests, and configuration can override them
//! together. Defaults match the shipped game balance.

use serde::Deserialize;

/// Thresholds, intervals, and damage amounts for cargo evolution.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CargoRules {
    /// Ticks between stench stacks radiated by a spoiled cargo (default: 10).
    #[serde(default = "default_stench_interval_ticks")]
    pub stench_interval_ticks: u32,

    /// Stench stacks at which a normal cargo spoils outright (default: 5).
    #[serde(default = "default_stench_spoil_threshold")]
    pub stench_spoil_threshold: u32,

    /// Freshness a melting frozen cargo takes from refrigerated neighbours
    /// (default: 40).
    #[serde(default = "default_wet_damage_refrigerated")]
    pub wet_damage_refrigerated: f32,

    /// Freshness a melting frozen cargo takes from any other non-room-temperature
    /// neighbour (default: 20).
    #[serde(default = "default_wet_damage_other")]
    pub wet_damage_other: f32,

    /// Consecutive over-chilled ticks that earn one freeze stack (default: 10).
    #[serde(default = "default_freeze_window_ticks")]
    pub freeze_window_ticks: u32,

    /// Freeze stacks at which the cargo bursts (default: 3).
    #[serde(default = "default_freeze_burst_stacks")]
    pub freeze_burst_stacks: u32,

    /// Nominal full freshness. Anything above it is over-chilled (default: 100).
    #[serde(default = "default_nominal_freshness")]
    pub nominal_freshness: f32,

    /// Extra decay factor for fully enclosed food in the rainy season
    /// (default: 3).
    #[serde(default = "default_rainy_enclosure_multiplier")]
    pub rainy_enclosure_multiplier: f32,
}

impl Default for CargoRules {
    fn default() -> Self {
        Self {
            stench_interval_ticks: default_stench_interval_ticks(),
            stench_spoil_threshold: default_stench_spoil_threshold(),
            wet_damage_refrigerated: default_wet_damage_refrigerated(),
            wet_damage_other: default_wet_damage_other(),
            freeze_window_ticks: default_freeze_window_ticks(),
            freeze_burst_stacks: default_freeze_burst_stacks(),
            nominal_freshness: default_nominal_freshness(),
            rainy_enclosure_multiplier: default_rainy_enclosure_multiplier(),
        }
    }
}

const fn default_stench_interval_ticks() -> u32 {
    10
}

const fn default_stench_spoil_threshold() -> u32 {
    5
}

const fn default_wet_damage_refrigerated() -> f32 {
    40.0
}

const fn default_wet_damage_other() -> f32 {
    20.0
}

const fn default_freeze_window_ticks() -> u32 {
    10
}

const fn default_freeze_burst_stacks() -> u32 {
    3
}

const fn default_nominal_freshness() -> f32 {
    100.0
}

const fn default_rainy_enclosure_multiplier() -> f32 {
    3.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let rules = CargoRules::default();
        assert_eq!(rules.stench_interval_ticks, 10);
        assert_eq!(rules.stench_spoil_threshold, 5);
        assert_eq!(rules.wet_damage_refrigerated, 40.0);
        assert_eq!(rules.wet_damage_other, 20.0);
        assert_eq!(rules.freeze_window_ticks, 10);
        assert_eq!(rules.freeze_burst_stacks, 3);
        assert_eq!(rules.nominal_freshness, 100.0);
        assert_eq!(rules.rainy_enclosure_multiplier, 3.0);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let rules: CargoRules = serde_yml::from_str("stench_interval_ticks: 4").unwrap();
        assert_eq!(rules.stench_interval_ticks, 4);
        assert_eq!(rules.freeze_burst_stacks, 3);
    }
}
