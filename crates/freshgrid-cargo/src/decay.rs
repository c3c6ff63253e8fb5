//! One tick of decay or recovery for a single cargo.
//!
//! The signed change applied each tick is
//! `-decay_rate * weather_table(attribute, proximity)`, with two overrides
//! evaluated before the table is consulted:
//!
//! 1. cargo on a safe-band cell does not change at all;
//! 2. cargo whose effective attribute is `RoomTemp` does not change at all.
//!
//! In the rainy season, food whose four edge-adjacent cells are all taken
//! decays `rainy_enclosure_multiplier` times faster. Crowding voids any cold
//! recovery, so the penalty applies to at least the base rate.

use freshgrid_types::{ItemCategory, StorageAttribute, Weather};

use crate::cargo::CargoEntity;
use crate::config::CargoRules;
use crate::weather::{self, ProximityContext};

/// Per-tick inputs that come from outside the cargo itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecayContext {
    /// The active weather.
    pub weather: Weather,
    /// Whether the cargo stands in the safe band.
    pub in_safe_zone: bool,
    /// Whether all four edge-adjacent cells are occupied.
    pub enclosed: bool,
}

/// What happened to a cargo's freshness this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecayOutcome {
    /// No item data; skipped entirely.
    Inert,
    /// Standing in the safe band; freshness frozen.
    SafeZone,
    /// Effective attribute is `RoomTemp`; freshness frozen.
    Immune,
    /// The table was consulted and the change applied.
    Applied {
        /// Signed multiplier used (negative means recovery).
        multiplier: f32,
        /// Freshness change actually applied after clamping.
        change: f32,
    },
}

impl DecayOutcome {
    /// Whether the weather table was consulted this tick.
    pub const fn was_evaluated(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Signed decay multiplier for `cargo` under `context`.
///
/// Zero for room-temperature cargo regardless of weather.
pub fn decay_multiplier(cargo: &CargoEntity, context: &DecayContext, rules: &CargoRules) -> f32 {
    let attribute = cargo.effective_attribute();
    if attribute == StorageAttribute::RoomTemp {
        return 0.0;
    }

    let proximity = cargo.proximity();
    let multiplier = weather::evaluate(
        context.weather,
        &ProximityContext {
            attribute,
            near_heat: proximity.near_heat,
            near_cold: proximity.near_cold,
        },
    );

    if context.weather == Weather::RainySeason
        && context.enclosed
        && cargo.category() == ItemCategory::Food
    {
        multiplier.max(1.0) * rules.rainy_enclosure_multiplier
    } else {
        multiplier
    }
}

/// Apply one tick of decay or recovery to `cargo`.
///
/// The caller must have refreshed the cargo's proximity flags for this tick.
pub fn apply_decay(
    cargo: &mut CargoEntity,
    context: &DecayContext,
    rules: &CargoRules,
) -> DecayOutcome {
    let Some(rate) = cargo.definition().map(|def| def.decay_rate) else {
        return DecayOutcome::Inert;
    };
    if context.in_safe_zone {
        return DecayOutcome::SafeZone;
    }
    if cargo.effective_attribute() == StorageAttribute::RoomTemp {
        return DecayOutcome::Immune;
    }

    let multiplier = decay_multiplier(cargo, context, rules);
    let change = cargo.adjust_freshness(-(rate * multiplier));
    DecayOutcome::Applied { multiplier, change }
}
