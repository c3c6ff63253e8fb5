//! Weather decision tables.
//!
//! Each weather condition maps a cargo's attribute and proximity flags to a
//! signed decay multiplier: positive values decay, negative values recover,
//! zero freezes freshness in place. The tables are independent; none is
//! derived from another.
//!
//! Room-temperature cargo is exempt from every table. That exemption is
//! enforced once by the caller ([`decay_multiplier`]) rather than repeated
//! here, so the tables below are only ever consulted for the other four
//! attributes.
//!
//! [`decay_multiplier`]: crate::decay::decay_multiplier

use freshgrid_types::{StorageAttribute, Weather};

/// What a weather table needs to know about a cargo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProximityContext {
    /// Effective storage attribute. Never `RoomTemp` when a table is consulted.
    pub attribute: StorageAttribute,
    /// At least one neighbour radiates heat.
    pub near_heat: bool,
    /// At least one neighbour radiates cold.
    pub near_cold: bool,
}

/// Look up the decay multiplier for `context` under `weather`.
pub const fn evaluate(weather: Weather, context: &ProximityContext) -> f32 {
    match weather {
        Weather::Normal => normal(context),
        Weather::HeatWave => heat_wave(context),
        Weather::RainySeason => rainy_season(context),
        Weather::ColdWave => cold_wave(context),
    }
}

/// Short human-readable description for logs and UI.
pub const fn describe(weather: Weather) -> &'static str {
    match weather {
        Weather::Normal => "ordinary day",
        Weather::HeatWave => "heat wave: unprotected chilled goods decay fast",
        Weather::RainySeason => "rainy season: crowded food spoils fast",
        Weather::ColdWave => "cold wave: chilled goods over-chill",
    }
}

/// Ordinary day.
///
/// | heat | cold | multiplier                          |
/// |------|------|-------------------------------------|
/// | yes  | yes  | 1 (cold protection void)            |
/// | yes  | no   | 2, or 1 for `Heated`                |
/// | no   | yes  | -1 for `Refrigerated`/`Liquid`, else 1 |
/// | no   | no   | 1                                   |
const fn normal(context: &ProximityContext) -> f32 {
    match (context.near_heat, context.near_cold) {
        (true, true) | (false, false) => 1.0,
        (true, false) => {
            if matches!(context.attribute, StorageAttribute::Heated) {
                1.0
            } else {
                2.0
            }
        }
        (false, true) => {
            if context.attribute.is_chilled() {
                -1.0
            } else {
                1.0
            }
        }
    }
}

/// Heat wave.
///
/// `Heated` cargo is unaffected (1). Otherwise:
///
/// | heat | cold | multiplier                 |
/// |------|------|----------------------------|
/// | yes  | yes  | 3 (cold protection void)   |
/// | yes  | no   | 5                          |
/// | no   | yes  | 1 (protected by the cold)  |
/// | no   | no   | 3                          |
const fn heat_wave(context: &ProximityContext) -> f32 {
    if matches!(context.attribute, StorageAttribute::Heated) {
        return 1.0;
    }
    match (context.near_heat, context.near_cold) {
        (true, true) | (false, false) => 3.0,
        (true, false) => 5.0,
        (false, true) => 1.0,
    }
}

/// Rainy season. The crowding penalty is applied on top by the caller.
///
/// | heat | cold | multiplier           |
/// |------|------|----------------------|
/// | yes  | yes  | 1                    |
/// | yes  | no   | 2, or 1 for `Heated` |
/// | no   | yes  | -1                   |
/// | no   | no   | 1                    |
const fn rainy_season(context: &ProximityContext) -> f32 {
    match (context.near_heat, context.near_cold) {
        (true, true) | (false, false) => 1.0,
        (true, false) => {
            if matches!(context.attribute, StorageAttribute::Heated) {
                1.0
            } else {
                2.0
            }
        }
        (false, true) => -1.0,
    }
}

/// Cold wave.
///
/// `Refrigerated`/`Liquid`: 1 near heat, otherwise -1 (they over-chill).
/// Everything else: -1 near cold without heat, otherwise 0.
const fn cold_wave(context: &ProximityContext) -> f32 {
    if context.attribute.is_chilled() {
        return if context.near_heat { 1.0 } else { -1.0 };
    }
    if context.near_cold && !context.near_heat {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    const NON_ROOM_TEMP: [StorageAttribute; 4] = [
        StorageAttribute::Refrigerated,
        StorageAttribute::Frozen,
        StorageAttribute::Heated,
        StorageAttribute::Liquid,
    ];

    fn ctx(attribute: StorageAttribute, near_heat: bool, near_cold: bool) -> ProximityContext {
        ProximityContext {
            attribute,
            near_heat,
            near_cold,
        }
    }

    #[test]
    fn normal_table() {
        use StorageAttribute::{Frozen, Heated, Liquid, Refrigerated};
        assert_eq!(evaluate(Weather::Normal, &ctx(Frozen, false, false)), 1.0);
        assert_eq!(evaluate(Weather::Normal, &ctx(Frozen, true, false)), 2.0);
        assert_eq!(evaluate(Weather::Normal, &ctx(Heated, true, false)), 1.0);
        assert_eq!(evaluate(Weather::Normal, &ctx(Refrigerated, false, true)), -1.0);
        assert_eq!(evaluate(Weather::Normal, &ctx(Liquid, false, true)), -1.0);
        assert_eq!(evaluate(Weather::Normal, &ctx(Frozen, false, true)), 1.0);
        assert_eq!(evaluate(Weather::Normal, &ctx(Refrigerated, true, true)), 1.0);
    }

    #[test]
    fn heat_wave_table() {
        use StorageAttribute::{Frozen, Heated, Liquid, Refrigerated};
        assert_eq!(evaluate(Weather::HeatWave, &ctx(Frozen, false, false)), 3.0);
        assert_eq!(evaluate(Weather::HeatWave, &ctx(Refrigerated, true, false)), 5.0);
        assert_eq!(evaluate(Weather::HeatWave, &ctx(Liquid, false, true)), 1.0);
        assert_eq!(evaluate(Weather::HeatWave, &ctx(Liquid, true, true)), 3.0);
        for (heat, cold) in [(false, false), (true, false), (false, true), (true, true)] {
            assert_eq!(evaluate(Weather::HeatWave, &ctx(Heated, heat, cold)), 1.0);
        }
    }

    #[test]
    fn rainy_season_table() {
        use StorageAttribute::{Frozen, Heated, Refrigerated};
        assert_eq!(evaluate(Weather::RainySeason, &ctx(Frozen, false, true)), -1.0);
        assert_eq!(evaluate(Weather::RainySeason, &ctx(Refrigerated, true, false)), 2.0);
        assert_eq!(evaluate(Weather::RainySeason, &ctx(Heated, true, false)), 1.0);
        assert_eq!(evaluate(Weather::RainySeason, &ctx(Refrigerated, true, true)), 1.0);
        assert_eq!(evaluate(Weather::RainySeason, &ctx(Refrigerated, false, false)), 1.0);
    }

    #[test]
    fn cold_wave_table() {
        use StorageAttribute::{Frozen, Heated, Liquid, Refrigerated};
        assert_eq!(evaluate(Weather::ColdWave, &ctx(Refrigerated, false, false)), -1.0);
        assert_eq!(evaluate(Weather::ColdWave, &ctx(Liquid, true, true)), 1.0);
        assert_eq!(evaluate(Weather::ColdWave, &ctx(Frozen, false, true)), -1.0);
        assert_eq!(evaluate(Weather::ColdWave, &ctx(Frozen, true, true)), 0.0);
        assert_eq!(evaluate(Weather::ColdWave, &ctx(Heated, false, false)), 0.0);
    }

    #[test]
    fn heat_plus_cold_never_recovers() {
        for weather in [Weather::Normal, Weather::HeatWave, Weather::RainySeason] {
            for attribute in NON_ROOM_TEMP {
                assert!(evaluate(weather, &ctx(attribute, true, true)) > 0.0);
            }
        }
        for attribute in NON_ROOM_TEMP {
            assert!(evaluate(Weather::ColdWave, &ctx(attribute, true, true)) >= 0.0);
        }
    }

    #[test]
    fn every_weather_has_a_description() {
        for weather in [
            Weather::Normal,
            Weather::HeatWave,
            Weather::RainySeason,
            Weather::ColdWave,
        ] {
            assert!(!describe(weather).is_empty());
        }
    }
}
