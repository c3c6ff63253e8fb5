//! The zero-freshness transition table.
//!
//! Evaluated exactly once, the moment a `Normal` cargo's freshness first
//! reaches zero:
//!
//! | attribute      | near heat | new state     | wet burst |
//! |----------------|-----------|---------------|-----------|
//! | `Frozen`       | any       | `Wet`         | yes       |
//! | `Refrigerated` | yes       | `Spoiled`     | no        |
//! | `Liquid`       | yes       | `HeatedState` | no        |
//! | anything else  | any       | `Spoiled`     | no        |

use freshgrid_types::{CargoState, StorageAttribute};

/// Result of looking up the zero-freshness table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroFreshnessTransition {
    /// State the cargo enters.
    pub state: CargoState,
    /// Whether the cargo soaks its eight neighbours on entry.
    pub wet_burst: bool,
}

/// Look up the transition for a cargo of `attribute` whose freshness just hit
/// zero.
pub const fn zero_freshness_transition(
    attribute: StorageAttribute,
    near_heat: bool,
) -> ZeroFreshnessTransition {
    match (attribute, near_heat) {
        (StorageAttribute::Frozen, _) => ZeroFreshnessTransition {
            state: CargoState::Wet,
            wet_burst: true,
        },
        (StorageAttribute::Liquid, true) => ZeroFreshnessTransition {
            state: CargoState::HeatedState,
            wet_burst: false,
        },
        // Refrigerated near heat spoils, and so does everything left over.
        _ => ZeroFreshnessTransition {
            state: CargoState::Spoiled,
            wet_burst: false,
        },
    }
}
