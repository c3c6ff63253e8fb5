//! Enumeration types for the Freshgrid cargo simulation.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Storage attributes
// ---------------------------------------------------------------------------

/// How an item must be stored, and therefore how it reacts to its neighbors.
///
/// The attribute also decides what an item radiates: `Heated` items are heat
/// sources and `Frozen` items are cold sources for their eight neighbors.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum StorageAttribute {
    /// Shelf-stable goods. Never decays from weather or proximity.
    #[default]
    RoomTemp,
    /// Chilled goods. Recover near cold, decay fast near heat.
    Refrigerated,
    /// Frozen goods. Radiate cold; melt into the `Wet` state near heat.
    Frozen,
    /// Warmed goods. Radiate heat.
    Heated,
    /// Drinks and other liquids. Boil into the `HeatedState` near heat.
    Liquid,
}

impl StorageAttribute {
    /// Every attribute, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::RoomTemp,
        Self::Refrigerated,
        Self::Frozen,
        Self::Heated,
        Self::Liquid,
    ];

    /// Default maximum freshness for a freshly defined item of this attribute.
    ///
    /// Chilled goods and liquids carry one point of headroom above nominal so
    /// that over-chilling is observable.
    pub const fn default_max_freshness(self) -> f32 {
        match self {
            Self::Refrigerated | Self::Liquid => 101.0,
            Self::RoomTemp | Self::Frozen | Self::Heated => 100.0,
        }
    }

    /// Whether this attribute recovers freshness when chilled.
    pub const fn is_chilled(self) -> bool {
        matches!(self, Self::Refrigerated | Self::Liquid)
    }
}

// ---------------------------------------------------------------------------
// Item categories
// ---------------------------------------------------------------------------

/// Broad product category.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ItemCategory {
    /// Non-food merchandise.
    General,
    /// Food. Subject to the rainy-season crowding penalty.
    #[default]
    Food,
}

// ---------------------------------------------------------------------------
// Cargo state
// ---------------------------------------------------------------------------

/// Discrete condition of a cargo unit.
///
/// Every cargo starts `Normal`. Transitions are one-directional: once a cargo
/// leaves `Normal` it never returns.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum CargoState {
    /// Sellable, still evolving.
    #[default]
    Normal,
    /// A frozen item that melted and soaked its surroundings.
    Wet,
    /// Rotten. Radiates stench to its neighbors.
    Spoiled,
    /// A liquid that boiled. Radiates heat like a `Heated` item.
    HeatedState,
    /// Over-chilled until the packaging burst.
    FrozenBurst,
}

impl CargoState {
    /// Whether the cargo has left the `Normal` state.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Process-wide weather condition that modulates decay and recovery.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Weather {
    /// Ordinary day.
    #[default]
    Normal,
    /// Heat wave. Unprotected chilled and frozen goods decay much faster.
    HeatWave,
    /// Rainy season. Crowded food spoils faster.
    RainySeason,
    /// Cold wave. Chilled goods recover instead of decaying.
    ColdWave,
}

// ---------------------------------------------------------------------------
// Game over
// ---------------------------------------------------------------------------

/// Why the external game-state collaborator ended the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GameOverReason {
    /// A cargo was registered onto a danger-zone cell and incinerated.
    CargoBurned,
}
