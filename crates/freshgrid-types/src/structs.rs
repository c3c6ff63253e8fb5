//! Core value structs shared across the Freshgrid workspace.

use serde::{Deserialize, Serialize};

use crate::enums::{CargoState, ItemCategory, StorageAttribute};
use crate::ids::CargoId;

// ---------------------------------------------------------------------------
// Grid geometry
// ---------------------------------------------------------------------------

/// Integer cell address on the store floor.
///
/// A coordinate is only meaningful relative to a grid; validity
/// (`0 <= x < width`, `0 <= y < height`) is checked by the grid itself.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GridCoordinate {
    /// Column index.
    pub x: i32,
    /// Row index.
    pub y: i32,
}

/// Offsets of the eight surrounding cells, row by row from the bottom left.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

impl GridCoordinate {
    /// Create a coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return the coordinate shifted by `(dx, dy)`, or `None` on overflow.
    pub const fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        match (self.x.checked_add(dx), self.y.checked_add(dy)) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }

    /// Return the adjacent coordinate in `direction`, or `None` on overflow.
    pub const fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }

    /// The eight surrounding coordinates (diagonals included).
    ///
    /// Coordinates are not bounds-checked against any grid.
    pub fn neighbors8(self) -> impl Iterator<Item = Self> {
        NEIGHBOR_OFFSETS
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// The four edge-adjacent coordinates (up, down, left, right).
    pub fn cardinal_neighbors(self) -> impl Iterator<Item = Self> {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| self.step(direction))
    }
}

impl core::fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four cardinal directions on the grid. `Up` is `+y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards `+y`.
    Up,
    /// Towards `-y`.
    Down,
    /// Towards `-x`.
    Left,
    /// Towards `+x`.
    Right,
}

impl Direction {
    /// Every direction.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit `(dx, dy)` step for this direction.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// The opposite direction.
    pub const fn reverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Continuous position in world units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
}

impl WorldPoint {
    /// Create a point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Item definitions
// ---------------------------------------------------------------------------

/// Immutable reference data describing a kind of cargo.
///
/// Looked up once when a cargo is created and shared by every cargo of the
/// same kind. Never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Display name, unique within a catalog.
    pub name: String,
    /// Storage attribute.
    pub attribute: StorageAttribute,
    /// Product category.
    pub category: ItemCategory,
    /// Freshness ceiling. New cargo starts here.
    pub max_freshness: f32,
    /// Sale price in whole currency units.
    pub base_price: u32,
    /// Freshness lost per tick at a multiplier of 1.
    pub decay_rate: f32,
}

impl ItemDefinition {
    /// Default sale price for a new definition.
    pub const DEFAULT_BASE_PRICE: u32 = 100;

    /// Default freshness lost per tick.
    pub const DEFAULT_DECAY_RATE: f32 = 1.0;

    /// Create a definition with the attribute's default maximum freshness,
    /// the default price and the default decay rate.
    pub fn new(
        name: impl Into<String>,
        attribute: StorageAttribute,
        category: ItemCategory,
    ) -> Self {
        Self {
            name: name.into(),
            attribute,
            category,
            max_freshness: attribute.default_max_freshness(),
            base_price: Self::DEFAULT_BASE_PRICE,
            decay_rate: Self::DEFAULT_DECAY_RATE,
        }
    }

    /// Override the maximum freshness.
    #[must_use]
    pub fn with_max_freshness(mut self, max_freshness: f32) -> Self {
        self.max_freshness = max_freshness;
        self
    }

    /// Override the decay rate.
    #[must_use]
    pub fn with_decay_rate(mut self, decay_rate: f32) -> Self {
        self.decay_rate = decay_rate;
        self
    }

    /// Override the sale price.
    #[must_use]
    pub fn with_base_price(mut self, base_price: u32) -> Self {
        self.base_price = base_price;
        self
    }
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// Read-only view of one cargo for UI, shelf and customer systems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoSnapshot {
    /// The cargo.
    pub id: CargoId,
    /// Item name, or `None` while the cargo has no definition.
    pub item: Option<String>,
    /// The item's own storage attribute.
    pub attribute: StorageAttribute,
    /// Current condition.
    pub state: CargoState,
    /// Current freshness.
    pub freshness: f32,
    /// Freshness ceiling.
    pub max_freshness: f32,
    /// Cell the cargo occupies, or `None` while carried.
    pub position: Option<GridCoordinate>,
    /// Accumulated stench stacks.
    pub stench_stack: u32,
    /// Accumulated over-chill stacks.
    pub freeze_stack: u32,
}
