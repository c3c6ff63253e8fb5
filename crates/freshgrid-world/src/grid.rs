//! The spatial grid: coordinate transforms and the occupancy registry.
//!
//! [`SpatialGrid`] is the single shared mutable resource of the simulation.
//! It maps each cell to at most one [`CargoId`] and answers the
//! neighbourhood queries every cargo makes on every tick.
//!
//! World points map to cells by flooring `(point - origin) / cell_size`;
//! cells map back to the world point at their centre, so the two
//! transforms are exact inverses for every valid cell.

use std::collections::BTreeMap;

use freshgrid_types::{CargoId, GridCoordinate, WorldPoint};
use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::error::GridError;
use crate::zones::{ZoneConfig, ZoneLayout};

/// Grid dimensions and placement, read from configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridConfig {
    /// Number of columns.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Number of rows.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Side length of one cell in world units.
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,

    /// World position of the bottom-left corner of cell `(0, 0)`.
    #[serde(default)]
    pub origin: WorldPoint,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            cell_size: default_cell_size(),
            origin: WorldPoint::default(),
        }
    }
}

const fn default_width() -> u32 {
    12
}

const fn default_height() -> u32 {
    10
}

const fn default_cell_size() -> f32 {
    1.0
}

/// Outcome of a successful [`SpatialGrid::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    /// The cargo that previously stood on the cell and was evicted.
    pub displaced: Option<CargoId>,
    /// Whether the cell lies in the danger band. The cargo is still
    /// registered; reacting to the incineration is the caller's job.
    pub incinerated: bool,
}

/// Fixed-size store floor with an occupancy registry and static zones.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    /// Number of columns.
    width: i32,
    /// Number of rows.
    height: i32,
    /// Side length of one cell in world units.
    cell_size: f32,
    /// World position of the corner of cell `(0, 0)`.
    origin: WorldPoint,
    /// Zone extents, fixed at construction.
    zones: ZoneLayout,
    /// Cell -> cargo standing on it.
    occupants: BTreeMap<GridCoordinate, CargoId>,
}

impl SpatialGrid {
    /// Build an empty grid and compute its zones.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if either dimension is zero
    /// or exceeds `i32::MAX`, or if the cell size is not a positive finite
    /// number.
    pub fn new(config: &GridConfig, zones: &ZoneConfig) -> Result<Self, GridError> {
        let width = dimension(config.width, "width")?;
        let height = dimension(config.height, "height")?;
        if !(config.cell_size.is_finite() && config.cell_size > 0.0) {
            return Err(GridError::InvalidDimensions {
                reason: format!("cell_size must be positive, got {}", config.cell_size),
            });
        }

        Ok(Self {
            width,
            height,
            cell_size: config.cell_size,
            origin: config.origin,
            zones: ZoneLayout::compute(width, height, zones),
            occupants: BTreeMap::new(),
        })
    }

    /// Number of columns.
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Side length of one cell in world units.
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// The resolved zone layout.
    pub const fn zones(&self) -> &ZoneLayout {
        &self.zones
    }

    // -------------------------------------------------------------------
    // Coordinate transforms
    // -------------------------------------------------------------------

    /// Cell containing a world point. The result may be off-grid.
    #[allow(clippy::cast_possible_truncation)]
    pub fn world_to_grid(&self, point: WorldPoint) -> GridCoordinate {
        // `as` saturates on out-of-range floats, which keeps far-away points
        // off-grid instead of wrapping them back on.
        let x = ((point.x - self.origin.x) / self.cell_size).floor() as i32;
        let y = ((point.y - self.origin.y) / self.cell_size).floor() as i32;
        GridCoordinate::new(x, y)
    }

    /// World point at the centre of a cell.
    #[allow(clippy::cast_precision_loss)]
    pub fn grid_to_world_center(&self, coord: GridCoordinate) -> WorldPoint {
        let half = self.cell_size * 0.5;
        WorldPoint::new(
            (coord.x as f32).mul_add(self.cell_size, self.origin.x) + half,
            (coord.y as f32).mul_add(self.cell_size, self.origin.y) + half,
        )
    }

    /// Snap a world point to the centre of the cell containing it.
    pub fn snap(&self, point: WorldPoint) -> (GridCoordinate, WorldPoint) {
        let coord = self.world_to_grid(point);
        (coord, self.grid_to_world_center(coord))
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// Whether `coord` lies inside the grid.
    pub const fn is_valid(&self, coord: GridCoordinate) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    /// Whether a cargo stands on `coord`. Off-grid cells are never occupied.
    pub fn is_occupied(&self, coord: GridCoordinate) -> bool {
        self.occupants.contains_key(&coord)
    }

    /// The cargo standing on `coord`, if any.
    pub fn occupant_at(&self, coord: GridCoordinate) -> Option<CargoId> {
        self.occupants.get(&coord).copied()
    }

    /// Occupied cells among the eight neighbours of `coord`.
    pub fn occupied_neighbors(&self, coord: GridCoordinate) -> Vec<(GridCoordinate, CargoId)> {
        coord
            .neighbors8()
            .filter_map(|cell| self.occupant_at(cell).map(|id| (cell, id)))
            .collect()
    }

    /// Number of the four edge-adjacent cells that are occupied.
    pub fn occupied_cardinal_count(&self, coord: GridCoordinate) -> usize {
        coord
            .cardinal_neighbors()
            .filter(|cell| self.is_occupied(*cell))
            .count()
    }

    /// Whether cargo may be dropped or pushed onto `coord`.
    ///
    /// Independent of occupancy; off-grid cells are never allowed.
    pub fn is_drop_allowed(&self, coord: GridCoordinate) -> bool {
        self.is_valid(coord) && !self.zones.is_no_drop(coord)
    }

    /// Whether `coord` lies in the incinerator band.
    pub fn is_in_danger_zone(&self, coord: GridCoordinate) -> bool {
        self.is_valid(coord) && self.zones.is_danger(coord)
    }

    /// Whether `coord` lies in the freshness-immune band.
    pub fn is_in_safe_zone(&self, coord: GridCoordinate) -> bool {
        self.is_valid(coord) && self.zones.is_safe(coord)
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.occupants.len()
    }

    /// Iterate over `(cell, cargo)` pairs in cell order.
    pub fn occupants(&self) -> impl Iterator<Item = (GridCoordinate, CargoId)> + '_ {
        self.occupants.iter().map(|(coord, id)| (*coord, *id))
    }

    // -------------------------------------------------------------------
    // Registry mutation
    // -------------------------------------------------------------------

    /// Record that `cargo` stands on `coord`.
    ///
    /// Callers are expected to check [`is_occupied`](Self::is_occupied)
    /// first. If the cell is held by a different cargo anyway, that cargo is
    /// evicted and returned in [`Registration::displaced`]; the cell never
    /// holds two cargo.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for an off-grid cell; the registry
    /// is left untouched.
    pub fn register(
        &mut self,
        coord: GridCoordinate,
        cargo: CargoId,
    ) -> Result<Registration, GridError> {
        if !self.is_valid(coord) {
            warn!(%coord, %cargo, "Rejected registration outside the grid");
            return Err(GridError::OutOfBounds(coord));
        }

        let displaced = self
            .occupants
            .insert(coord, cargo)
            .filter(|previous| *previous != cargo);
        if let Some(previous) = displaced {
            warn!(%coord, %cargo, evicted = %previous, "Registration overwrote an occupied cell");
        }

        let incinerated = self.zones.is_danger(coord);
        if incinerated {
            error!(%coord, %cargo, "Cargo registered in the danger zone");
        } else {
            debug!(%coord, %cargo, "Cargo registered");
        }

        Ok(Registration {
            displaced,
            incinerated,
        })
    }

    /// Clear `coord`, returning the cargo that stood there.
    ///
    /// A no-op for empty or off-grid cells.
    pub fn unregister(&mut self, coord: GridCoordinate) -> Option<CargoId> {
        let removed = self.occupants.remove(&coord);
        if let Some(cargo) = removed {
            debug!(%coord, %cargo, "Cargo unregistered");
        }
        removed
    }

    /// Move the cargo on `from` to the empty cell `to`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Vacant`] if `from` is empty,
    /// [`GridError::OutOfBounds`] if `to` is off-grid, or
    /// [`GridError::Occupied`] if `to` is taken. The registry is unchanged
    /// on error.
    pub fn relocate(
        &mut self,
        from: GridCoordinate,
        to: GridCoordinate,
    ) -> Result<Registration, GridError> {
        let cargo = self.occupant_at(from).ok_or(GridError::Vacant(from))?;
        if !self.is_valid(to) {
            return Err(GridError::OutOfBounds(to));
        }
        if let Some(occupant) = self.occupant_at(to) {
            return Err(GridError::Occupied { coord: to, occupant });
        }
        self.unregister(from);
        self.register(to, cargo)
    }
}

/// Convert a configured dimension into a signed cell count.
fn dimension(value: u32, name: &str) -> Result<i32, GridError> {
    if value == 0 {
        return Err(GridError::InvalidDimensions {
            reason: format!("{name} must be at least 1"),
        });
    }
    i32::try_from(value).map_err(|_err| GridError::InvalidDimensions {
        reason: format!("{name} {value} exceeds the supported range"),
    })
}
