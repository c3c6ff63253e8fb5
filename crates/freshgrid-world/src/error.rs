//! Error types for the `freshgrid-world` crate.

use freshgrid_types::{CargoId, GridCoordinate};

/// Errors that can occur during grid operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The coordinate lies outside the grid.
    #[error("coordinate {0} is outside the grid")]
    OutOfBounds(GridCoordinate),

    /// The cell is already taken by another cargo.
    #[error("cell {coord} is occupied by cargo {occupant}")]
    Occupied {
        /// The contested cell.
        coord: GridCoordinate,
        /// The cargo already standing there.
        occupant: CargoId,
    },

    /// The cell holds no cargo.
    #[error("cell {0} is empty")]
    Vacant(GridCoordinate),

    /// The cell belongs to the no-drop band.
    #[error("cargo may not be placed on {0}")]
    DropForbidden(GridCoordinate),

    /// The grid dimensions or cell size cannot form a usable grid.
    #[error("invalid grid dimensions: {reason}")]
    InvalidDimensions {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}
