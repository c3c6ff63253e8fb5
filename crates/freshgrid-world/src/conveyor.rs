//! Line pushes for the conveyor spawner.
//!
//! When the conveyor delivers a new cargo at a wall cell that is already
//! taken, the whole row shuffles inward: the nearest empty cell along the
//! push direction is found, and every cargo between it and the entry moves
//! one step towards it, far end first, so each move lands on a cell that was
//! just vacated. A row with no empty cell rejects the delivery.
//!
//! This module only plans the shuffle; executing it (and reacting to cargo
//! pushed into the danger band) belongs to the simulation.

use freshgrid_types::{CargoId, Direction, GridCoordinate};

use crate::grid::SpatialGrid;

/// One cargo moving one cell along the push direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    /// The cargo being moved.
    pub cargo: CargoId,
    /// Where it stands now.
    pub from: GridCoordinate,
    /// Where it will stand.
    pub to: GridCoordinate,
}

/// A planned row shuffle that frees the entry cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinePush {
    /// The cell that will be free once the shifts are applied.
    pub entry: GridCoordinate,
    /// The empty cell the row shuffles into.
    pub vacancy: GridCoordinate,
    /// Moves in application order: nearest the vacancy first.
    pub shifts: Vec<Shift>,
}

/// Plan the shuffle that frees `entry` by pushing towards `direction`.
///
/// Returns `None` if `entry` is off-grid or every cell from `entry` to the
/// grid edge is occupied. An empty `entry` yields a plan with no shifts.
pub fn plan_line_push(
    grid: &SpatialGrid,
    entry: GridCoordinate,
    direction: Direction,
) -> Option<LinePush> {
    if !grid.is_valid(entry) {
        return None;
    }

    let vacancy = line(entry, direction)
        .take_while(|cell| grid.is_valid(*cell))
        .find(|cell| !grid.is_occupied(*cell))?;

    // Walk back from the vacancy to the entry, shifting each cargo forward.
    let back = direction.reverse();
    let mut shifts = Vec::new();
    let mut to = vacancy;
    while to != entry {
        let Some(from) = to.step(back) else { break };
        if let Some(cargo) = grid.occupant_at(from) {
            shifts.push(Shift { cargo, from, to });
        }
        to = from;
    }

    Some(LinePush {
        entry,
        vacancy,
        shifts,
    })
}

/// Cells from `start` (inclusive) stepping along `direction`.
fn line(start: GridCoordinate, direction: Direction) -> impl Iterator<Item = GridCoordinate> {
    std::iter::successors(Some(start), move |cell| cell.step(direction))
}
