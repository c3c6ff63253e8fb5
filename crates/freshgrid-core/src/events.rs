//! Events raised by the simulation.
//!
//! The simulation appends to its log as things happen (during a tick, or
//! from handling calls between ticks); the driver drains the log once per
//! step into the [`TickSummary`](crate::runner::TickSummary).

use freshgrid_types::{CargoId, CargoState, GameOverReason, GridCoordinate, ShelfId, Weather};
use serde::Serialize;

/// Freshness taken from one neighbour by a wet burst.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WetHit {
    /// The damaged neighbour.
    pub target: CargoId,
    /// Freshness removed before clamping.
    pub amount: f32,
}

/// Something observable that happened in the simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimEvent {
    /// A cargo was created and placed.
    Spawned {
        /// The new cargo.
        cargo: CargoId,
        /// Where it was placed.
        coord: GridCoordinate,
        /// Item name, if the cargo has data.
        item: Option<String>,
    },

    /// A cargo left `Normal`.
    StateChanged {
        /// The cargo.
        cargo: CargoId,
        /// Previous state.
        from: CargoState,
        /// New state.
        to: CargoState,
        /// Where it stood, if on the grid.
        coord: Option<GridCoordinate>,
    },

    /// A spoiled cargo radiated stench onto a neighbour.
    StenchApplied {
        /// The spoiled cargo.
        source: CargoId,
        /// The neighbour receiving the stack.
        target: CargoId,
        /// The neighbour's stack count afterwards.
        stacks: u32,
    },

    /// A frozen cargo melted and soaked its neighbours.
    WetBurst {
        /// The melted cargo.
        source: CargoId,
        /// Where it stood.
        coord: GridCoordinate,
        /// Damage dealt, one entry per affected neighbour.
        hits: Vec<WetHit>,
    },

    /// A cargo was moved from one cell to another.
    Moved {
        /// The cargo.
        cargo: CargoId,
        /// Previous cell.
        from: GridCoordinate,
        /// New cell.
        to: GridCoordinate,
    },

    /// A registration overwrote a cell, evicting its occupant.
    Displaced {
        /// The evicted cargo. It is now off the grid.
        cargo: CargoId,
        /// The cargo that took the cell.
        by: CargoId,
        /// The contested cell.
        coord: GridCoordinate,
    },

    /// A cargo was picked up.
    PickedUp {
        /// The cargo.
        cargo: CargoId,
        /// Where it stood.
        coord: GridCoordinate,
    },

    /// A carried cargo was put down.
    Dropped {
        /// The cargo.
        cargo: CargoId,
        /// Where it now stands.
        coord: GridCoordinate,
    },

    /// A cargo left the simulation for good.
    Consumed {
        /// The cargo.
        cargo: CargoId,
    },

    /// A cargo was stocked onto a shelf.
    Stocked {
        /// The cargo, now consumed.
        cargo: CargoId,
        /// The shelf.
        shelf: ShelfId,
        /// Price stored on the shelf.
        price: u32,
    },

    /// A cargo landed in the danger band.
    Incinerated {
        /// The cargo.
        cargo: CargoId,
        /// The danger-band cell.
        coord: GridCoordinate,
    },

    /// The game ended.
    GameOver {
        /// Why.
        reason: GameOverReason,
    },

    /// The schedule changed the weather.
    WeatherChanged {
        /// Previous weather.
        from: Weather,
        /// New weather.
        to: Weather,
    },
}
