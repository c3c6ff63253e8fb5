//! Store floor geometry for the Freshgrid simulation.
//!
//! This crate models the physical floor: a fixed grid of cells, the registry
//! mapping cells to the cargo standing on them, and the static zones carved
//! out of the floor at start-up (the conveyor's no-drop band, the incinerator
//! danger band, and the freshness-immune safe band).
//!
//! # Modules
//!
//! - [`error`] -- Error types for grid operations.
//! - [`grid`] -- [`SpatialGrid`]: coordinate transforms and occupancy.
//! - [`zones`] -- Band layout computed once from the grid dimensions.
//! - [`conveyor`] -- Planning of line pushes used by the conveyor spawner.

pub mod conveyor;
pub mod error;
pub mod grid;
pub mod zones;

// Re-export primary types at crate root.
pub use conveyor::{LinePush, Shift, plan_line_push};
pub use error::GridError;
pub use grid::{GridConfig, Registration, SpatialGrid};
pub use zones::{ZoneConfig, ZoneLayout};
