//! Shared type definitions for the Freshgrid cargo simulation.
//!
//! This crate is the single source of truth for the value types passed
//! between the grid, the per-cargo state machine, and the simulation driver.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe sequential identifiers for cargo and shelves
//! - [`enums`] -- Storage attributes, item categories, cargo states, weather
//! - [`structs`] -- Grid coordinates, world points, item definitions, snapshots

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{CargoState, GameOverReason, ItemCategory, StorageAttribute, Weather};
pub use ids::{CargoId, ShelfId};
pub use structs::{CargoSnapshot, Direction, GridCoordinate, ItemDefinition, WorldPoint};
