//! Per-cargo simulation state for Freshgrid.
//!
//! This crate owns everything that can be decided by looking at one cargo
//! and the flags computed from its neighbourhood: freshness bookkeeping, the
//! one-way state machine, and the weather decision tables. Anything that
//! reaches into a *neighbour's* state (stench, wet bursts) is orchestrated by
//! the simulation in `freshgrid-core`.
//!
//! # Modules
//!
//! - [`cargo`] -- [`CargoEntity`]: freshness, state, and secondary counters.
//! - [`config`] -- [`CargoRules`]: thresholds, intervals, and damage amounts.
//! - [`decay`] -- One tick of decay or recovery for a single cargo.
//! - [`interaction`] -- Heat/cold source classification and crowding checks.
//! - [`transition`] -- Which state a cargo enters when its freshness hits zero.
//! - [`weather`] -- Per-weather decay multiplier tables.

pub mod cargo;
pub mod config;
pub mod decay;
pub mod interaction;
pub mod transition;
pub mod weather;

pub use cargo::{CargoEntity, StateChange};
pub use config::CargoRules;
pub use decay::{DecayContext, DecayOutcome, apply_decay, decay_multiplier};
pub use interaction::Proximity;
pub use transition::{ZeroFreshnessTransition, zero_freshness_transition};
pub use weather::ProximityContext;
