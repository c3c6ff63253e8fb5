//! Simulation clock, tick cycle, and orchestration for the Freshgrid
//! simulation.
//!
//! This crate wires the floor grid and the per-cargo rules into a running
//! store: it owns the live cargo collection, runs the per-tick scan with its
//! stench and wet-burst cascades, and drives ticks from a clock.
//!
//! # Modules
//!
//! - [`catalog`] -- Built-in convenience-store items and name lookup.
//! - [`clock`] -- Tick counter with day derivation.
//! - [`config`] -- Configuration loading from `freshgrid-config.yaml` into
//!   strongly-typed structs.
//! - [`events`] -- [`SimEvent`] log drained once per step.
//! - [`handling`] -- Picking up, dropping, pushing, and consuming cargo.
//! - [`runner`] -- [`Driver`] single steps and the async run loop.
//! - [`schedule`] -- Day-indexed weather schedule.
//! - [`simulation`] -- [`Simulation`]: live cargo and the per-tick scan.
//! - [`spawner`] -- Conveyor waves that feed cargo in from the side walls.
//! - [`storage`] -- Shelves that accept and sell cargo.
//!
//! [`SimEvent`]: events::SimEvent
//! [`Driver`]: runner::Driver
//! [`Simulation`]: simulation::Simulation

pub mod catalog;
pub mod clock;
pub mod config;
pub mod events;
pub mod handling;
pub mod runner;
pub mod schedule;
pub mod simulation;
pub mod spawner;
pub mod storage;
