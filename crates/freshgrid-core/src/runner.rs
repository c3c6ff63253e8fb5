//! Tick driver and simulation loop runner.
//!
//! [`Driver::step`] runs one complete tick: advance the clock, apply the
//! day's weather, run a conveyor wave if one is due, scan every cargo, and
//! drain the event log into a [`TickSummary`]. It is synchronous and fully
//! deterministic for a given configuration.
//!
//! [`run_simulation`] wraps the driver in a paced async loop that stops
//! when:
//!
//! - the configured `max_ticks` has run,
//! - the last tick of the last day has run, or
//! - the game ends (a cargo was incinerated).

use std::time::Duration;

use freshgrid_types::{CargoId, GameOverReason, GridCoordinate, Weather};
use freshgrid_world::{GridError, SpatialGrid};
use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::ItemCatalog;
use crate::clock::{ClockError, SimulationClock};
use crate::config::{ConfigError, SimulationConfig};
use crate::events::SimEvent;
use crate::schedule::WeatherSchedule;
use crate::simulation::{SimError, Simulation, TickReport};
use crate::spawner::ConveyorSpawner;

/// Errors that can occur while building or running the simulation.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The clock could not advance.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// The configuration was rejected.
    #[error("config error: {source}")]
    Config {
        /// The underlying configuration error.
        #[from]
        source: ConfigError,
    },

    /// The floor grid could not be built.
    #[error("grid error: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: GridError,
    },

    /// A simulation operation failed during setup.
    #[error("simulation error: {source}")]
    Simulation {
        /// The underlying simulation error.
        #[from]
        source: SimError,
    },
}

/// Everything that happened during one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// The store day this tick belongs to.
    pub day: u32,
    /// The weather during this tick.
    pub weather: Weather,
    /// Cargo delivered by the conveyor this tick.
    pub spawned: Vec<CargoId>,
    /// Counts from the cargo scan.
    pub report: TickReport,
    /// Live cargo at the end of the tick.
    pub live_cargo: usize,
    /// Events logged since the previous step.
    pub events: Vec<SimEvent>,
    /// Set if the game has ended.
    pub game_over: Option<GameOverReason>,
}

/// Why the run loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SimulationEndReason {
    /// The configured tick limit was reached.
    MaxTicksReached,
    /// The last tick of the last day ran.
    FinalDayComplete,
    /// The game ended.
    GameOver(GameOverReason),
}

/// Result of the simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: SimulationEndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed.
    pub total_ticks: u64,
}

/// Callback invoked after each tick completes.
pub trait TickCallback: Send {
    /// Called after a tick completes.
    fn on_tick(&mut self, summary: &TickSummary, simulation: &Simulation);
}

/// A no-op tick callback.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _simulation: &Simulation) {}
}

/// Owns the simulation and everything that feeds it over time.
#[derive(Debug)]
pub struct Driver {
    /// Time source.
    clock: SimulationClock,
    /// Weather by day.
    schedule: WeatherSchedule,
    /// Conveyor, if enabled.
    spawner: Option<ConveyorSpawner>,
    /// The floor and its cargo.
    simulation: Simulation,
    /// Hard stop, if configured.
    max_ticks: Option<u64>,
}

impl Driver {
    /// Assemble a driver from its parts.
    pub const fn new(
        clock: SimulationClock,
        schedule: WeatherSchedule,
        spawner: Option<ConveyorSpawner>,
        simulation: Simulation,
        max_ticks: Option<u64>,
    ) -> Self {
        Self {
            clock,
            schedule,
            spawner,
            simulation,
            max_ticks,
        }
    }

    /// Build the full store from configuration, including pre-placed cargo.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the configuration is invalid or a
    /// placement is off the grid.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, RunnerError> {
        config.validate()?;

        let grid = SpatialGrid::new(&config.grid, &config.zones)?;
        let mut simulation = Simulation::new(grid, config.cargo.clone());
        let catalog = ItemCatalog::new(config.item_definitions());

        for placement in &config.placements {
            let definition = placement.item.as_deref().and_then(|name| catalog.get(name));
            let coord = GridCoordinate::new(placement.x, placement.y);
            simulation.spawn(definition, coord)?;
        }

        let clock = SimulationClock::new(&config.time)?;
        let schedule = WeatherSchedule::new(config.weather_schedule.clone());
        let spawner = config
            .spawner
            .enabled
            .then(|| ConveyorSpawner::new(&config.spawner, catalog));

        info!(
            width = config.grid.width,
            height = config.grid.height,
            placements = config.placements.len(),
            items = config.items.len(),
            spawner = config.spawner.enabled,
            "Simulation assembled"
        );

        Ok(Self::new(
            clock,
            schedule,
            spawner,
            simulation,
            config.time.max_ticks,
        ))
    }

    /// The clock.
    pub const fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// The simulation.
    pub const fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Run one complete tick.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Clock`] if the tick counter overflows.
    pub fn step(&mut self) -> Result<TickSummary, RunnerError> {
        let tick = self.clock.advance()?;
        let day = self.clock.day();
        let weather = self.schedule.weather_for_day(day);
        self.simulation.set_weather(weather);

        let spawned = match self.spawner.as_mut() {
            Some(spawner) => spawner.on_tick(tick, &mut self.simulation),
            None => Vec::new(),
        };

        let report = self.simulation.tick();
        if report.faults > 0 {
            warn!(tick, faults = report.faults, "Tick completed with faults");
        }

        Ok(TickSummary {
            tick,
            day,
            weather,
            spawned,
            report,
            live_cargo: self.simulation.live_count(),
            events: self.simulation.drain_events(),
            game_over: self.simulation.game_over(),
        })
    }

    /// Why the run should stop after `summary`, if it should.
    pub fn end_reason(&self, summary: &TickSummary) -> Option<SimulationEndReason> {
        if let Some(reason) = summary.game_over {
            return Some(SimulationEndReason::GameOver(reason));
        }
        if self.max_ticks.is_some_and(|max| summary.tick >= max) {
            return Some(SimulationEndReason::MaxTicksReached);
        }
        if self.clock.is_finished() {
            return Some(SimulationEndReason::FinalDayComplete);
        }
        None
    }
}

/// Run the simulation loop until a termination condition is met.
///
/// Sleeps `tick_interval` between ticks; a zero interval runs flat out.
///
/// # Errors
///
/// Returns [`RunnerError`] if a step fails.
pub async fn run_simulation(
    driver: &mut Driver,
    tick_interval: Duration,
    callback: &mut dyn TickCallback,
) -> Result<SimulationResult, RunnerError> {
    let mut total_ticks: u64 = 0;

    info!(
        max_ticks = driver.max_ticks,
        ticks_per_day = driver.clock.ticks_per_day(),
        max_days = driver.clock.max_days(),
        tick_interval_ms = u64::try_from(tick_interval.as_millis()).unwrap_or(u64::MAX),
        "Simulation starting"
    );

    loop {
        let summary = driver.step()?;
        total_ticks = total_ticks.saturating_add(1);

        callback.on_tick(&summary, &driver.simulation);

        if let Some(end_reason) = driver.end_reason(&summary) {
            info!(tick = summary.tick, reason = ?end_reason, "Simulation stopping");
            return Ok(SimulationResult {
                end_reason,
                final_summary: Some(summary),
                total_ticks,
            });
        }

        if !tick_interval.is_zero() {
            tokio::time::sleep(tick_interval).await;
        }
    }
}

/// Log the simulation end sequence.
pub fn log_simulation_end(result: &SimulationResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        final_tick = result.final_summary.as_ref().map(|s| s.tick),
        final_day = result.final_summary.as_ref().map(|s| s.day),
        live_cargo = result.final_summary.as_ref().map(|s| s.live_cargo),
        "Simulation ended"
    );
}
