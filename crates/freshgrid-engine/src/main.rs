//! Headless engine binary for the Freshgrid simulation.
//!
//! This is the main entry point that wires together configuration, logging,
//! the store floor, and the paced tick loop, then runs until a termination
//! condition is met.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `freshgrid-config.yaml` (or the path in
//!    `FRESHGRID_CONFIG`), falling back to defaults
//! 2. Initialize structured logging (tracing)
//! 3. Build the floor, catalog, spawner, and pre-placed cargo
//! 4. Run the simulation loop
//! 5. Log the result and the final cargo snapshot

mod error;
mod log_callback;

use std::path::PathBuf;
use std::time::Duration;

use freshgrid_core::config::{LoggingConfig, SimulationConfig};
use freshgrid_core::runner::{self, Driver};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::log_callback::LogCallback;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "freshgrid-config.yaml";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration, setup, or the simulation itself fails.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let (config, source) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;
    info!(
        source = %source,
        width = config.grid.width,
        height = config.grid.height,
        ticks_per_day = config.time.ticks_per_day,
        max_days = config.time.max_days,
        tick_interval_ms = config.time.tick_interval_ms,
        "Configuration loaded"
    );

    // 3. Build the store.
    let mut driver = Driver::from_config(&config)?;
    info!(
        live_cargo = driver.simulation().live_count(),
        "Store floor initialized"
    );

    // 4. Run the simulation loop.
    let mut callback = LogCallback::new(config.logging.snapshot_interval_ticks);
    let result = runner::run_simulation(
        &mut driver,
        Duration::from_millis(config.time.tick_interval_ms),
        &mut callback,
    )
    .await?;

    // 5. Log the result.
    runner::log_simulation_end(&result);
    let snapshot = serde_json::to_string(&driver.simulation().snapshot())?;
    info!(
        transitions = callback.transitions(),
        snapshot = %snapshot,
        "Final cargo snapshot"
    );

    Ok(())
}

/// Load configuration from disk, or fall back to defaults when the file
/// does not exist. Returns the config and a description of its source.
fn load_config() -> Result<(SimulationConfig, String), EngineError> {
    let path = std::env::var_os("FRESHGRID_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        let config = SimulationConfig::from_file(&path)?;
        Ok((config, path.display().to_string()))
    } else {
        Ok((SimulationConfig::default(), "built-in defaults".to_owned()))
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(config: &LoggingConfig) -> Result<(), EngineError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| EngineError::Logging {
            message: format!("invalid log filter '{}': {e}", config.level),
        })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
