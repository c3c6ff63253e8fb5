//! The configuration file shipped at the workspace root must parse and
//! describe the built-in defaults.

#![allow(clippy::unwrap_used)]

use std::path::Path;

use freshgrid_core::config::SimulationConfig;
use freshgrid_core::runner::Driver;

fn shipped() -> SimulationConfig {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../freshgrid-config.yaml");
    SimulationConfig::from_file(&path).unwrap()
}

#[test]
fn shipped_config_matches_defaults() {
    let shipped = shipped();
    let defaults = SimulationConfig::default();

    assert_eq!(shipped.grid, defaults.grid);
    assert_eq!(shipped.zones, defaults.zones);
    assert_eq!(shipped.cargo, defaults.cargo);
    assert_eq!(shipped.time, defaults.time);
    assert_eq!(shipped.weather_schedule, defaults.weather_schedule);
    assert_eq!(shipped.spawner, defaults.spawner);
    assert_eq!(shipped.logging, defaults.logging);
    assert_eq!(shipped.item_definitions(), defaults.item_definitions());
    assert!(shipped.placements.is_empty());
}

#[test]
fn shipped_config_builds_a_driver() {
    let driver = Driver::from_config(&shipped()).unwrap();
    assert_eq!(driver.simulation().live_count(), 0);
    assert_eq!(driver.clock().tick(), 0);
}
