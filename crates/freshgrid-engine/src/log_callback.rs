//! Tick callback that reports the simulation through `tracing`.
//!
//! State changes, incinerations, and weather changes are logged as they
//! arrive; a full cargo snapshot is logged as JSON every
//! `snapshot_interval_ticks` ticks.

use freshgrid_core::events::SimEvent;
use freshgrid_core::runner::{TickCallback, TickSummary};
use freshgrid_core::simulation::Simulation;
use tracing::{debug, info, warn};

/// Logs notable events and periodic snapshots.
pub struct LogCallback {
    /// Ticks between snapshots. Zero disables them.
    snapshot_interval_ticks: u64,
    /// State changes seen so far.
    transitions: u64,
}

impl LogCallback {
    /// Create a callback logging snapshots every `snapshot_interval_ticks`.
    pub const fn new(snapshot_interval_ticks: u64) -> Self {
        Self {
            snapshot_interval_ticks,
            transitions: 0,
        }
    }

    /// State changes seen so far.
    pub const fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Whether a snapshot is due on `tick`.
    fn snapshot_due(&self, tick: u64) -> bool {
        tick.checked_rem(self.snapshot_interval_ticks)
            .is_some_and(|remainder| remainder == 0)
    }
}

impl TickCallback for LogCallback {
    fn on_tick(&mut self, summary: &TickSummary, simulation: &Simulation) {
        for event in &summary.events {
            match event {
                SimEvent::StateChanged { .. } => {
                    self.transitions = self.transitions.saturating_add(1);
                }
                SimEvent::Incinerated { cargo, coord } => {
                    warn!(tick = summary.tick, %cargo, %coord, "Cargo incinerated");
                }
                SimEvent::WeatherChanged { to, .. } => {
                    info!(tick = summary.tick, day = summary.day, weather = ?to, "New day weather");
                }
                _ => {}
            }
        }

        debug!(
            tick = summary.tick,
            processed = summary.report.processed,
            spawned = summary.spawned.len(),
            events = summary.events.len(),
            "Tick"
        );

        if self.snapshot_due(summary.tick) {
            match serde_json::to_string(&simulation.snapshot()) {
                Ok(json) => info!(
                    tick = summary.tick,
                    live_cargo = summary.live_cargo,
                    transitions = self.transitions,
                    snapshot = %json,
                    "Cargo snapshot"
                ),
                Err(err) => {
                    warn!(tick = summary.tick, error = %err, "Snapshot serialization failed");
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use freshgrid_core::config::{PlacementConfig, SimulationConfig, SpawnerConfig, TimeConfig};
    use freshgrid_core::runner::Driver;

    use super::*;

    #[test]
    fn counts_transitions() {
        let config = SimulationConfig {
            time: TimeConfig {
                ticks_per_day: 1000,
                ..TimeConfig::default()
            },
            spawner: SpawnerConfig {
                enabled: false,
                ..SpawnerConfig::default()
            },
            placements: vec![PlacementConfig {
                item: Some("Ice Cream".to_owned()),
                x: 1,
                y: 4,
            }],
            ..SimulationConfig::default()
        };
        let mut driver = Driver::from_config(&config).unwrap();
        let mut callback = LogCallback::new(0);
        for _ in 0..100 {
            let summary = driver.step().unwrap();
            callback.on_tick(&summary, driver.simulation());
        }
        assert_eq!(callback.transitions(), 1);
    }

    #[test]
    fn zero_interval_disables_snapshots() {
        assert!(!LogCallback::new(0).snapshot_due(10));
        assert!(LogCallback::new(5).snapshot_due(10));
        assert!(!LogCallback::new(5).snapshot_due(11));
    }
}
