//! Conveyor spawner that feeds cargo in from the side walls.
//!
//! Every `interval_ticks` ticks the conveyor runs one wave: for each of
//! `rows` rows centred on the floor's horizontal midline, a random catalog
//! item arrives at both side walls. Cargo arriving at the left wall pushes
//! the row rightwards, cargo arriving at the right wall pushes it leftwards.
//! A row with no room in the push direction skips that delivery.
//!
//! The shuffle re-registers every cargo it moves, so a crowded row can
//! shove cargo into the danger band in the middle of the floor.

use std::ops::Range;
use std::sync::Arc;

use freshgrid_types::{CargoId, Direction, GridCoordinate, ItemDefinition};
use freshgrid_world::plan_line_push;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::catalog::ItemCatalog;
use crate::config::SpawnerConfig;
use crate::simulation::Simulation;

/// Periodic conveyor waves with seeded item selection.
#[derive(Debug, Clone)]
pub struct ConveyorSpawner {
    /// Ticks between waves.
    interval_ticks: u64,
    /// Rows fed per wave.
    rows: u32,
    /// Item selection.
    rng: SmallRng,
    /// Items the conveyor delivers.
    catalog: ItemCatalog,
}

impl ConveyorSpawner {
    /// Create a spawner delivering items from `catalog`.
    pub fn new(config: &SpawnerConfig, catalog: ItemCatalog) -> Self {
        Self {
            interval_ticks: config.interval_ticks,
            rows: config.rows,
            rng: SmallRng::seed_from_u64(config.seed),
            catalog,
        }
    }

    /// Whether a wave runs on `tick`.
    pub fn is_due(&self, tick: u64) -> bool {
        tick.checked_rem(self.interval_ticks)
            .is_some_and(|remainder| remainder == 0)
    }

    /// Run a wave if one is due on `tick`. Returns the cargo created.
    pub fn on_tick(&mut self, tick: u64, sim: &mut Simulation) -> Vec<CargoId> {
        if self.is_due(tick) {
            self.spawn_wave(sim)
        } else {
            Vec::new()
        }
    }

    /// Run one wave now. Returns the cargo created.
    pub fn spawn_wave(&mut self, sim: &mut Simulation) -> Vec<CargoId> {
        let right_wall = sim.grid().width().saturating_sub(1);
        let mut spawned = Vec::new();

        for y in feed_rows(sim.grid().height(), self.rows) {
            for (x, direction) in [(0, Direction::Right), (right_wall, Direction::Left)] {
                let entry = GridCoordinate::new(x, y);
                if let Some(id) = self.deliver(sim, entry, direction) {
                    spawned.push(id);
                }
            }
        }

        info!(spawned = spawned.len(), "Conveyor wave delivered");
        spawned
    }

    /// Clear `entry` by shuffling its row, then spawn a random item there.
    fn deliver(
        &mut self,
        sim: &mut Simulation,
        entry: GridCoordinate,
        direction: Direction,
    ) -> Option<CargoId> {
        let Some(plan) = plan_line_push(sim.grid(), entry, direction) else {
            debug!(%entry, "Conveyor row full, delivery skipped");
            return None;
        };
        if let Err(err) = sim.apply_line_push(&plan) {
            warn!(%entry, error = %err, "Conveyor shuffle failed");
            return None;
        }

        let definition = self.pick()?;
        match sim.spawn(Some(definition), entry) {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(%entry, error = %err, "Conveyor delivery rejected");
                None
            }
        }
    }

    /// Pick a uniformly random catalog item.
    fn pick(&mut self) -> Option<Arc<ItemDefinition>> {
        if self.catalog.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..self.catalog.len());
        self.catalog.get_index(index)
    }
}

/// The `rows` rows centred on the midline of a floor `height` rows tall.
pub fn feed_rows(height: i32, rows: u32) -> Range<i32> {
    let rows = i32::try_from(rows).unwrap_or(i32::MAX).min(height);
    let midline = height.checked_div(2).unwrap_or(0);
    let start = midline
        .saturating_sub(rows.checked_div(2).unwrap_or(0))
        .clamp(0, height);
    let end = start.saturating_add(rows).clamp(start, height);
    start..end
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use freshgrid_cargo::CargoRules;
    use freshgrid_types::{GameOverReason, ItemCategory, StorageAttribute};
    use freshgrid_world::{GridConfig, SpatialGrid, ZoneConfig};

    use super::*;

    fn sim(width: u32, height: u32) -> Simulation {
        let grid_config = GridConfig {
            width,
            height,
            ..GridConfig::default()
        };
        let grid = SpatialGrid::new(&grid_config, &ZoneConfig::default()).unwrap();
        Simulation::new(grid, CargoRules::default())
    }

    fn spawner(rows: u32) -> ConveyorSpawner {
        let config = SpawnerConfig {
            rows,
            ..SpawnerConfig::default()
        };
        let catalog = ItemCatalog::new([ItemDefinition::new(
            "Tissue",
            StorageAttribute::RoomTemp,
            ItemCategory::General,
        )]);
        ConveyorSpawner::new(&config, catalog)
    }

    #[test]
    fn feed_rows_centre_on_midline() {
        assert_eq!(feed_rows(10, 5), 3..8);
        assert_eq!(feed_rows(10, 1), 5..6);
        assert_eq!(feed_rows(4, 10), 0..4);
        assert_eq!(feed_rows(10, 0), 5..5);
    }

    #[test]
    fn due_every_interval() {
        let spawner = spawner(1);
        let due: Vec<u64> = (1..=12).filter(|tick| spawner.is_due(*tick)).collect();
        assert_eq!(due, vec![5, 10]);
    }

    #[test]
    fn wave_fills_both_walls() {
        let mut sim = sim(12, 10);
        let mut spawner = spawner(5);
        let spawned = spawner.spawn_wave(&mut sim);
        assert_eq!(spawned.len(), 10);
        for y in 3..8 {
            assert!(sim.grid().is_occupied(GridCoordinate::new(0, y)));
            assert!(sim.grid().is_occupied(GridCoordinate::new(11, y)));
        }
        assert!(!sim.grid().is_occupied(GridCoordinate::new(0, 2)));
    }

    #[test]
    fn waves_push_rows_inward_until_the_danger_band() {
        let mut sim = sim(12, 10);
        let mut spawner = spawner(1);
        for wave in 1..=5 {
            spawner.spawn_wave(&mut sim);
            assert!(sim.game_over().is_none(), "burned on wave {wave}");
        }
        // Row 5 now holds x = 0..5 and x = 7..12; the sixth wave shoves the
        // innermost cargo into the danger band.
        spawner.spawn_wave(&mut sim);
        assert_eq!(sim.game_over(), Some(GameOverReason::CargoBurned));
    }

    #[test]
    fn full_row_skips_delivery() {
        let mut sim = sim(3, 3);
        let mut spawner = spawner(1);
        let row = feed_rows(3, 1);
        assert_eq!(row, 1..2);
        for x in 0..3 {
            sim.spawn(None, GridCoordinate::new(x, 1)).unwrap();
        }
        let before = sim.live_count();
        assert!(spawner.spawn_wave(&mut sim).is_empty());
        assert_eq!(sim.live_count(), before);
    }

    #[test]
    fn same_seed_same_items() {
        let catalog = ItemCatalog::builtin();
        let mut a = ConveyorSpawner::new(&SpawnerConfig::default(), catalog.clone());
        let mut b = ConveyorSpawner::new(&SpawnerConfig::default(), catalog);
        let names_a: Vec<String> = (0..20)
            .filter_map(|_| a.pick())
            .map(|d| d.name.clone())
            .collect();
        let names_b: Vec<String> = (0..20)
            .filter_map(|_| b.pick())
            .map(|d| d.name.clone())
            .collect();
        assert_eq!(names_a, names_b);
    }
}
