//! The live cargo collection and the per-tick scan.
//!
//! [`Simulation`] owns the floor grid, every cargo entity, the active
//! weather, and the event log. One call to [`Simulation::tick`] processes
//! every cargo that is on the grid and has item data, in ascending id order:
//!
//! 1. **Neighbour scan** -- recompute the heat/cold flags from the eight
//!    surrounding cells.
//! 2. **Decay** -- apply the weather table, unless the cargo stands in the
//!    safe band or is room temperature.
//! 3. **Thresholds** -- a cargo at zero freshness runs its zero-freshness
//!    transition; otherwise over-chill tracking may burst it.
//! 4. **Stench** -- a spoiled cargo periodically stacks stench onto its
//!    susceptible neighbours, spoiling any that reach the threshold.
//!
//! Cascades are applied immediately and in place: a wet burst damages all
//! eight neighbours at once, then any neighbour it emptied runs its own
//! zero-freshness transition (which may burst again) before the scan moves
//! on. Processing is single-threaded, so the order is fully determined by
//! cargo ids.
//!
//! A failure while ticking one cargo is logged and counted in the
//! [`TickReport`]; the remaining cargo are still processed.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use freshgrid_cargo::interaction;
use freshgrid_cargo::{
    CargoEntity, CargoRules, DecayContext, StateChange, ZeroFreshnessTransition, apply_decay,
    zero_freshness_transition,
};
use freshgrid_types::{
    CargoId, CargoSnapshot, CargoState, GameOverReason, GridCoordinate, ItemDefinition, ShelfId,
    StorageAttribute, Weather, WorldPoint,
};
use freshgrid_world::{GridError, Registration, SpatialGrid};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::events::{SimEvent, WetHit};

/// Errors that can occur in simulation operations.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A grid operation was rejected.
    #[error("grid error: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: GridError,
    },

    /// No cargo with this id exists.
    #[error("unknown cargo {0}")]
    UnknownCargo(CargoId),

    /// The cargo must be on the grid for this operation.
    #[error("cargo {0} is not on the grid")]
    NotOnGrid(CargoId),

    /// The cargo must be carried for this operation.
    #[error("cargo {0} is not being carried")]
    NotCarried(CargoId),

    /// The cargo has no item data.
    #[error("cargo {0} has no item data")]
    Inert(CargoId),

    /// The cargo and the registry disagree about where it stands.
    #[error("cargo {cargo} believes it stands on {coord} but the registry holds {registered:?}")]
    Desynced {
        /// The cargo.
        cargo: CargoId,
        /// The cell the cargo believes it is on.
        coord: GridCoordinate,
        /// What the registry holds at that cell.
        registered: Option<CargoId>,
    },

    /// A move expected the cargo on a cell it does not hold.
    #[error("cargo {cargo} is not on {coord}; the registry holds {registered:?}")]
    Misplaced {
        /// The cargo the move was meant for.
        cargo: CargoId,
        /// The cell the move expected it on.
        coord: GridCoordinate,
        /// What the registry holds at that cell.
        registered: Option<CargoId>,
    },

    /// The shelf does not take cargo of this attribute.
    #[error("shelf {shelf} does not accept {attribute:?} cargo")]
    ShelfRejected {
        /// The shelf.
        shelf: ShelfId,
        /// The cargo's storage attribute.
        attribute: StorageAttribute,
    },

    /// The shelf has no room left.
    #[error("shelf {0} is full")]
    ShelfFull(ShelfId),
}

/// Counts from one pass over the live cargo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    /// Cargo that ran the full per-tick algorithm.
    pub processed: u32,
    /// Cargo skipped because they are carried or inert.
    pub skipped: u32,
    /// Cargo whose tick failed.
    pub faults: u32,
}

/// The store floor and every cargo on or off it.
#[derive(Debug)]
pub struct Simulation {
    /// Floor geometry and occupancy.
    pub(crate) grid: SpatialGrid,
    /// Every live cargo, keyed (and therefore ticked) by id.
    pub(crate) entities: BTreeMap<CargoId, CargoEntity>,
    /// Id handed to the next spawned cargo.
    next_id: CargoId,
    /// Active weather. Written only through [`Simulation::set_weather`].
    weather: Weather,
    /// Evolution thresholds.
    rules: CargoRules,
    /// Events since the last drain.
    pub(crate) events: Vec<SimEvent>,
    /// Set once the game has ended.
    game_over: Option<GameOverReason>,
}

impl Simulation {
    /// Create an empty simulation on `grid`.
    pub const fn new(grid: SpatialGrid, rules: CargoRules) -> Self {
        Self {
            grid,
            entities: BTreeMap::new(),
            next_id: CargoId(1),
            weather: Weather::Normal,
            rules,
            events: Vec::new(),
            game_over: None,
        }
    }

    // -------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------

    /// The floor grid.
    pub const fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Evolution thresholds in use.
    pub const fn rules(&self) -> &CargoRules {
        &self.rules
    }

    /// Active weather.
    pub const fn weather(&self) -> Weather {
        self.weather
    }

    /// Look up a cargo.
    pub fn entity(&self, id: CargoId) -> Option<&CargoEntity> {
        self.entities.get(&id)
    }

    /// All live cargo in id order.
    pub fn entities(&self) -> impl Iterator<Item = &CargoEntity> {
        self.entities.values()
    }

    /// Number of live cargo, carried ones included.
    pub fn live_count(&self) -> usize {
        self.entities.len()
    }

    /// Why the game ended, if it has.
    pub const fn game_over(&self) -> Option<GameOverReason> {
        self.game_over
    }

    /// Read-only views of every live cargo in id order.
    pub fn snapshot(&self) -> Vec<CargoSnapshot> {
        self.entities.values().map(CargoEntity::snapshot).collect()
    }

    /// Take every event logged since the last drain.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    // -------------------------------------------------------------------
    // External inputs
    // -------------------------------------------------------------------

    /// Switch the active weather.
    pub fn set_weather(&mut self, weather: Weather) {
        if weather == self.weather {
            return;
        }
        info!(
            from = ?self.weather,
            to = ?weather,
            description = freshgrid_cargo::weather::describe(weather),
            "Weather changed"
        );
        self.events.push(SimEvent::WeatherChanged {
            from: self.weather,
            to: weather,
        });
        self.weather = weather;
    }

    /// Record that the game has ended. Only the first reason sticks.
    pub fn declare_game_over(&mut self, reason: GameOverReason) {
        if self.game_over.is_some() {
            return;
        }
        error!(?reason, "Game over");
        self.game_over = Some(reason);
        self.events.push(SimEvent::GameOver { reason });
    }

    /// Create a cargo and register it at `coord`.
    ///
    /// Registration has overwrite semantics: callers are expected to have
    /// checked that the cell is free, and any cargo already standing there
    /// is evicted from the grid. Spawning into the danger band incinerates
    /// the cargo and ends the game.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Grid`] if `coord` is off the grid. No cargo is
    /// created in that case.
    pub fn spawn(
        &mut self,
        definition: Option<Arc<ItemDefinition>>,
        coord: GridCoordinate,
    ) -> Result<CargoId, SimError> {
        let id = self.next_id;
        let registration = self.grid.register(coord, id)?;
        self.next_id = id.next();

        let mut entity = CargoEntity::new(id, definition);
        entity.set_position(Some(coord));
        let item = entity.definition().map(|def| def.name.clone());
        debug!(cargo = %id, %coord, item = item.as_deref(), "Cargo spawned");
        self.entities.insert(id, entity);
        self.events.push(SimEvent::Spawned {
            cargo: id,
            coord,
            item,
        });

        self.settle_registration(id, coord, registration);
        Ok(id)
    }

    /// Create a cargo at the cell containing a world-space point.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Grid`] if the point lies off the grid.
    pub fn spawn_at_point(
        &mut self,
        definition: Option<Arc<ItemDefinition>>,
        point: WorldPoint,
    ) -> Result<CargoId, SimError> {
        let coord = self.grid.world_to_grid(point);
        self.spawn(definition, coord)
    }

    /// Give an inert cargo its item data (or replace existing data).
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownCargo`] if the cargo does not exist.
    pub fn assign_definition(
        &mut self,
        id: CargoId,
        definition: Arc<ItemDefinition>,
    ) -> Result<(), SimError> {
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(SimError::UnknownCargo(id))?;
        debug!(cargo = %id, item = %definition.name, "Item data assigned");
        entity.assign_definition(definition);
        Ok(())
    }

    /// Deal `amount` freshness damage to a cargo from outside the tick.
    ///
    /// If the damage empties a `Normal` cargo, its zero-freshness transition
    /// and any cascade it starts run immediately. Returns whether that
    /// happened.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownCargo`] if the cargo does not exist.
    pub fn apply_damage(&mut self, id: CargoId, amount: f32) -> Result<bool, SimError> {
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(SimError::UnknownCargo(id))?;
        let emptied = entity.apply_damage(amount);
        if emptied {
            self.run_zero_transitions(id);
        }
        Ok(emptied)
    }

    // -------------------------------------------------------------------
    // Tick
    // -------------------------------------------------------------------

    /// Run one tick over every live cargo.
    pub fn tick(&mut self) -> TickReport {
        let ids: Vec<CargoId> = self.entities.keys().copied().collect();
        let mut report = TickReport::default();

        for id in ids {
            match self.tick_entity(id) {
                Ok(true) => report.processed = report.processed.saturating_add(1),
                Ok(false) => report.skipped = report.skipped.saturating_add(1),
                Err(err) => {
                    warn!(cargo = %id, error = %err, "Cargo tick failed, continuing scan");
                    report.faults = report.faults.saturating_add(1);
                }
            }
        }

        debug!(
            processed = report.processed,
            skipped = report.skipped,
            faults = report.faults,
            weather = ?self.weather,
            "Tick complete"
        );
        report
    }

    /// Run the per-tick algorithm for one cargo.
    ///
    /// Returns `Ok(false)` for cargo that are exempt this tick.
    fn tick_entity(&mut self, id: CargoId) -> Result<bool, SimError> {
        let entity = self.entities.get(&id).ok_or(SimError::UnknownCargo(id))?;
        if entity.is_inert() {
            return Ok(false);
        }
        let Some(coord) = entity.position() else {
            return Ok(false);
        };
        let registered = self.grid.occupant_at(coord);
        if registered != Some(id) {
            return Err(SimError::Desynced {
                cargo: id,
                coord,
                registered,
            });
        }

        // 1. Neighbour scan.
        self.refresh_proximity(id, coord);

        // 2. Decay or recovery.
        let context = DecayContext {
            weather: self.weather,
            in_safe_zone: self.grid.is_in_safe_zone(coord),
            enclosed: interaction::is_enclosed(&self.grid, coord),
        };
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(SimError::UnknownCargo(id))?;
        let outcome = apply_decay(entity, &context, &self.rules);

        // 3. Thresholds.
        let zero_due = entity.needs_zero_transition();
        let burst_due =
            !zero_due && outcome.was_evaluated() && entity.track_over_chill(&self.rules);
        if zero_due {
            self.run_zero_transitions(id);
        } else if burst_due {
            self.freeze_burst(id);
        }

        // 4. Stench.
        self.radiate_stench(id, coord);
        Ok(true)
    }

    /// Recompute the heat/cold flags of `id` standing on `coord`.
    fn refresh_proximity(&mut self, id: CargoId, coord: GridCoordinate) {
        let Some(subject) = self.entities.get(&id) else {
            return;
        };
        let neighbors = self.grid.occupied_neighbors(coord);
        let proximity = interaction::scan(
            subject,
            neighbors
                .iter()
                .filter_map(|(_, neighbor)| self.entities.get(neighbor)),
        );
        if let Some(subject) = self.entities.get_mut(&id) {
            subject.set_proximity(proximity);
        }
    }

    // -------------------------------------------------------------------
    // Cascades
    // -------------------------------------------------------------------

    /// Run the zero-freshness transition of `first`, then of every
    /// neighbour a resulting wet burst empties, breadth first.
    fn run_zero_transitions(&mut self, first: CargoId) {
        let mut queue = VecDeque::from([first]);

        while let Some(id) = queue.pop_front() {
            let Some(position) = self.entities.get(&id).map(CargoEntity::position) else {
                continue;
            };
            if let Some(coord) = position {
                self.refresh_proximity(id, coord);
            }

            let Some(entity) = self.entities.get_mut(&id) else {
                continue;
            };
            if !entity.needs_zero_transition() {
                continue;
            }
            let ZeroFreshnessTransition { state, wet_burst } =
                zero_freshness_transition(entity.attribute(), entity.proximity().near_heat);
            let Some(change) = entity.transition_to(state) else {
                continue;
            };
            self.record_change(change, position);

            if let (true, Some(coord)) = (wet_burst, position) {
                self.wet_burst(id, coord, &mut queue);
            }
        }
    }

    /// Damage every susceptible neighbour of a melted cargo at once, queueing
    /// the ones it empties.
    fn wet_burst(&mut self, source: CargoId, coord: GridCoordinate, queue: &mut VecDeque<CargoId>) {
        let mut hits = Vec::new();
        for (_, target) in self.grid.occupied_neighbors(coord) {
            let Some(neighbor) = self.entities.get_mut(&target) else {
                continue;
            };
            let Some(amount) = interaction::wet_damage(neighbor, &self.rules) else {
                continue;
            };
            if neighbor.apply_damage(amount) {
                queue.push_back(target);
            }
            hits.push(WetHit { target, amount });
        }

        info!(cargo = %source, %coord, hits = hits.len(), "Wet burst");
        self.events.push(SimEvent::WetBurst { source, coord, hits });
    }

    /// Burst an over-chilled cargo. Freshness drops to zero.
    fn freeze_burst(&mut self, id: CargoId) {
        let Some(entity) = self.entities.get_mut(&id) else {
            return;
        };
        let position = entity.position();
        let Some(change) = entity.transition_to(CargoState::FrozenBurst) else {
            return;
        };
        let max = entity.max_freshness();
        entity.adjust_freshness(-max);
        self.record_change(change, position);
    }

    /// Advance the stench timer of `id` and, when it fires, stack stench on
    /// every susceptible neighbour.
    fn radiate_stench(&mut self, id: CargoId, coord: GridCoordinate) {
        let Some(entity) = self.entities.get_mut(&id) else {
            return;
        };
        if !entity.tick_stench(&self.rules) {
            return;
        }

        for (_, target) in self.grid.occupied_neighbors(coord) {
            let Some(neighbor) = self.entities.get_mut(&target) else {
                continue;
            };
            if !interaction::is_susceptible(neighbor) {
                continue;
            }
            let spoils = neighbor.add_stench_stack(&self.rules);
            let stacks = neighbor.stench_stack();
            let position = neighbor.position();
            let forced = if spoils { neighbor.force_spoil() } else { None };

            debug!(source = %id, target = %target, stacks, "Stench applied");
            self.events.push(SimEvent::StenchApplied {
                source: id,
                target,
                stacks,
            });
            if let Some(change) = forced {
                self.record_change(change, position);
            }
        }
    }

    /// Log and record an applied state transition.
    fn record_change(&mut self, change: StateChange, coord: Option<GridCoordinate>) {
        info!(
            cargo = %change.cargo,
            from = ?change.from,
            to = ?change.to,
            "Cargo transitioned"
        );
        self.events.push(SimEvent::StateChanged {
            cargo: change.cargo,
            from: change.from,
            to: change.to,
            coord,
        });
    }

    // -------------------------------------------------------------------
    // Registry bookkeeping
    // -------------------------------------------------------------------

    /// React to a registration: detach an evicted occupant and incinerate
    /// cargo that landed in the danger band.
    pub(crate) fn settle_registration(
        &mut self,
        cargo: CargoId,
        coord: GridCoordinate,
        registration: Registration,
    ) {
        if let Some(evicted) = registration.displaced {
            if let Some(entity) = self.entities.get_mut(&evicted) {
                entity.set_position(None);
            }
            self.events.push(SimEvent::Displaced {
                cargo: evicted,
                by: cargo,
                coord,
            });
        }

        if registration.incinerated {
            self.events.push(SimEvent::Incinerated { cargo, coord });
            self.declare_game_over(GameOverReason::CargoBurned);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use freshgrid_types::ItemCategory;
    use freshgrid_world::{GridConfig, ZoneConfig};

    use super::*;

    fn sim() -> Simulation {
        let grid = SpatialGrid::new(&GridConfig::default(), &ZoneConfig::default()).unwrap();
        Simulation::new(grid, CargoRules::default())
    }

    fn item(attribute: StorageAttribute) -> Option<Arc<ItemDefinition>> {
        Some(Arc::new(ItemDefinition::new(
            "Test",
            attribute,
            ItemCategory::Food,
        )))
    }

    #[test]
    fn spawn_allocates_sequential_ids() {
        let mut sim = sim();
        let a = sim.spawn(item(StorageAttribute::Frozen), GridCoordinate::new(1, 4)).unwrap();
        let b = sim.spawn(None, GridCoordinate::new(2, 4)).unwrap();
        assert_eq!(a, CargoId(1));
        assert_eq!(b, CargoId(2));
        assert_eq!(sim.grid().occupant_at(GridCoordinate::new(1, 4)), Some(a));
        assert_eq!(sim.live_count(), 2);
    }

    #[test]
    fn off_grid_spawn_creates_nothing() {
        let mut sim = sim();
        let err = sim.spawn(item(StorageAttribute::Frozen), GridCoordinate::new(-1, 0));
        assert!(matches!(err, Err(SimError::Grid { .. })));
        assert_eq!(sim.live_count(), 0);
        let next = sim.spawn(None, GridCoordinate::new(0, 4)).unwrap();
        assert_eq!(next, CargoId(1));
    }

    #[test]
    fn spawn_at_point_snaps_to_cell() {
        let mut sim = sim();
        let id = sim
            .spawn_at_point(item(StorageAttribute::Heated), WorldPoint::new(3.7, 4.2))
            .unwrap();
        assert_eq!(
            sim.entity(id).unwrap().position(),
            Some(GridCoordinate::new(3, 4))
        );
    }

    #[test]
    fn overwrite_evicts_previous_occupant() {
        let mut sim = sim();
        let cell = GridCoordinate::new(1, 4);
        let first = sim.spawn(item(StorageAttribute::Frozen), cell).unwrap();
        let second = sim.spawn(item(StorageAttribute::Heated), cell).unwrap();

        assert_eq!(sim.grid().occupant_at(cell), Some(second));
        assert_eq!(sim.entity(first).unwrap().position(), None);
        assert!(sim.drain_events().contains(&SimEvent::Displaced {
            cargo: first,
            by: second,
            coord: cell,
        }));

        // The evicted cargo is off the grid and no longer ticks.
        let report = sim.tick();
        assert_eq!(report.processed, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.faults, 0);
    }

    #[test]
    fn danger_zone_spawn_ends_the_game() {
        let mut sim = sim();
        let cell = GridCoordinate::new(5, 4);
        let id = sim.spawn(item(StorageAttribute::Frozen), cell).unwrap();

        assert_eq!(sim.game_over(), Some(GameOverReason::CargoBurned));
        let events = sim.drain_events();
        assert!(events.contains(&SimEvent::Incinerated { cargo: id, coord: cell }));
        assert!(events.contains(&SimEvent::GameOver {
            reason: GameOverReason::CargoBurned
        }));
    }

    #[test]
    fn first_game_over_reason_sticks() {
        let mut sim = sim();
        sim.declare_game_over(GameOverReason::CargoBurned);
        sim.declare_game_over(GameOverReason::CargoBurned);
        assert_eq!(sim.game_over(), Some(GameOverReason::CargoBurned));
        assert_eq!(sim.drain_events().len(), 1);
    }

    #[test]
    fn inert_cargo_is_skipped_until_assigned() {
        let mut sim = sim();
        let id = sim.spawn(None, GridCoordinate::new(1, 4)).unwrap();
        assert_eq!(sim.tick().skipped, 1);
        assert_eq!(sim.entity(id).unwrap().freshness(), 0.0);
        assert_eq!(sim.entity(id).unwrap().state(), CargoState::Normal);

        let def = Arc::new(ItemDefinition::new(
            "Ice Cream",
            StorageAttribute::Frozen,
            ItemCategory::Food,
        ));
        sim.assign_definition(id, def).unwrap();
        assert_eq!(sim.entity(id).unwrap().freshness(), 100.0);
        assert_eq!(sim.tick().processed, 1);
        assert_eq!(sim.entity(id).unwrap().freshness(), 99.0);
    }

    #[test]
    fn faulty_cargo_does_not_stop_the_scan() {
        let mut sim = sim();
        let broken = sim
            .spawn(item(StorageAttribute::Refrigerated), GridCoordinate::new(1, 4))
            .unwrap();
        let healthy = sim
            .spawn(item(StorageAttribute::Refrigerated), GridCoordinate::new(3, 4))
            .unwrap();
        assert!(broken < healthy);

        // The cargo believes it moved; the registry still has it on (1, 4).
        sim.entities
            .get_mut(&broken)
            .unwrap()
            .set_position(Some(GridCoordinate::new(0, 9)));

        let report = sim.tick();
        assert_eq!(report.faults, 1);
        assert_eq!(report.processed, 1);
        assert_eq!(sim.entity(broken).unwrap().freshness(), 101.0);
        assert_eq!(sim.entity(healthy).unwrap().freshness(), 100.0);
    }

    #[test]
    fn weather_change_is_logged_once() {
        let mut sim = sim();
        sim.set_weather(Weather::HeatWave);
        sim.set_weather(Weather::HeatWave);
        assert_eq!(
            sim.drain_events(),
            vec![SimEvent::WeatherChanged {
                from: Weather::Normal,
                to: Weather::HeatWave
            }]
        );
        assert!(sim.drain_events().is_empty());
    }

    #[test]
    fn heat_wave_speeds_up_unprotected_frozen() {
        let mut sim = sim();
        let id = sim.spawn(item(StorageAttribute::Frozen), GridCoordinate::new(1, 4)).unwrap();
        sim.set_weather(Weather::HeatWave);
        sim.tick();
        assert_eq!(sim.entity(id).unwrap().freshness(), 97.0);
    }

    #[test]
    fn boiled_liquid_heats_its_neighbours() {
        let mut sim = sim();
        let soda = sim.spawn(item(StorageAttribute::Liquid), GridCoordinate::new(1, 4)).unwrap();
        let coffee = sim.spawn(item(StorageAttribute::Heated), GridCoordinate::new(0, 4)).unwrap();
        let milk = sim
            .spawn(item(StorageAttribute::Refrigerated), GridCoordinate::new(2, 4))
            .unwrap();

        // Soda is next to the coffee, so it boils when emptied.
        sim.tick();
        sim.apply_damage(soda, 200.0).unwrap();
        assert_eq!(sim.entity(soda).unwrap().state(), CargoState::HeatedState);

        // Milk is not adjacent to the coffee but now sits next to the boiled soda.
        sim.tick();
        assert!(sim.entity(milk).unwrap().proximity().near_heat);
        assert!(!sim.entity(coffee).unwrap().proximity().near_heat);
    }

    #[test]
    fn refrigerated_near_heat_spoils() {
        let mut sim = sim();
        let milk = sim
            .spawn(item(StorageAttribute::Refrigerated), GridCoordinate::new(1, 4))
            .unwrap();
        sim.spawn(item(StorageAttribute::Heated), GridCoordinate::new(0, 4)).unwrap();
        sim.tick();
        assert!(sim.apply_damage(milk, 500.0).unwrap());
        assert_eq!(sim.entity(milk).unwrap().state(), CargoState::Spoiled);
        assert!(!sim.apply_damage(milk, 1.0).unwrap());
    }

    #[test]
    fn unknown_cargo_is_an_error() {
        let mut sim = sim();
        assert!(matches!(
            sim.apply_damage(CargoId(77), 1.0),
            Err(SimError::UnknownCargo(CargoId(77)))
        ));
    }

    #[test]
    fn snapshot_lists_cargo_in_id_order() {
        let mut sim = sim();
        sim.spawn(item(StorageAttribute::Frozen), GridCoordinate::new(3, 4)).unwrap();
        sim.spawn(None, GridCoordinate::new(1, 4)).unwrap();
        let snapshot = sim.snapshot();
        let ids: Vec<CargoId> = snapshot.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![CargoId(1), CargoId(2)]);
        assert_eq!(snapshot.first().unwrap().item.as_deref(), Some("Test"));
        assert_eq!(snapshot.get(1).unwrap().item, None);
    }
}
