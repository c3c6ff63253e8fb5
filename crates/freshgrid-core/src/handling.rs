//! Moving cargo around the floor.
//!
//! Everything a player or the conveyor does to cargo goes through here so
//! the registry and each cargo's own position never disagree:
//!
//! - [`Simulation::pick_up`] unregisters a cargo and suspends its ticks;
//! - [`Simulation::drop_at`] re-registers a carried cargo;
//! - [`Simulation::push`] slides a cargo one cell;
//! - [`Simulation::apply_line_push`] executes a planned conveyor shuffle;
//! - [`Simulation::consume`] and [`Simulation::stock_shelf`] remove cargo
//!   for good.
//!
//! Drops and pushes check the target first and never overwrite. Conveyor
//! shifts skip the no-drop check, which is what lets them carry cargo into
//! the danger band.

use freshgrid_cargo::CargoEntity;
use freshgrid_types::{CargoId, Direction, GridCoordinate};
use freshgrid_world::{GridError, LinePush};
use tracing::{debug, info};

use crate::events::SimEvent;
use crate::simulation::{SimError, Simulation};
use crate::storage::Shelf;

impl Simulation {
    /// Lift a cargo off the grid. It stops ticking until dropped.
    ///
    /// Returns the cell it was lifted from.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownCargo`] or [`SimError::NotOnGrid`].
    pub fn pick_up(&mut self, id: CargoId) -> Result<GridCoordinate, SimError> {
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(SimError::UnknownCargo(id))?;
        let coord = entity.position().ok_or(SimError::NotOnGrid(id))?;
        entity.set_position(None);
        self.grid.unregister(coord);

        debug!(cargo = %id, %coord, "Cargo picked up");
        self.events.push(SimEvent::PickedUp { cargo: id, coord });
        Ok(coord)
    }

    /// Put a carried cargo down on an empty, drop-allowed cell.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NotCarried`] if the cargo is on the grid, or
    /// [`SimError::Grid`] if the cell is off-grid, taken, or in the no-drop
    /// band.
    pub fn drop_at(&mut self, id: CargoId, coord: GridCoordinate) -> Result<(), SimError> {
        let entity = self.entities.get(&id).ok_or(SimError::UnknownCargo(id))?;
        if entity.position().is_some() {
            return Err(SimError::NotCarried(id));
        }
        self.check_target(coord)?;

        let registration = self.grid.register(coord, id)?;
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.set_position(Some(coord));
        }
        debug!(cargo = %id, %coord, "Cargo dropped");
        self.events.push(SimEvent::Dropped { cargo: id, coord });
        self.settle_registration(id, coord, registration);
        Ok(())
    }

    /// Slide a cargo one cell in `direction`.
    ///
    /// Returns the new cell.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NotOnGrid`] for a carried cargo, or
    /// [`SimError::Grid`] if the target is off-grid, taken, or in the
    /// no-drop band.
    pub fn push(&mut self, id: CargoId, direction: Direction) -> Result<GridCoordinate, SimError> {
        let entity = self.entities.get(&id).ok_or(SimError::UnknownCargo(id))?;
        let from = entity.position().ok_or(SimError::NotOnGrid(id))?;
        let to = from.step(direction).ok_or(GridError::OutOfBounds(from))?;
        self.check_target(to)?;
        self.move_cargo(id, from, to)?;
        Ok(to)
    }

    /// Execute a planned conveyor shuffle, far end first.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Misplaced`] if a planned cargo has moved since the
    /// plan was made, or [`SimError::Grid`] if the vacancy has been filled.
    /// The whole plan is checked first; nothing moves on error.
    pub fn apply_line_push(&mut self, push: &LinePush) -> Result<(), SimError> {
        if let Some(occupant) = self.grid.occupant_at(push.vacancy) {
            return Err(GridError::Occupied {
                coord: push.vacancy,
                occupant,
            }
            .into());
        }
        for shift in &push.shifts {
            self.check_source(shift.cargo, shift.from)?;
        }

        for shift in &push.shifts {
            self.move_cargo(shift.cargo, shift.from, shift.to)?;
        }
        Ok(())
    }

    /// Remove a cargo from the simulation for good (sold, discarded).
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownCargo`] if the cargo does not exist.
    pub fn consume(&mut self, id: CargoId) -> Result<CargoEntity, SimError> {
        let entity = self
            .entities
            .remove(&id)
            .ok_or(SimError::UnknownCargo(id))?;
        let registered = entity
            .position()
            .filter(|coord| self.grid.occupant_at(*coord) == Some(id));
        if let Some(coord) = registered {
            self.grid.unregister(coord);
        }

        debug!(cargo = %id, "Cargo consumed");
        self.events.push(SimEvent::Consumed { cargo: id });
        Ok(entity)
    }

    /// Stock a carried cargo onto `shelf`, consuming it.
    ///
    /// Returns the price stored on the shelf.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NotCarried`], [`SimError::Inert`],
    /// [`SimError::ShelfRejected`], or [`SimError::ShelfFull`]; the cargo is
    /// untouched in every case.
    pub fn stock_shelf(&mut self, id: CargoId, shelf: &mut Shelf) -> Result<u32, SimError> {
        let entity = self.entities.get(&id).ok_or(SimError::UnknownCargo(id))?;
        if entity.position().is_some() {
            return Err(SimError::NotCarried(id));
        }
        let definition = entity.definition().ok_or(SimError::Inert(id))?;
        if !shelf.accepts(definition.attribute) {
            return Err(SimError::ShelfRejected {
                shelf: shelf.id(),
                attribute: definition.attribute,
            });
        }
        if shelf.is_full() {
            return Err(SimError::ShelfFull(shelf.id()));
        }
        let price = definition.base_price;

        self.consume(id)?;
        shelf.push_price(price);
        info!(cargo = %id, shelf = %shelf.id(), price, "Cargo stocked");
        self.events.push(SimEvent::Stocked {
            cargo: id,
            shelf: shelf.id(),
            price,
        });
        Ok(price)
    }

    /// Reject targets that are off-grid, taken, or in the no-drop band.
    fn check_target(&self, coord: GridCoordinate) -> Result<(), GridError> {
        if !self.grid.is_valid(coord) {
            return Err(GridError::OutOfBounds(coord));
        }
        if let Some(occupant) = self.grid.occupant_at(coord) {
            return Err(GridError::Occupied { coord, occupant });
        }
        if !self.grid.is_drop_allowed(coord) {
            return Err(GridError::DropForbidden(coord));
        }
        Ok(())
    }

    /// Require that `id` stands on `coord`, both in the registry and on the
    /// cargo itself.
    fn check_source(&self, id: CargoId, coord: GridCoordinate) -> Result<(), SimError> {
        let entity = self.entities.get(&id).ok_or(SimError::UnknownCargo(id))?;
        let registered = self.grid.occupant_at(coord);
        if registered != Some(id) || entity.position() != Some(coord) {
            return Err(SimError::Misplaced {
                cargo: id,
                coord,
                registered,
            });
        }
        Ok(())
    }

    /// Relocate `id` in the registry and on the cargo itself.
    fn move_cargo(
        &mut self,
        id: CargoId,
        from: GridCoordinate,
        to: GridCoordinate,
    ) -> Result<(), SimError> {
        self.check_source(id, from)?;
        let registration = self.grid.relocate(from, to)?;
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.set_position(Some(to));
        }
        debug!(cargo = %id, %from, %to, "Cargo moved");
        self.events.push(SimEvent::Moved { cargo: id, from, to });
        self.settle_registration(id, to, registration);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use std::sync::Arc;

    use freshgrid_cargo::CargoRules;
    use freshgrid_types::{
        GameOverReason, ItemCategory, ItemDefinition, ShelfId, StorageAttribute,
    };
    use freshgrid_world::{GridConfig, SpatialGrid, ZoneConfig, plan_line_push};

    use super::*;

    fn sim() -> Simulation {
        let grid = SpatialGrid::new(&GridConfig::default(), &ZoneConfig::default()).unwrap();
        Simulation::new(grid, CargoRules::default())
    }

    fn milk() -> Option<Arc<ItemDefinition>> {
        Some(Arc::new(
            ItemDefinition::new("Milk", StorageAttribute::Refrigerated, ItemCategory::Food)
                .with_base_price(120),
        ))
    }

    #[test]
    fn carried_cargo_is_suspended() {
        let mut sim = sim();
        let id = sim.spawn(milk(), GridCoordinate::new(1, 4)).unwrap();
        let from = sim.pick_up(id).unwrap();
        assert_eq!(from, GridCoordinate::new(1, 4));
        assert!(!sim.grid().is_occupied(from));

        for _ in 0..10 {
            assert_eq!(sim.tick().skipped, 1);
        }
        assert_eq!(sim.entity(id).unwrap().freshness(), 101.0_f32);

        sim.drop_at(id, GridCoordinate::new(2, 4)).unwrap();
        assert_eq!(sim.grid().occupant_at(GridCoordinate::new(2, 4)), Some(id));
        assert_eq!(sim.tick().processed, 1);
    }

    #[test]
    fn picking_up_twice_fails() {
        let mut sim = sim();
        let id = sim.spawn(milk(), GridCoordinate::new(1, 4)).unwrap();
        sim.pick_up(id).unwrap();
        assert!(matches!(sim.pick_up(id), Err(SimError::NotOnGrid(_))));
    }

    #[test]
    fn drop_rejects_bad_targets() {
        let mut sim = sim();
        let blocker = sim.spawn(milk(), GridCoordinate::new(1, 4)).unwrap();
        let id = sim.spawn(milk(), GridCoordinate::new(2, 4)).unwrap();
        assert!(matches!(
            sim.drop_at(id, GridCoordinate::new(3, 4)),
            Err(SimError::NotCarried(_))
        ));
        sim.pick_up(id).unwrap();

        let occupied = sim.drop_at(id, GridCoordinate::new(1, 4)).unwrap_err();
        assert!(matches!(
            occupied,
            SimError::Grid {
                source: GridError::Occupied { occupant, .. }
            } if occupant == blocker
        ));
        assert!(matches!(
            sim.drop_at(id, GridCoordinate::new(6, 4)),
            Err(SimError::Grid {
                source: GridError::DropForbidden(_)
            })
        ));
        assert!(matches!(
            sim.drop_at(id, GridCoordinate::new(40, 4)),
            Err(SimError::Grid {
                source: GridError::OutOfBounds(_)
            })
        ));
        assert_eq!(sim.entity(id).unwrap().position(), None);
        assert!(sim.game_over().is_none());
    }

    #[test]
    fn push_moves_one_cell() {
        let mut sim = sim();
        let id = sim.spawn(milk(), GridCoordinate::new(1, 4)).unwrap();
        let to = sim.push(id, Direction::Up).unwrap();
        assert_eq!(to, GridCoordinate::new(1, 5));
        assert_eq!(sim.grid().occupant_at(to), Some(id));
        assert!(!sim.grid().is_occupied(GridCoordinate::new(1, 4)));
        assert_eq!(sim.entity(id).unwrap().position(), Some(to));
    }

    #[test]
    fn push_refuses_edges_and_conveyor() {
        let mut sim = sim();
        let edge = sim.spawn(milk(), GridCoordinate::new(0, 4)).unwrap();
        assert!(sim.push(edge, Direction::Left).is_err());
        let near_belt = sim.spawn(milk(), GridCoordinate::new(4, 4)).unwrap();
        assert!(sim.push(near_belt, Direction::Right).is_err());
        assert_eq!(
            sim.entity(near_belt).unwrap().position(),
            Some(GridCoordinate::new(4, 4))
        );
    }

    #[test]
    fn conveyor_shift_can_incinerate() {
        let mut sim = sim();
        let a = sim.spawn(milk(), GridCoordinate::new(0, 4)).unwrap();
        let b = sim.spawn(milk(), GridCoordinate::new(1, 4)).unwrap();
        let c = sim.spawn(milk(), GridCoordinate::new(2, 4)).unwrap();
        let d = sim.spawn(milk(), GridCoordinate::new(3, 4)).unwrap();
        let e = sim.spawn(milk(), GridCoordinate::new(4, 4)).unwrap();

        let plan = plan_line_push(sim.grid(), GridCoordinate::new(0, 4), Direction::Right).unwrap();
        sim.apply_line_push(&plan).unwrap();

        assert!(!sim.grid().is_occupied(GridCoordinate::new(0, 4)));
        assert_eq!(sim.entity(a).unwrap().position(), Some(GridCoordinate::new(1, 4)));
        assert_eq!(sim.entity(b).unwrap().position(), Some(GridCoordinate::new(2, 4)));
        assert_eq!(sim.entity(c).unwrap().position(), Some(GridCoordinate::new(3, 4)));
        assert_eq!(sim.entity(d).unwrap().position(), Some(GridCoordinate::new(4, 4)));
        assert_eq!(sim.entity(e).unwrap().position(), Some(GridCoordinate::new(5, 4)));
        assert_eq!(sim.game_over(), Some(GameOverReason::CargoBurned));
    }

    #[test]
    fn outdated_conveyor_plan_moves_nothing() {
        let mut sim = sim();
        let a = sim.spawn(milk(), GridCoordinate::new(0, 5)).unwrap();
        let b = sim.spawn(milk(), GridCoordinate::new(1, 5)).unwrap();
        let plan = plan_line_push(sim.grid(), GridCoordinate::new(0, 5), Direction::Right).unwrap();

        // Swap the two cargo behind the plan's back.
        sim.pick_up(a).unwrap();
        sim.pick_up(b).unwrap();
        sim.drop_at(a, GridCoordinate::new(1, 5)).unwrap();
        sim.drop_at(b, GridCoordinate::new(0, 5)).unwrap();

        let err = sim.apply_line_push(&plan).unwrap_err();
        assert!(matches!(
            err,
            SimError::Misplaced { cargo, registered, .. } if cargo == b && registered == Some(a)
        ));
        assert_eq!(sim.grid().occupant_at(GridCoordinate::new(0, 5)), Some(b));
        assert_eq!(sim.grid().occupant_at(GridCoordinate::new(1, 5)), Some(a));
        assert_eq!(sim.grid().occupied_count(), 2);

        let report = sim.tick();
        assert_eq!(report.faults, 0);
        assert_eq!(report.processed, 2);

        sim.pick_up(a).unwrap();
        assert_eq!(sim.grid().occupied_count(), 1);
        assert_eq!(sim.grid().occupant_at(GridCoordinate::new(0, 5)), Some(b));
    }

    #[test]
    fn filled_vacancy_rejects_the_plan() {
        let mut sim = sim();
        let a = sim.spawn(milk(), GridCoordinate::new(0, 5)).unwrap();
        let plan = plan_line_push(sim.grid(), GridCoordinate::new(0, 5), Direction::Right).unwrap();
        let late = sim.spawn(milk(), GridCoordinate::new(1, 5)).unwrap();

        assert!(matches!(
            sim.apply_line_push(&plan),
            Err(SimError::Grid {
                source: GridError::Occupied { occupant, .. }
            }) if occupant == late
        ));
        assert_eq!(sim.entity(a).unwrap().position(), Some(GridCoordinate::new(0, 5)));
    }

    #[test]
    fn consume_frees_the_cell() {
        let mut sim = sim();
        let id = sim.spawn(milk(), GridCoordinate::new(1, 4)).unwrap();
        let entity = sim.consume(id).unwrap();
        assert_eq!(entity.id(), id);
        assert!(!sim.grid().is_occupied(GridCoordinate::new(1, 4)));
        assert!(sim.entity(id).is_none());
        assert!(matches!(sim.consume(id), Err(SimError::UnknownCargo(_))));
    }

    #[test]
    fn stocking_checks_shelf_then_consumes() {
        let mut sim = sim();
        let mut freezer = Shelf::new(ShelfId(1), [StorageAttribute::Frozen], 4);
        let mut fridge = Shelf::new(ShelfId(2), [StorageAttribute::Refrigerated], 1);

        let first = sim.spawn(milk(), GridCoordinate::new(1, 4)).unwrap();
        let second = sim.spawn(milk(), GridCoordinate::new(2, 4)).unwrap();
        assert!(matches!(
            sim.stock_shelf(first, &mut fridge),
            Err(SimError::NotCarried(_))
        ));

        sim.pick_up(first).unwrap();
        assert!(matches!(
            sim.stock_shelf(first, &mut freezer),
            Err(SimError::ShelfRejected { .. })
        ));
        assert_eq!(sim.stock_shelf(first, &mut fridge).unwrap(), 120);
        assert!(sim.entity(first).is_none());

        sim.pick_up(second).unwrap();
        assert!(matches!(
            sim.stock_shelf(second, &mut fridge),
            Err(SimError::ShelfFull(_))
        ));
        assert!(sim.entity(second).is_some());
        assert_eq!(fridge.take_stock(), Some(120));
    }

    #[test]
    fn inert_cargo_cannot_be_stocked() {
        let mut sim = sim();
        let mut shelf = Shelf::new(ShelfId(1), StorageAttribute::ALL, 4);
        let id = sim.spawn(None, GridCoordinate::new(1, 4)).unwrap();
        sim.pick_up(id).unwrap();
        assert!(matches!(sim.stock_shelf(id, &mut shelf), Err(SimError::Inert(_))));
    }
}
