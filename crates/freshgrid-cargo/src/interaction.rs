//! Neighbour interaction rules.
//!
//! Pure, stateless classification used by the neighbour scan:
//!
//! - a cargo is a **heat source** if its effective attribute is `Heated`, or
//!   it is a liquid that boiled into `HeatedState`;
//! - a cargo is a **cold source** if its effective attribute is `Frozen`;
//! - a cargo is **enclosed** when all four edge-adjacent cells are taken
//!   (diagonals do not count).

use freshgrid_types::{CargoState, GridCoordinate, StorageAttribute};
use freshgrid_world::SpatialGrid;

use crate::cargo::CargoEntity;
use crate::config::CargoRules;

/// Heat and cold flags computed from the eight neighbours of a cargo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Proximity {
    /// At least one neighbour radiates heat.
    pub near_heat: bool,
    /// At least one neighbour radiates cold.
    pub near_cold: bool,
}

/// Whether `cargo` warms its neighbours.
pub fn is_heat_source(cargo: &CargoEntity) -> bool {
    cargo.effective_attribute() == StorageAttribute::Heated
        || cargo.state() == CargoState::HeatedState
}

/// Whether `cargo` chills its neighbours.
pub fn is_cold_source(cargo: &CargoEntity) -> bool {
    cargo.effective_attribute() == StorageAttribute::Frozen
}

/// Compute the proximity flags of `subject` from its occupied neighbours.
///
/// A subject that is itself `Heated` never counts as near heat.
pub fn scan<'a>(
    subject: &CargoEntity,
    neighbors: impl IntoIterator<Item = &'a CargoEntity>,
) -> Proximity {
    let ignores_heat = subject.effective_attribute() == StorageAttribute::Heated;
    neighbors
        .into_iter()
        .filter(|neighbor| neighbor.id() != subject.id())
        .fold(Proximity::default(), |flags, neighbor| Proximity {
            near_heat: flags.near_heat || (!ignores_heat && is_heat_source(neighbor)),
            near_cold: flags.near_cold || is_cold_source(neighbor),
        })
}

/// Whether all four edge-adjacent cells of `coord` are occupied.
///
/// Off-grid cells count as open, so cargo on the floor's edge is never
/// enclosed.
pub fn is_enclosed(grid: &SpatialGrid, coord: GridCoordinate) -> bool {
    grid.occupied_cardinal_count(coord) == 4
}

/// Whether `neighbor` is affected by stench and wet bursts at all.
pub fn is_susceptible(neighbor: &CargoEntity) -> bool {
    !neighbor.is_inert() && neighbor.effective_attribute() != StorageAttribute::RoomTemp
}

/// Freshness a melting frozen cargo takes from `neighbor`, if any.
pub fn wet_damage(neighbor: &CargoEntity, rules: &CargoRules) -> Option<f32> {
    if !is_susceptible(neighbor) {
        return None;
    }
    if neighbor.effective_attribute() == StorageAttribute::Refrigerated {
        Some(rules.wet_damage_refrigerated)
    } else {
        Some(rules.wet_damage_other)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use std::sync::Arc;

    use freshgrid_types::{CargoId, ItemCategory, ItemDefinition};
    use freshgrid_world::{GridConfig, ZoneConfig};

    use super::*;

    fn cargo(id: u64, attribute: StorageAttribute) -> CargoEntity {
        let def = ItemDefinition::new("Test", attribute, ItemCategory::Food);
        CargoEntity::new(CargoId(id), Some(Arc::new(def)))
    }

    #[test]
    fn source_classification() {
        let heated = cargo(1, StorageAttribute::Heated);
        let frozen = cargo(2, StorageAttribute::Frozen);
        let mut liquid = cargo(3, StorageAttribute::Liquid);
        assert!(is_heat_source(&heated));
        assert!(is_cold_source(&frozen));
        assert!(!is_heat_source(&liquid));

        liquid.transition_to(CargoState::HeatedState).unwrap();
        assert!(is_heat_source(&liquid));
        assert!(!is_cold_source(&liquid));
    }

    #[test]
    fn transitioned_sources_stop_radiating() {
        let mut frozen = cargo(1, StorageAttribute::Frozen);
        frozen.transition_to(CargoState::Wet).unwrap();
        assert!(!is_cold_source(&frozen));

        let mut heated = cargo(2, StorageAttribute::Heated);
        heated.transition_to(CargoState::Spoiled).unwrap();
        assert!(!is_heat_source(&heated));
    }

    #[test]
    fn scan_sets_both_flags() {
        let subject = cargo(1, StorageAttribute::Refrigerated);
        let heated = cargo(2, StorageAttribute::Heated);
        let frozen = cargo(3, StorageAttribute::Frozen);
        let flags = scan(&subject, [&heated, &frozen]);
        assert!(flags.near_heat);
        assert!(flags.near_cold);

        let none = scan(&subject, []);
        assert_eq!(none, Proximity::default());
    }

    #[test]
    fn heated_subject_ignores_heat() {
        let subject = cargo(1, StorageAttribute::Heated);
        let heated = cargo(2, StorageAttribute::Heated);
        let flags = scan(&subject, [&heated]);
        assert!(!flags.near_heat);
    }

    #[test]
    fn enclosure_needs_all_four_sides() {
        let mut grid = SpatialGrid::new(&GridConfig::default(), &ZoneConfig::default()).unwrap();
        let center = GridCoordinate::new(3, 5);
        grid.register(GridCoordinate::new(3, 6), CargoId(1)).unwrap();
        grid.register(GridCoordinate::new(3, 4), CargoId(2)).unwrap();
        grid.register(GridCoordinate::new(2, 5), CargoId(3)).unwrap();
        grid.register(GridCoordinate::new(4, 6), CargoId(4)).unwrap();
        assert!(!is_enclosed(&grid, center));

        grid.register(GridCoordinate::new(4, 5), CargoId(5)).unwrap();
        assert!(is_enclosed(&grid, center));
    }

    #[test]
    fn wet_damage_by_attribute() {
        let rules = CargoRules::default();
        assert_eq!(wet_damage(&cargo(1, StorageAttribute::Refrigerated), &rules), Some(40.0));
        assert_eq!(wet_damage(&cargo(2, StorageAttribute::Liquid), &rules), Some(20.0));
        assert_eq!(wet_damage(&cargo(3, StorageAttribute::Frozen), &rules), Some(20.0));
        assert_eq!(wet_damage(&cargo(4, StorageAttribute::RoomTemp), &rules), None);

        let mut spoiled = cargo(5, StorageAttribute::Refrigerated);
        spoiled.force_spoil().unwrap();
        assert_eq!(wet_damage(&spoiled, &rules), None);
    }
}
