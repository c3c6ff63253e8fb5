//! Item catalog.
//!
//! Definitions are created once and shared by every cargo of the same kind
//! through an [`Arc`]; nothing mutates them after the catalog is built.

use std::collections::BTreeMap;
use std::sync::Arc;

use freshgrid_types::{ItemCategory, ItemDefinition, StorageAttribute};

/// The items a fresh store stocks when configuration does not say otherwise.
pub fn default_items() -> Vec<ItemDefinition> {
    use ItemCategory::{Food, General};
    use StorageAttribute::{Frozen, Heated, Liquid, Refrigerated, RoomTemp};

    vec![
        ItemDefinition::new("Snack", RoomTemp, Food).with_base_price(80),
        ItemDefinition::new("Tissue", RoomTemp, General).with_base_price(60),
        ItemDefinition::new("Milk", Refrigerated, Food).with_base_price(120),
        ItemDefinition::new("Kimbap", Refrigerated, Food).with_base_price(150),
        ItemDefinition::new("Ice Cream", Frozen, Food).with_base_price(140),
        ItemDefinition::new("Dumplings", Frozen, Food).with_base_price(180),
        ItemDefinition::new("Canned Coffee", Heated, Food).with_base_price(110),
        ItemDefinition::new("Soda", Liquid, Food).with_base_price(90),
    ]
}

/// Shared item definitions, looked up by name.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    /// Definitions in insertion order, for uniform random picks.
    items: Vec<Arc<ItemDefinition>>,
    /// Name -> index into `items`.
    by_name: BTreeMap<String, usize>,
}

impl ItemCatalog {
    /// Build a catalog. Later duplicates of a name replace earlier ones in
    /// lookups but both stay eligible for random picks.
    pub fn new(definitions: impl IntoIterator<Item = ItemDefinition>) -> Self {
        let mut catalog = Self::default();
        for def in definitions {
            catalog.by_name.insert(def.name.clone(), catalog.items.len());
            catalog.items.push(Arc::new(def));
        }
        catalog
    }

    /// Catalog of [`default_items`].
    pub fn builtin() -> Self {
        Self::new(default_items())
    }

    /// Look up a definition by name.
    pub fn get(&self, name: &str) -> Option<Arc<ItemDefinition>> {
        self.by_name
            .get(name)
            .and_then(|index| self.items.get(*index))
            .cloned()
    }

    /// Definition at `index` in insertion order.
    pub fn get_index(&self, index: usize) -> Option<Arc<ItemDefinition>> {
        self.items.get(index).cloned()
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no definitions.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All definitions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ItemDefinition>> {
        self.items.iter()
    }
}
