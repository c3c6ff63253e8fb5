//! Shelves that take cargo off the floor.
//!
//! A shelf accepts a fixed set of storage attributes and holds up to
//! `capacity` items. Stocking a cargo consumes it and stores its base price;
//! sales take prices back out oldest first.

use std::collections::{BTreeSet, VecDeque};

use freshgrid_types::{ShelfId, StorageAttribute};

/// A sales shelf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shelf {
    /// Identity.
    id: ShelfId,
    /// Attributes this shelf takes.
    accepts: BTreeSet<StorageAttribute>,
    /// Maximum number of stocked items.
    capacity: usize,
    /// Prices of stocked items, oldest first.
    stock: VecDeque<u32>,
}

impl Shelf {
    /// Create an empty shelf.
    pub fn new(
        id: ShelfId,
        accepts: impl IntoIterator<Item = StorageAttribute>,
        capacity: usize,
    ) -> Self {
        Self {
            id,
            accepts: accepts.into_iter().collect(),
            capacity,
            stock: VecDeque::with_capacity(capacity),
        }
    }

    /// Identity.
    pub const fn id(&self) -> ShelfId {
        self.id
    }

    /// Whether cargo of `attribute` may be stocked here.
    pub fn accepts(&self, attribute: StorageAttribute) -> bool {
        self.accepts.contains(&attribute)
    }

    /// Maximum number of stocked items.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stocked items.
    pub fn len(&self) -> usize {
        self.stock.len()
    }

    /// Whether nothing is stocked.
    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }

    /// Whether no more items fit.
    pub fn is_full(&self) -> bool {
        self.stock.len() >= self.capacity
    }

    /// Price of the item that would sell next.
    pub fn peek(&self) -> Option<u32> {
        self.stock.front().copied()
    }

    /// Sell the oldest item, returning its price.
    pub fn take_stock(&mut self) -> Option<u32> {
        self.stock.pop_front()
    }

    /// Store a price. Capacity is checked by the caller.
    pub(crate) fn push_price(&mut self, price: u32) {
        self.stock.push_back(price);
    }
}
