//! Runtime state of a single cargo unit.
//!
//! A [`CargoEntity`] pairs shared, immutable [`ItemDefinition`] data with the
//! values that evolve every tick: freshness, the one-way [`CargoState`], and
//! the stench and freeze counters. A cargo without a definition is *inert*:
//! every decay and transition path skips it until data is assigned.
//!
//! Once a cargo leaves `Normal`, its *effective* attribute becomes
//! `RoomTemp`: it stops reacting to or radiating heat and cold as its
//! original kind. A boiled liquid is the one exception and keeps radiating
//! heat (see [`interaction::is_heat_source`]).
//!
//! [`interaction::is_heat_source`]: crate::interaction::is_heat_source

use std::sync::Arc;

use freshgrid_types::{
    CargoId, CargoSnapshot, CargoState, GridCoordinate, ItemCategory, ItemDefinition,
    StorageAttribute,
};

use tracing::debug;

use crate::config::CargoRules;
use crate::interaction::Proximity;

/// A state transition that has just been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    /// The cargo that changed.
    pub cargo: CargoId,
    /// State before the change. Always `Normal`.
    pub from: CargoState,
    /// State after the change.
    pub to: CargoState,
}

/// One cargo unit and its evolving condition.
#[derive(Debug, Clone)]
pub struct CargoEntity {
    /// Identity.
    id: CargoId,
    /// Shared item data, or `None` while inert.
    definition: Option<Arc<ItemDefinition>>,
    /// Cell on the grid, or `None` while carried.
    position: Option<GridCoordinate>,
    /// Current freshness in `[0, max_freshness]`.
    freshness: f32,
    /// Current condition.
    state: CargoState,
    /// Stench stacks received from spoiled neighbours.
    stench_stack: u32,
    /// Ticks since this cargo last radiated stench.
    stench_timer: u32,
    /// Completed over-chill windows.
    freeze_stack: u32,
    /// Consecutive over-chilled ticks in the current window.
    freeze_timer: u32,
    /// Heat/cold flags from the most recent neighbour scan.
    proximity: Proximity,
}

impl CargoEntity {
    /// Create a cargo at full freshness for its definition.
    ///
    /// The cargo starts unplaced; the simulation sets its position when it
    /// is registered on the grid.
    pub fn new(id: CargoId, definition: Option<Arc<ItemDefinition>>) -> Self {
        let freshness = definition
            .as_ref()
            .map_or(0.0, |def| def.max_freshness.max(0.0));
        Self {
            id,
            definition,
            position: None,
            freshness,
            state: CargoState::Normal,
            stench_stack: 0,
            stench_timer: 0,
            freeze_stack: 0,
            freeze_timer: 0,
            proximity: Proximity::default(),
        }
    }

    // -------------------------------------------------------------------
    // Identity and data
    // -------------------------------------------------------------------

    /// Identity.
    pub const fn id(&self) -> CargoId {
        self.id
    }

    /// Shared item data, if assigned.
    pub fn definition(&self) -> Option<&ItemDefinition> {
        self.definition.as_deref()
    }

    /// Whether the cargo has no item data and must be skipped by every rule.
    pub const fn is_inert(&self) -> bool {
        self.definition.is_none()
    }

    /// Assign item data, resetting freshness to the item's maximum.
    ///
    /// Counters and state are left alone; assigning data to a cargo that has
    /// already transitioned does not revive it.
    pub fn assign_definition(&mut self, definition: Arc<ItemDefinition>) {
        self.freshness = definition.max_freshness.max(0.0);
        self.definition = Some(definition);
    }

    /// The item's own storage attribute (`RoomTemp` while inert).
    pub fn attribute(&self) -> StorageAttribute {
        self.definition
            .as_ref()
            .map_or(StorageAttribute::RoomTemp, |def| def.attribute)
    }

    /// The item's category (`General` while inert).
    pub fn category(&self) -> ItemCategory {
        self.definition
            .as_ref()
            .map_or(ItemCategory::General, |def| def.category)
    }

    /// Attribute used for neighbour influence: the item's own attribute while
    /// `Normal`, `RoomTemp` once transitioned or while inert.
    pub fn effective_attribute(&self) -> StorageAttribute {
        if self.state.is_terminal() {
            StorageAttribute::RoomTemp
        } else {
            self.attribute()
        }
    }

    // -------------------------------------------------------------------
    // Placement
    // -------------------------------------------------------------------

    /// Cell on the grid, or `None` while carried or unplaced.
    pub const fn position(&self) -> Option<GridCoordinate> {
        self.position
    }

    /// Record the cargo's cell. Only the simulation keeps this in step with
    /// the grid registry.
    pub const fn set_position(&mut self, position: Option<GridCoordinate>) {
        self.position = position;
    }

    // -------------------------------------------------------------------
    // Freshness
    // -------------------------------------------------------------------

    /// Current freshness.
    pub const fn freshness(&self) -> f32 {
        self.freshness
    }

    /// Freshness ceiling (0 while inert).
    pub fn max_freshness(&self) -> f32 {
        self.definition
            .as_ref()
            .map_or(0.0, |def| def.max_freshness.max(0.0))
    }

    /// Add `delta` to freshness and clamp to `[0, max_freshness]`.
    ///
    /// Returns the change actually applied after clamping.
    pub fn adjust_freshness(&mut self, delta: f32) -> f32 {
        let before = self.freshness;
        self.freshness = (before + delta).max(0.0).min(self.max_freshness());
        self.freshness - before
    }

    /// Remove `amount` freshness, never going below zero.
    ///
    /// Returns `true` if this call took the cargo to zero while it is still
    /// `Normal`, i.e. the zero-freshness transition is now due.
    pub fn apply_damage(&mut self, amount: f32) -> bool {
        if self.is_inert() || amount <= 0.0 {
            return false;
        }
        let was_positive = self.freshness > 0.0;
        self.adjust_freshness(-amount);
        was_positive && self.needs_zero_transition()
    }

    /// Whether freshness is at zero while the cargo is still `Normal`.
    pub fn needs_zero_transition(&self) -> bool {
        !self.is_inert() && self.state == CargoState::Normal && self.freshness <= 0.0
    }

    // -------------------------------------------------------------------
    // State machine
    // -------------------------------------------------------------------

    /// Current condition.
    pub const fn state(&self) -> CargoState {
        self.state
    }

    /// Move from `Normal` to `to`.
    ///
    /// Returns `None` (and changes nothing) if the cargo has already left
    /// `Normal`, is inert, or `to` is `Normal`: each cargo transitions at
    /// most once.
    pub fn transition_to(&mut self, to: CargoState) -> Option<StateChange> {
        if self.is_inert() || self.state.is_terminal() || !to.is_terminal() {
            return None;
        }
        let from = self.state;
        self.state = to;
        self.freeze_timer = 0;
        self.stench_timer = 0;
        debug!(cargo = %self.id, ?from, ?to, freshness = self.freshness, "Cargo changed state");
        Some(StateChange {
            cargo: self.id,
            from,
            to,
        })
    }

    /// Zero freshness and spoil outright, bypassing the transition table.
    pub fn force_spoil(&mut self) -> Option<StateChange> {
        let change = self.transition_to(CargoState::Spoiled)?;
        self.freshness = 0.0;
        Some(change)
    }

    // -------------------------------------------------------------------
    // Secondary counters
    // -------------------------------------------------------------------

    /// Stench stacks received so far.
    pub const fn stench_stack(&self) -> u32 {
        self.stench_stack
    }

    /// Receive one stench stack.
    ///
    /// Returns `true` if the stack pushed a `Normal` cargo to the spoil
    /// threshold.
    pub fn add_stench_stack(&mut self, rules: &CargoRules) -> bool {
        self.stench_stack = self.stench_stack.saturating_add(1);
        self.state == CargoState::Normal
            && !self.is_inert()
            && self.stench_stack >= rules.stench_spoil_threshold
    }

    /// Advance the stench timer of a spoiled cargo.
    ///
    /// Returns `true` on the ticks where the cargo radiates a stack to its
    /// neighbours. Always `false` unless the cargo is `Spoiled`.
    pub fn tick_stench(&mut self, rules: &CargoRules) -> bool {
        if self.state != CargoState::Spoiled {
            return false;
        }
        self.stench_timer = self.stench_timer.saturating_add(1);
        if self.stench_timer >= rules.stench_interval_ticks.max(1) {
            self.stench_timer = 0;
            return true;
        }
        false
    }

    /// Completed over-chill windows.
    pub const fn freeze_stack(&self) -> u32 {
        self.freeze_stack
    }

    /// Account one tick of over-chill tracking.
    ///
    /// A tick above nominal freshness extends the current window; any other
    /// tick resets it. Each full window earns a freeze stack. Returns `true`
    /// once the stacks reach the burst limit on a `Normal` cargo.
    pub fn track_over_chill(&mut self, rules: &CargoRules) -> bool {
        if self.state != CargoState::Normal || self.is_inert() {
            return false;
        }
        if self.freshness > rules.nominal_freshness {
            self.freeze_timer = self.freeze_timer.saturating_add(1);
            if self.freeze_timer >= rules.freeze_window_ticks.max(1) {
                self.freeze_timer = 0;
                self.freeze_stack = self.freeze_stack.saturating_add(1);
            }
        } else {
            self.freeze_timer = 0;
        }
        self.freeze_stack >= rules.freeze_burst_stacks.max(1)
    }

    // -------------------------------------------------------------------
    // Neighbourhood flags
    // -------------------------------------------------------------------

    /// Flags from the most recent neighbour scan.
    pub const fn proximity(&self) -> Proximity {
        self.proximity
    }

    /// Replace the neighbour flags. Recomputed from scratch every tick.
    pub const fn set_proximity(&mut self, proximity: Proximity) {
        self.proximity = proximity;
    }

    /// Read-only view for external consumers.
    pub fn snapshot(&self) -> CargoSnapshot {
        CargoSnapshot {
            id: self.id,
            item: self.definition.as_ref().map(|def| def.name.clone()),
            attribute: self.attribute(),
            state: self.state,
            freshness: self.freshness,
            max_freshness: self.max_freshness(),
            position: self.position,
            stench_stack: self.stench_stack,
            freeze_stack: self.freeze_stack,
        }
    }
}
