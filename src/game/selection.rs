//! Renderer-facing focus state.
//!
//! Written by the command processor, read by the renderer and by command
//! validation. The turn engine never sees it.

use crate::game::{CityId, Hex, Unit, UnitId};

/// What the player currently has selected.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Selection {
    /// Selected unit, if any.
    pub unit: Option<UnitId>,
    /// Selected city, if any.
    pub city: Option<CityId>,
    /// Last clicked coordinate.
    pub tile: Option<Hex>,
    /// Last enemy engaged in combat, as it stood after the fight.
    pub last_enemy: Option<Unit>,
}

impl Selection {
    /// Nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Focus a unit, dropping city and enemy focus.
    pub fn focus_unit(&mut self, id: UnitId) {
        self.unit = Some(id);
        self.city = None;
        self.last_enemy = None;
    }

    /// Focus a city, dropping unit and enemy focus.
    pub fn focus_city(&mut self, id: CityId) {
        self.city = Some(id);
        self.unit = None;
        self.last_enemy = None;
    }

    /// Drop all entity focus. The clicked tile is kept.
    pub fn clear(&mut self) {
        self.unit = None;
        self.city = None;
        self.last_enemy = None;
    }
}
