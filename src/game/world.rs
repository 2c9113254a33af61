//! The world aggregate: everything the turn engine simulates.

use crate::game::{EntityStore, TechTree, WorldMap};

/// Complete simulation state.
///
/// Selection and other view state live in
/// [`Selection`](crate::game::Selection), never here.
#[derive(Debug, Clone)]
pub struct World {
    /// The tile set.
    pub map: WorldMap,
    /// Units and cities.
    pub entities: EntityStore,
    /// Gold treasury.
    pub gold: u32,
    /// Lifetime science produced.
    pub science: u32,
    /// Current turn number, starting at 1.
    pub turn: u32,
    /// Research state.
    pub tech: TechTree,
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldMap::default())
    }
}

impl World {
    /// Create a world on the given map with no units or cities.
    #[must_use]
    pub fn new(map: WorldMap) -> Self {
        Self {
            map,
            entities: EntityStore::new(),
            gold: 0,
            science: 0,
            turn: 1,
            tech: TechTree::new(),
        }
    }

    /// Current turn number.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }
}
