//! Units, factions and per-kind base stats.

use serde::{Deserialize, Serialize};

use crate::game::Hex;

/// Unique identifier for a unit. Never reused within a world.
pub type UnitId = u32;

/// Movement points every unit gets back at the start of a turn.
pub const DEFAULT_MOVEMENT: f32 = 2.0;

/// Owning side of a unit or city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    /// The human player.
    Player,
    /// A rival civilization.
    Enemy,
    /// Barbarians spawned from camps.
    Barbarian,
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Faction::Player => "Player",
            Faction::Enemy => "Enemy",
            Faction::Barbarian => "Barbarian",
        };
        f.write_str(label)
    }
}

/// Kind of unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// Founds cities.
    Settler,
    /// Basic melee unit.
    Warrior,
    /// Ranged unit, needs archery.
    Archer,
    /// Fast attacker, needs the wheel.
    Chariot,
    /// Heavy infantry, needs iron working.
    Swordsman,
    /// Builds roads.
    Worker,
    /// Camp defender. Never buildable.
    Barbarian,
}

/// Combat stats a unit is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitStats {
    /// Starting and maximum health.
    pub health: i32,
    /// Attack power.
    pub attack: i32,
    /// Defense power.
    pub defense: i32,
}

impl UnitKind {
    /// Every buildable kind, in menu order.
    pub const BUILDABLE: [UnitKind; 6] = [
        UnitKind::Warrior,
        UnitKind::Settler,
        UnitKind::Worker,
        UnitKind::Archer,
        UnitKind::Chariot,
        UnitKind::Swordsman,
    ];

    /// Production cost, or `None` for kinds cities cannot build.
    #[must_use]
    pub const fn production_cost(self) -> Option<u32> {
        match self {
            UnitKind::Warrior => Some(10),
            UnitKind::Settler | UnitKind::Chariot => Some(20),
            UnitKind::Archer | UnitKind::Worker => Some(15),
            UnitKind::Swordsman => Some(25),
            UnitKind::Barbarian => None,
        }
    }

    /// Base stats for a freshly created unit of this kind.
    #[must_use]
    pub const fn base_stats(self) -> UnitStats {
        let (health, attack, defense) = match self {
            UnitKind::Warrior => (12, 6, 8),
            UnitKind::Archer => (8, 8, 4),
            UnitKind::Settler => (5, 0, 1),
            UnitKind::Chariot => (10, 10, 5),
            UnitKind::Swordsman => (15, 10, 10),
            UnitKind::Worker => (10, 4, 0),
            UnitKind::Barbarian => (10, 5, 5),
        };
        UnitStats {
            health,
            attack,
            defense,
        }
    }
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            UnitKind::Settler => "Settler",
            UnitKind::Warrior => "Warrior",
            UnitKind::Archer => "Archer",
            UnitKind::Chariot => "Chariot",
            UnitKind::Swordsman => "Swordsman",
            UnitKind::Worker => "Worker",
            UnitKind::Barbarian => "Barbarian",
        };
        f.write_str(label)
    }
}

/// A unit on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    /// Unique identifier.
    pub id: UnitId,
    /// Kind of unit.
    pub kind: UnitKind,
    /// Owning side.
    pub owner: Faction,
    /// Current position.
    pub hex: Hex,
    /// Movement points left this turn. Never negative.
    pub movement: f32,
    /// Current health. Positive while the unit exists.
    pub health: i32,
    /// Maximum health.
    pub max_health: i32,
    /// Attack power.
    pub attack: i32,
    /// Defense power.
    pub defense: i32,
}

impl Unit {
    /// Create a unit with its kind's base stats and full movement.
    #[must_use]
    pub fn new(id: UnitId, kind: UnitKind, owner: Faction, hex: Hex) -> Self {
        let stats = kind.base_stats();
        Self {
            id,
            kind,
            owner,
            hex,
            movement: DEFAULT_MOVEMENT,
            health: stats.health,
            max_health: stats.health,
            attack: stats.attack,
            defense: stats.defense,
        }
    }

    /// Whether the unit can still act this turn.
    #[must_use]
    pub fn can_move(&self) -> bool {
        self.movement > 0.0
    }

    /// Spend movement points, clamping at zero.
    pub fn spend_movement(&mut self, cost: f32) {
        self.movement = (self.movement - cost).max(0.0);
    }

    /// Apply damage. Returns `true` if the unit is now dead.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health -= amount;
        self.health <= 0
    }

    /// Whether the unit has been reduced to zero health.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.health <= 0
    }
}
