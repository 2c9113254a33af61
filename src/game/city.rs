//! Cities, buildings and production orders.

use serde::{Deserialize, Serialize};

use crate::game::{Faction, Hex, UnitKind};

/// Unique identifier for a city, assigned sequentially from 1.
pub type CityId = u32;

/// Food a city needs per population point before it grows.
pub const FOOD_PER_POPULATION: u32 = 10;

/// A city improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Building {
    /// +2 food.
    Granary,
    /// +1 production.
    Barracks,
    /// +1 production, +1 science.
    Monument,
}

impl Building {
    /// Every building, in menu order.
    pub const ALL: [Building; 3] = [Building::Granary, Building::Barracks, Building::Monument];

    /// Production cost.
    #[must_use]
    pub const fn production_cost(self) -> u32 {
        match self {
            Building::Granary => 12,
            Building::Barracks => 15,
            Building::Monument => 8,
        }
    }
}

impl std::fmt::Display for Building {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Building::Granary => "Granary",
            Building::Barracks => "Barracks",
            Building::Monument => "Monument",
        };
        f.write_str(label)
    }
}

/// What a city is currently producing. At most one order exists at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "kind")]
pub enum ProductionOrder {
    /// Idle.
    #[default]
    None,
    /// Training a unit.
    Unit(UnitKind),
    /// Constructing a building.
    Building(Building),
}

impl ProductionOrder {
    /// Production cost of the order, if it has one.
    #[must_use]
    pub const fn cost(self) -> Option<u32> {
        match self {
            ProductionOrder::None => None,
            ProductionOrder::Unit(kind) => kind.production_cost(),
            ProductionOrder::Building(building) => Some(building.production_cost()),
        }
    }

    /// Whether no order is queued.
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, ProductionOrder::None)
    }
}

/// Which buildings a city has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Buildings {
    /// Granary built.
    pub granary: bool,
    /// Barracks built.
    pub barracks: bool,
    /// Monument built.
    pub monument: bool,
}

impl Buildings {
    /// Whether the given building is present.
    #[must_use]
    pub const fn has(self, building: Building) -> bool {
        match building {
            Building::Granary => self.granary,
            Building::Barracks => self.barracks,
            Building::Monument => self.monument,
        }
    }

    /// Mark a building as constructed.
    pub fn add(&mut self, building: Building) {
        match building {
            Building::Granary => self.granary = true,
            Building::Barracks => self.barracks = true,
            Building::Monument => self.monument = true,
        }
    }
}

/// A city on the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    /// Unique identifier.
    pub id: CityId,
    /// Display name.
    pub name: String,
    /// Owning side.
    pub owner: Faction,
    /// Location. At most one city per tile.
    pub hex: Hex,
    /// Population, at least 1.
    pub population: u32,
    /// Food stored toward the next population point.
    pub food: u32,
    /// Production stored toward the current order.
    pub production: u32,
    /// Constructed buildings.
    pub buildings: Buildings,
    /// Current production order.
    pub order: ProductionOrder,
}

impl City {
    /// Found a new size-1 city named after its id.
    #[must_use]
    pub fn new(id: CityId, owner: Faction, hex: Hex) -> Self {
        Self {
            id,
            name: format!("City {id}"),
            owner,
            hex,
            population: 1,
            food: 0,
            production: 0,
            buildings: Buildings::default(),
            order: ProductionOrder::None,
        }
    }

    /// Food needed to grow at the current population.
    #[must_use]
    pub const fn growth_threshold(&self) -> u32 {
        FOOD_PER_POPULATION * self.population
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_city() {
        let city = City::new(3, Faction::Player, Hex::new(1, 2));
        assert_eq!(city.name, "City 3");
        assert_eq!(city.population, 1);
        assert_eq!(city.growth_threshold(), 10);
        assert!(city.order.is_none());
        assert_eq!(city.buildings, Buildings::default());
    }

    #[test]
    fn test_order_costs() {
        assert_eq!(ProductionOrder::None.cost(), None);
        assert_eq!(ProductionOrder::Unit(UnitKind::Archer).cost(), Some(15));
        assert_eq!(ProductionOrder::Building(Building::Granary).cost(), Some(12));
        assert_eq!(ProductionOrder::Building(Building::Barracks).cost(), Some(15));
        assert_eq!(ProductionOrder::Building(Building::Monument).cost(), Some(8));
        assert_eq!(ProductionOrder::Unit(UnitKind::Barbarian).cost(), None);
    }

    #[test]
    fn test_buildings_add() {
        let mut buildings = Buildings::default();
        for building in Building::ALL {
            assert!(!buildings.has(building));
            buildings.add(building);
            assert!(buildings.has(building));
        }
    }
}
