//! Economy: tile and city yields.
//!
//! A city works its own tile and the six tiles around it. Yield is
//!
//! ```text
//! center base (2 food, 1 prod, 2 gold, 1 sci)
//!   + population / 2 science
//!   + center tile (terrain + resource)
//!   + six neighbor tiles (terrain + resource)
//!   + buildings
//! ```
//!
//! There is no upkeep, so yields are never negative.

use std::ops::{Add, AddAssign};

use serde::Serialize;

use crate::game::{City, HexTile, Resource, Terrain, WorldMap};

/// Per-turn output of a tile or city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Yields {
    /// Food, feeds growth.
    pub food: u32,
    /// Production, builds units and buildings.
    pub production: u32,
    /// Gold, added to the treasury.
    pub gold: u32,
    /// Science, drives research.
    pub science: u32,
}

impl Yields {
    /// Create a yield bundle.
    #[must_use]
    pub const fn new(food: u32, production: u32, gold: u32, science: u32) -> Self {
        Self {
            food,
            production,
            gold,
            science,
        }
    }
}

impl Add for Yields {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            food: self.food + rhs.food,
            production: self.production + rhs.production,
            gold: self.gold + rhs.gold,
            science: self.science + rhs.science,
        }
    }
}

impl AddAssign for Yields {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Fixed output of every city center.
pub const CITY_CENTER_BASE: Yields = Yields::new(2, 1, 2, 1);

const GRANARY_BONUS: Yields = Yields::new(2, 0, 0, 0);
const BARRACKS_BONUS: Yields = Yields::new(0, 1, 0, 0);
const MONUMENT_BONUS: Yields = Yields::new(0, 1, 0, 1);

/// Yield of a tile's terrain plus its resource.
#[must_use]
pub const fn tile_yield(tile: &HexTile) -> Yields {
    let base = match tile.terrain {
        Terrain::Grassland => Yields::new(1, 0, 0, 0),
        Terrain::Ocean | Terrain::Coast => Yields::new(1, 0, 1, 0),
        Terrain::Hill => Yields::new(0, 1, 0, 0),
        Terrain::Plains | Terrain::Mountain | Terrain::Snow => Yields::new(0, 0, 0, 0),
    };
    match tile.resource {
        Resource::None => base,
        Resource::Wheat => Yields::new(base.food + 1, base.production, base.gold, base.science),
        Resource::Iron => Yields::new(base.food, base.production + 1, base.gold, base.science),
    }
}

/// Total per-turn yield of a city.
///
/// Tiles missing from the map contribute nothing.
#[must_use]
pub fn city_yields(map: &WorldMap, city: &City) -> Yields {
    let mut total = CITY_CENTER_BASE;
    total.science += city.population / 2;

    if let Some(center) = map.get(city.hex) {
        total += tile_yield(center);
    }

    for neighbor in city.hex.neighbors() {
        if let Some(tile) = map.get(neighbor) {
            total += tile_yield(tile);
        }
    }

    if city.buildings.granary {
        total += GRANARY_BONUS;
    }
    if city.buildings.barracks {
        total += BARRACKS_BONUS;
    }
    if city.buildings.monument {
        total += MONUMENT_BONUS;
    }

    total
}
