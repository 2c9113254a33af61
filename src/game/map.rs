//! Map and tile types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::game::Hex;

/// Type of terrain on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    /// Deep water ringing the map.
    Ocean,
    /// Shallow water.
    Coast,
    /// Grassland - the food terrain.
    Grassland,
    /// Plains.
    Plains,
    /// Hills - the production terrain.
    Hill,
    /// Mountains.
    Mountain,
    /// Snow.
    Snow,
}

impl Terrain {
    /// Height class used by renderers and by generation.
    #[must_use]
    pub const fn height(self) -> u8 {
        match self {
            Terrain::Mountain => 3,
            Terrain::Hill => 2,
            _ => 1,
        }
    }

    /// Whether this terrain is water.
    #[must_use]
    pub const fn is_water(self) -> bool {
        matches!(self, Terrain::Ocean | Terrain::Coast)
    }
}

/// Special resource on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// No resource.
    #[default]
    None,
    /// Extra food.
    Wheat,
    /// Extra production.
    Iron,
}

/// A single tile on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexTile {
    /// Location of this tile.
    pub hex: Hex,
    /// Type of terrain.
    pub terrain: Terrain,
    /// Height class.
    pub height: u8,
    /// Special resource, if any.
    pub resource: Resource,
    /// Whether a road has been built here.
    pub road: bool,
    /// Whether a barbarian camp stands here.
    pub camp: bool,
    /// Always true; there is no fog of war.
    pub explored: bool,
}

impl HexTile {
    /// Create a bare tile with the terrain's default height.
    #[must_use]
    pub const fn new(hex: Hex, terrain: Terrain) -> Self {
        Self {
            hex,
            terrain,
            height: terrain.height(),
            resource: Resource::None,
            road: false,
            camp: false,
            explored: true,
        }
    }

    /// Builder-style resource assignment.
    #[must_use]
    pub const fn with_resource(mut self, resource: Resource) -> Self {
        self.resource = resource;
        self
    }

    /// Builder-style road assignment.
    #[must_use]
    pub const fn with_road(mut self) -> Self {
        self.road = true;
        self
    }
}

/// The game map: a set of tiles addressed by axial coordinate.
///
/// Tiles are kept in insertion order so iteration is deterministic.
#[derive(Debug, Clone, Default)]
pub struct WorldMap {
    radius: u32,
    tiles: Vec<HexTile>,
    index: HashMap<Hex, usize>,
}

impl WorldMap {
    /// Create an empty map nominally covering the given radius.
    #[must_use]
    pub fn new(radius: u32) -> Self {
        Self {
            radius,
            tiles: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Radius the map was generated with.
    #[must_use]
    pub const fn radius(&self) -> u32 {
        self.radius
    }

    /// Number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the map has no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Insert a tile, replacing any tile already at its coordinate.
    pub fn insert(&mut self, tile: HexTile) {
        if let Some(&idx) = self.index.get(&tile.hex) {
            self.tiles[idx] = tile;
        } else {
            self.index.insert(tile.hex, self.tiles.len());
            self.tiles.push(tile);
        }
    }

    /// Check whether a tile exists at the coordinate.
    #[must_use]
    pub fn contains(&self, hex: Hex) -> bool {
        self.index.contains_key(&hex)
    }

    /// Get a reference to the tile at the given coordinate.
    #[must_use]
    pub fn get(&self, hex: Hex) -> Option<&HexTile> {
        self.index.get(&hex).map(|&idx| &self.tiles[idx])
    }

    /// Get a mutable reference to the tile at the given coordinate.
    #[must_use]
    pub fn get_mut(&mut self, hex: Hex) -> Option<&mut HexTile> {
        self.index.get(&hex).map(|&idx| &mut self.tiles[idx])
    }

    /// Whether the tile exists and has a road.
    #[must_use]
    pub fn has_road(&self, hex: Hex) -> bool {
        self.get(hex).is_some_and(|t| t.road)
    }

    /// Set or clear a road. Returns `false` if the tile is absent.
    pub fn set_road(&mut self, hex: Hex, road: bool) -> bool {
        match self.get_mut(hex) {
            Some(tile) => {
                tile.road = road;
                true
            }
            None => false,
        }
    }

    /// Set or clear a barbarian camp. Returns `false` if the tile is absent.
    pub fn set_camp(&mut self, hex: Hex, camp: bool) -> bool {
        match self.get_mut(hex) {
            Some(tile) => {
                tile.camp = camp;
                true
            }
            None => false,
        }
    }

    /// Height class of a tile, or 1 when the tile is absent.
    #[must_use]
    pub fn height_at(&self, hex: Hex) -> u8 {
        self.get(hex).map_or(1, |t| t.height)
    }

    /// Iterate over all tiles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &HexTile> {
        self.tiles.iter()
    }

    /// Coordinates of every tile holding a camp.
    pub fn camps(&self) -> impl Iterator<Item = Hex> + '_ {
        self.tiles.iter().filter(|t| t.camp).map(|t| t.hex)
    }
}
