//! Read-only views of the world for renderers and tools.
//!
//! Views are plain owned data. Nothing here borrows from the live world,
//! so a snapshot stays valid while the simulation moves on.

use serde::Serialize;

use crate::game::{
    City, CityId, Faction, HexTile, ProductionOrder, Resource, Selection, Tech, Terrain, Unit,
    UnitId, UnitKind, World, WorldMap,
};

/// One map tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileView {
    /// Axial column.
    pub q: i32,
    /// Axial row.
    pub r: i32,
    /// Terrain kind.
    pub terrain: Terrain,
    /// Height class.
    pub height: u8,
    /// Whether the tile is paved.
    pub has_road: bool,
    /// Whether a barbarian camp stands here.
    pub has_camp: bool,
    /// Special resource.
    pub resource: Resource,
}

impl From<&HexTile> for TileView {
    fn from(tile: &HexTile) -> Self {
        Self {
            q: tile.hex.q,
            r: tile.hex.r,
            terrain: tile.terrain,
            height: tile.height,
            has_road: tile.road,
            has_camp: tile.camp,
            resource: tile.resource,
        }
    }
}

/// One unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitView {
    /// Unit id.
    pub id: UnitId,
    /// Unit kind.
    pub kind: UnitKind,
    /// Axial column.
    pub q: i32,
    /// Axial row.
    pub r: i32,
    /// Owning side.
    pub owner: Faction,
    /// Height of the tile the unit stands on.
    pub render_height: u8,
    /// Current health.
    pub health: i32,
    /// Maximum health.
    pub max_health: i32,
    /// Movement left this turn.
    pub movement: f32,
}

impl UnitView {
    /// Build a view of `unit` standing on `map`.
    #[must_use]
    pub fn new(unit: &Unit, map: &WorldMap) -> Self {
        Self {
            id: unit.id,
            kind: unit.kind,
            q: unit.hex.q,
            r: unit.hex.r,
            owner: unit.owner,
            render_height: map.height_at(unit.hex),
            health: unit.health,
            max_health: unit.max_health,
            movement: unit.movement,
        }
    }
}

/// One city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityView {
    /// City id.
    pub id: CityId,
    /// Display name.
    pub name: String,
    /// Axial column.
    pub q: i32,
    /// Axial row.
    pub r: i32,
    /// Population.
    pub population: u32,
    /// Height of the city tile.
    pub render_height: u8,
    /// Granary built.
    pub has_granary: bool,
    /// Barracks built.
    pub has_barracks: bool,
    /// Monument built.
    pub has_monument: bool,
    /// Current production order.
    pub order: ProductionOrder,
}

impl CityView {
    /// Build a view of `city` on `map`.
    #[must_use]
    pub fn new(city: &City, map: &WorldMap) -> Self {
        Self {
            id: city.id,
            name: city.name.clone(),
            q: city.hex.q,
            r: city.hex.r,
            population: city.population,
            render_height: map.height_at(city.hex),
            has_granary: city.buildings.granary,
            has_barracks: city.buildings.barracks,
            has_monument: city.buildings.monument,
            order: city.order,
        }
    }
}

/// Research state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResearchView {
    /// Technologies unlocked, in tree order.
    pub unlocked: Vec<Tech>,
    /// Current target.
    pub current: Option<Tech>,
    /// Progress toward the target.
    pub progress: u32,
}

/// What the player has selected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectionView {
    /// Selected unit id.
    pub unit: Option<UnitId>,
    /// Selected city id.
    pub city: Option<CityId>,
    /// Last clicked coordinate as `[q, r]`.
    pub tile: Option<[i32; 2]>,
    /// Last enemy engaged, as it stood after the fight.
    pub last_enemy: Option<UnitView>,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSnapshot {
    /// Current turn.
    pub turn: u32,
    /// Gold treasury.
    pub gold: u32,
    /// Lifetime science.
    pub science: u32,
    /// Research state.
    pub research: ResearchView,
    /// Selection state.
    pub selection: SelectionView,
    /// All tiles in generation order.
    pub tiles: Vec<TileView>,
    /// All units.
    pub units: Vec<UnitView>,
    /// All cities in founding order.
    pub cities: Vec<CityView>,
}

/// Every tile on the map.
#[must_use]
pub fn tile_views(world: &World) -> Vec<TileView> {
    world.map.iter().map(TileView::from).collect()
}

/// Every unit.
#[must_use]
pub fn unit_views(world: &World) -> Vec<UnitView> {
    world
        .entities
        .units()
        .iter()
        .map(|u| UnitView::new(u, &world.map))
        .collect()
}

/// Every city.
#[must_use]
pub fn city_views(world: &World) -> Vec<CityView> {
    world
        .entities
        .cities()
        .iter()
        .map(|c| CityView::new(c, &world.map))
        .collect()
}

/// Capture the whole world and selection.
#[must_use]
pub fn snapshot(world: &World, selection: &Selection) -> WorldSnapshot {
    WorldSnapshot {
        turn: world.turn,
        gold: world.gold,
        science: world.science,
        research: ResearchView {
            unlocked: world.tech.unlocked().collect(),
            current: world.tech.current(),
            progress: world.tech.progress(),
        },
        selection: SelectionView {
            unit: selection.unit,
            city: selection.city,
            tile: selection.tile.map(|h| [h.q, h.r]),
            last_enemy: selection
                .last_enemy
                .as_ref()
                .map(|u| UnitView::new(u, &world.map)),
        },
        tiles: tile_views(world),
        units: unit_views(world),
        cities: city_views(world),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Hex, WorldMap};

    fn hill_world() -> World {
        let mut map = WorldMap::new(1);
        map.insert(HexTile::new(Hex::ORIGIN, Terrain::Hill).with_resource(Resource::Iron));
        map.insert(HexTile::new(Hex::new(1, 0), Terrain::Grassland).with_road());
        World::new(map)
    }

    #[test]
    fn test_render_height_follows_tile() {
        let mut world = hill_world();
        world
            .entities
            .spawn_unit(UnitKind::Warrior, Faction::Player, Hex::ORIGIN);
        world
            .entities
            .spawn_unit(UnitKind::Warrior, Faction::Player, Hex::new(5, 5));
        let units = unit_views(&world);
        assert_eq!(units[0].render_height, 2);
        assert_eq!(units[1].render_height, 1);
    }

    #[test]
    fn test_tile_view_fields() {
        let world = hill_world();
        let tiles = tile_views(&world);
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0].terrain, Terrain::Hill);
        assert_eq!(tiles[0].resource, Resource::Iron);
        assert!(tiles[1].has_road);
        assert!(!tiles[1].has_camp);
    }

    #[test]
    fn test_snapshot_json() {
        let mut world = hill_world();
        world.entities.found_city(Faction::Player, Hex::ORIGIN);
        let mut selection = Selection::new();
        selection.tile = Some(Hex::new(1, 0));
        let json = serde_json::to_value(snapshot(&world, &selection)).unwrap();
        assert_eq!(json["turn"], 1);
        assert_eq!(json["cities"][0]["name"], "City 1");
        assert_eq!(json["cities"][0]["render_height"], 2);
        assert_eq!(json["cities"][0]["order"]["type"], "none");
        assert_eq!(json["tiles"][0]["terrain"], "hill");
        assert_eq!(json["selection"]["tile"][0], 1);
        assert!(json["research"]["current"].is_null());
    }
}
