//! Procedural map generation.
//!
//! The shape is fixed (a hexagon of the requested radius with an ocean rim)
//! while the content is drawn from the game's [`GameRng`].

// Radius and coordinates are small; the float conversions are exact.
#![allow(clippy::cast_precision_loss)]

use log::{debug, info};

use crate::game::{
    Faction, GameRng, Hex, HexTile, Resource, Terrain, UnitId, UnitKind, World, WorldMap, hexagon,
};

/// Fraction of the radius beyond which every tile is ocean.
const OCEAN_RIM: f64 = 0.8;
/// Noise above this is mountain.
const MOUNTAIN_THRESHOLD: f64 = 0.85;
/// Noise above this (and not mountain) is hill.
const HILL_THRESHOLD: f64 = 0.70;
/// Chance a grassland tile gets wheat.
const WHEAT_CHANCE: f64 = 0.10;
/// Chance a hill tile gets iron.
const IRON_CHANCE: f64 = 0.15;
/// Camps need |q| or |r| strictly above this.
const CAMP_MIN_OFFSET: i32 = 3;

/// Where the starting settler stands.
pub const SETTLER_START: Hex = Hex::new(0, 0);
/// Where the starting warrior stands.
pub const WARRIOR_START: Hex = Hex::new(1, -1);

/// Pick a terrain for a coordinate.
///
/// `noise` is only consulted for tiles inside the ocean rim.
#[must_use]
pub fn classify_terrain(hex: Hex, radius: u32, noise: f64) -> Terrain {
    if hex.axial_length() > f64::from(radius) * OCEAN_RIM {
        Terrain::Ocean
    } else if noise > MOUNTAIN_THRESHOLD {
        Terrain::Mountain
    } else if noise > HILL_THRESHOLD {
        Terrain::Hill
    } else {
        Terrain::Grassland
    }
}

/// Generate the terrain of a hexagonal map.
#[must_use]
pub fn generate_terrain(radius: u32, rng: &mut GameRng) -> WorldMap {
    let mut map = WorldMap::new(radius);

    for hex in hexagon(radius) {
        let noise = rng.unit_f64();
        let terrain = classify_terrain(hex, radius, noise);
        let resource = match terrain {
            Terrain::Grassland if rng.chance(WHEAT_CHANCE) => Resource::Wheat,
            Terrain::Hill if rng.chance(IRON_CHANCE) => Resource::Iron,
            _ => Resource::None,
        };
        map.insert(HexTile::new(hex, terrain).with_resource(resource));
    }

    map
}

/// Whether a barbarian camp may be placed on the tile.
#[must_use]
pub fn is_camp_site(tile: &HexTile) -> bool {
    tile.terrain != Terrain::Ocean
        && tile.terrain != Terrain::Mountain
        && (tile.hex.q.abs() > CAMP_MIN_OFFSET || tile.hex.r.abs() > CAMP_MIN_OFFSET)
}

/// Place one barbarian camp with a defender on a random valid tile.
///
/// Returns the defender's id, or `None` if no tile qualifies.
pub fn spawn_barbarian_camp(world: &mut World, rng: &mut GameRng) -> Option<UnitId> {
    let sites: Vec<Hex> = world
        .map
        .iter()
        .filter(|t| is_camp_site(t))
        .map(|t| t.hex)
        .collect();

    let Some(idx) = rng.index(sites.len()) else {
        debug!("no valid barbarian camp site on radius {} map", world.map.radius());
        return None;
    };
    let hex = sites[idx];

    world.map.set_camp(hex, true);
    let id = world
        .entities
        .spawn_unit(UnitKind::Barbarian, Faction::Barbarian, hex);
    debug!("barbarian camp at {hex}, defender #{id}");
    Some(id)
}

/// Build a fresh world: terrain, starting units and one barbarian camp.
#[must_use]
pub fn generate_world(radius: u32, rng: &mut GameRng) -> World {
    let mut world = World::new(generate_terrain(radius, rng));

    world
        .entities
        .spawn_unit(UnitKind::Settler, Faction::Player, SETTLER_START);
    world
        .entities
        .spawn_unit(UnitKind::Warrior, Faction::Player, WARRIOR_START);

    let camp = spawn_barbarian_camp(&mut world, rng);

    info!(
        "generated radius {radius} map: {} tiles, camp {}",
        world.map.len(),
        if camp.is_some() { "placed" } else { "absent" }
    );
    world
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_rim_is_ocean() {
        // distance 10 > 0.8 * 10
        assert_eq!(classify_terrain(Hex::new(10, 0), 10, 0.0), Terrain::Ocean);
        assert_eq!(classify_terrain(Hex::new(8, 0), 10, 0.0), Terrain::Grassland);
        assert_eq!(classify_terrain(Hex::new(9, -1), 10, 0.0), Terrain::Ocean);
    }

    #[test]
    fn test_classify_noise_buckets() {
        let hex = Hex::ORIGIN;
        assert_eq!(classify_terrain(hex, 10, 0.86), Terrain::Mountain);
        assert_eq!(classify_terrain(hex, 10, 0.85), Terrain::Hill);
        assert_eq!(classify_terrain(hex, 10, 0.71), Terrain::Hill);
        assert_eq!(classify_terrain(hex, 10, 0.70), Terrain::Grassland);
        assert_eq!(classify_terrain(hex, 10, 0.0), Terrain::Grassland);
    }

    #[test]
    fn test_generated_terrain_rules() {
        let mut rng = GameRng::new(99);
        let map = generate_terrain(10, &mut rng);
        assert_eq!(map.len(), 331);
        for tile in map.iter() {
            let outside = tile.hex.axial_length() > 10.0 * OCEAN_RIM;
            assert_eq!(tile.terrain == Terrain::Ocean, outside, "tile {}", tile.hex);
            assert_eq!(tile.height, tile.terrain.height());
            match tile.resource {
                Resource::Wheat => assert_eq!(tile.terrain, Terrain::Grassland),
                Resource::Iron => assert_eq!(tile.terrain, Terrain::Hill),
                Resource::None => {}
            }
            assert!(tile.explored);
            assert!(!tile.road);
        }
    }

    #[test]
    fn test_world_has_one_camp() {
        let mut rng = GameRng::new(5);
        let world = generate_world(10, &mut rng);
        let camps: Vec<_> = world.map.camps().collect();
        assert_eq!(camps.len(), 1);

        let camp = world.map.get(camps[0]).unwrap();
        assert!(is_camp_site(camp));

        let defender = world.entities.unit_at(camps[0]).unwrap();
        assert_eq!(defender.kind, UnitKind::Barbarian);
        assert_eq!(defender.owner, Faction::Barbarian);
        assert_eq!((defender.attack, defender.defense), (5, 5));
        assert_eq!((defender.health, defender.max_health), (10, 10));
    }

    #[test]
    fn test_starting_units() {
        let mut rng = GameRng::new(5);
        let world = generate_world(10, &mut rng);
        let settler = world.entities.unit_at(SETTLER_START).unwrap();
        assert_eq!(settler.kind, UnitKind::Settler);
        assert_eq!(settler.owner, Faction::Player);
        let warrior = world.entities.unit_at(WARRIOR_START).unwrap();
        assert_eq!(warrior.kind, UnitKind::Warrior);
        assert_eq!(world.entities.units().len(), 3);
        assert_eq!(world.turn(), 1);
    }

    #[test]
    fn test_tiny_map_has_no_camp() {
        let mut rng = GameRng::new(1);
        let world = generate_world(3, &mut rng);
        assert_eq!(world.map.camps().count(), 0);
        assert_eq!(world.entities.units().len(), 2);
    }

    #[test]
    fn test_same_seed_same_map() {
        let a = generate_world(8, &mut GameRng::new(77));
        let b = generate_world(8, &mut GameRng::new(77));
        let tiles_a: Vec<_> = a.map.iter().copied().collect();
        let tiles_b: Vec<_> = b.map.iter().copied().collect();
        assert_eq!(tiles_a, tiles_b);
    }
}
