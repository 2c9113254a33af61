#![no_main]

use arbitrary::Arbitrary;
use hexciv::game::{
    City, Faction, Hex, HexTile, ProductionOrder, Resource, Tech, Terrain, UnitKind, World,
    WorldMap, check_invariants, end_turn, hexagon,
};
use libfuzzer_sys::fuzz_target;

/// One city placed by the fuzzer.
#[derive(Arbitrary, Debug)]
struct CityInput {
    q: i8,
    r: i8,
    population: u16,
    food: u16,
    order: u8,
}

/// Structured input for economy fuzzing.
#[derive(Arbitrary, Debug)]
struct EconomyInput {
    /// Terrain selector per tile, cycled over the map.
    terrain: Vec<u8>,
    /// Cities to place (capped).
    cities: Vec<CityInput>,
    /// Research target selector.
    research: u8,
    /// Number of turns to simulate.
    turns: u8,
}

fn terrain(byte: u8) -> (Terrain, Resource) {
    let terrain = match byte % 7 {
        0 => Terrain::Ocean,
        1 => Terrain::Coast,
        2 => Terrain::Grassland,
        3 => Terrain::Plains,
        4 => Terrain::Hill,
        5 => Terrain::Mountain,
        _ => Terrain::Snow,
    };
    let resource = match (terrain, byte / 7 % 4) {
        (Terrain::Grassland, 0) => Resource::Wheat,
        (Terrain::Hill, 0) => Resource::Iron,
        _ => Resource::None,
    };
    (terrain, resource)
}

fn order(byte: u8) -> ProductionOrder {
    match byte % 4 {
        0 => ProductionOrder::None,
        1 => ProductionOrder::Unit(UnitKind::BUILDABLE[usize::from(byte / 4) % 6]),
        _ => ProductionOrder::Building(hexciv::game::Building::ALL[usize::from(byte / 4) % 3]),
    }
}

fuzz_target!(|input: EconomyInput| {
    const RADIUS: i32 = 4;
    let turns = input.turns % 30;

    let mut map = WorldMap::new(RADIUS as u32);
    for (i, hex) in hexagon(RADIUS as u32).enumerate() {
        let byte = if input.terrain.is_empty() {
            2
        } else {
            input.terrain[i % input.terrain.len()]
        };
        let (terrain, resource) = terrain(byte);
        map.insert(HexTile::new(hex, terrain).with_resource(resource));
    }
    let mut world = World::new(map);

    for c in input.cities.iter().take(8) {
        let hex = Hex::new(i32::from(c.q) % (RADIUS + 1), i32::from(c.r) % (RADIUS + 1));
        if !world.map.contains(hex) {
            continue;
        }
        let mut city = City::new(0, Faction::Player, hex);
        city.population = u32::from(c.population).clamp(1, 500);
        city.food = u32::from(c.food) % city.growth_threshold();
        city.order = order(c.order);
        world.entities.add_city(city);
    }

    let target = Tech::ALL[usize::from(input.research) % Tech::ALL.len()];
    if world.tech.can_research(target) {
        world.tech.set_target(target, hexciv::game::ResearchSwitch::Keep);
    }

    let violations = check_invariants(&world);
    assert!(violations.is_empty(), "bad setup: {violations:?}");

    for _ in 0..turns {
        let gold = world.gold;
        let science = world.science;
        end_turn(&mut world);
        assert!(world.gold >= gold);
        assert!(world.science >= science);

        let violations = check_invariants(&world);
        assert!(violations.is_empty(), "turn {}: {violations:?}", world.turn);
    }
});
