//! World invariants - sanity checks that detect bugs.
//!
//! No sequence of player commands and turns should ever trigger these.
//! If one does, the command processor or turn engine has a bug.

use std::collections::HashSet;

use crate::game::{TechTree, World};

/// Sanity bound: population per city should never exceed this.
/// Growth is at most one point per turn, so this is very generous.
pub const SANITY_MAX_POP_PER_CITY: u32 = 100_000;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all world invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(world: &World) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut push = |message: String| violations.push(InvariantViolation { message });

    let mut unit_ids = HashSet::new();
    for unit in world.entities.units() {
        if !unit_ids.insert(unit.id) {
            push(format!("Duplicate unit id {}", unit.id));
        }
        if unit.health <= 0 || unit.health > unit.max_health {
            push(format!(
                "Unit #{} has health {} outside 1..={}",
                unit.id, unit.health, unit.max_health
            ));
        }
        if unit.movement < 0.0 || unit.movement.is_nan() {
            push(format!("Unit #{} has movement {}", unit.id, unit.movement));
        }
        if !world.map.contains(unit.hex) {
            push(format!("Unit #{} stands off the map at {}", unit.id, unit.hex));
        }
    }

    let mut city_ids = HashSet::new();
    let mut city_tiles = HashSet::new();
    for city in world.entities.cities() {
        if !city_ids.insert(city.id) {
            push(format!("Duplicate city id {}", city.id));
        }
        if !city_tiles.insert(city.hex) {
            push(format!("Second city on tile {}", city.hex));
        }
        if city.population == 0 || city.population > SANITY_MAX_POP_PER_CITY {
            push(format!(
                "City #{} has population {} outside 1..={SANITY_MAX_POP_PER_CITY}",
                city.id, city.population
            ));
        }
        if city.food >= city.growth_threshold() {
            push(format!(
                "City #{} holds {} food, past its growth threshold {}",
                city.id,
                city.food,
                city.growth_threshold()
            ));
        }
    }

    for camp in world.map.camps() {
        if world.map.get(camp).is_some_and(|t| t.terrain.is_water()) {
            push(format!("Camp on water at {camp}"));
        }
    }

    check_research(&world.tech, &mut push);

    violations
}

fn check_research(tech: &TechTree, push: &mut impl FnMut(String)) {
    for unlocked in tech.unlocked() {
        for prereq in unlocked.prerequisites() {
            if !tech.is_unlocked(*prereq) {
                push(format!("{unlocked} unlocked without {prereq}"));
            }
        }
    }
    if let Some(current) = tech.current().filter(|t| tech.is_unlocked(*t)) {
        push(format!("Researching {current}, which is already unlocked"));
    }
}

/// Assert all world invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(world: &World) {
    let violations = check_invariants(world);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("World invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_world: &World) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{City, Faction, Hex, HexTile, Tech, Terrain, UnitKind, WorldMap};

    fn create_valid_world() -> World {
        let mut map = WorldMap::new(1);
        map.insert(HexTile::new(Hex::ORIGIN, Terrain::Grassland));
        map.insert(HexTile::new(Hex::new(1, 0), Terrain::Hill));
        let mut world = World::new(map);
        world
            .entities
            .spawn_unit(UnitKind::Warrior, Faction::Player, Hex::new(1, 0));
        world.entities.found_city(Faction::Player, Hex::ORIGIN);
        world
    }

    #[test]
    fn test_valid_world_passes() {
        let world = create_valid_world();
        let violations = check_invariants(&world);
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_banked_science_passes() {
        let mut world = create_valid_world();
        world.tech.add_progress(75);
        assert!(check_invariants(&world).is_empty());
    }

    #[test]
    fn test_empty_world_passes() {
        assert!(check_invariants(&World::default()).is_empty());
    }

    #[test]
    fn test_health_above_max_detected() {
        let mut world = create_valid_world();
        world.entities.unit_mut(1).unwrap().health = 13;
        let violations = check_invariants(&world);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("health"));
    }

    #[test]
    fn test_dead_unit_detected() {
        let mut world = create_valid_world();
        world.entities.unit_mut(1).unwrap().health = 0;
        assert!(check_invariants(&world)[0].message.contains("health"));
    }

    #[test]
    fn test_negative_movement_detected() {
        let mut world = create_valid_world();
        world.entities.unit_mut(1).unwrap().movement = -0.5;
        assert!(check_invariants(&world)[0].message.contains("movement"));
    }

    #[test]
    fn test_off_map_unit_detected() {
        let mut world = create_valid_world();
        world.entities.unit_mut(1).unwrap().hex = Hex::new(4, 4);
        assert!(check_invariants(&world)[0].message.contains("off the map"));
    }

    #[test]
    fn test_zero_population_detected() {
        let mut world = create_valid_world();
        world.entities.city_mut(1).unwrap().population = 0;
        assert!(check_invariants(&world)[0].message.contains("population"));
    }

    #[test]
    fn test_stacked_cities_detected() {
        let mut world = create_valid_world();
        let id = world
            .entities
            .add_city(City::new(0, Faction::Player, Hex::new(1, 0)))
            .unwrap();
        world.entities.city_mut(id).unwrap().hex = Hex::ORIGIN;
        let violations = check_invariants(&world);
        assert!(violations.iter().any(|v| v.message.contains("Second city")));
    }

    #[test]
    fn test_research_without_prerequisite_detected() {
        let mut world = create_valid_world();
        world.tech.unlock(Tech::IronWorking);
        let violations = check_invariants(&world);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("Bronze Working"));
    }

    #[test]
    fn test_multiple_violations_all_reported() {
        let mut world = create_valid_world();
        world.entities.unit_mut(1).unwrap().health = 99;
        world.entities.city_mut(1).unwrap().population = 0;
        let violations = check_invariants(&world);
        assert!(violations.len() >= 2, "{violations:?}");
    }

    #[test]
    #[should_panic(expected = "World invariant violations")]
    #[cfg(debug_assertions)]
    fn test_assert_panics() {
        let mut world = create_valid_world();
        world.entities.unit_mut(1).unwrap().movement = -1.0;
        assert_invariants(&world);
    }
}
