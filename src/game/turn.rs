//! The turn engine.
//!
//! Advancing a turn refreshes unit movement, then walks cities in founding
//! order: growth, treasuries, research, and at most one production order
//! per city.

use log::{debug, info};
use serde::Serialize;

use crate::game::{
    Building, City, CityId, DEFAULT_MOVEMENT, ProductionOrder, Tech, TechTree, UnitId, UnitKind,
    World, city_yields,
};

/// Something notable that happened during a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum TurnEvent {
    /// A city gained a population point.
    Grew {
        /// City that grew.
        city: CityId,
        /// New population.
        population: u32,
    },
    /// A city finished a unit.
    UnitCompleted {
        /// Producing city.
        city: CityId,
        /// New unit.
        unit: UnitId,
        /// Its kind.
        kind: UnitKind,
    },
    /// A city finished a building.
    BuildingCompleted {
        /// Producing city.
        city: CityId,
        /// The building.
        building: Building,
    },
    /// A city's order could no longer be built and was dropped.
    OrderCancelled {
        /// Affected city.
        city: CityId,
        /// The dropped order.
        order: ProductionOrder,
    },
    /// Research finished.
    TechUnlocked {
        /// The technology.
        tech: Tech,
    },
}

/// Summary of one call to [`end_turn`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    /// The turn that just began.
    pub turn: u32,
    /// Gold earned across all cities.
    pub gold: u32,
    /// Science earned across all cities.
    pub science: u32,
    /// Events in the order they happened.
    pub events: Vec<TurnEvent>,
}

impl TurnReport {
    /// Technologies unlocked this turn.
    pub fn unlocked(&self) -> impl Iterator<Item = Tech> + '_ {
        self.events.iter().filter_map(|e| match e {
            TurnEvent::TechUnlocked { tech } => Some(*tech),
            _ => None,
        })
    }
}

/// Advance the world by one turn.
pub fn end_turn(world: &mut World) -> TurnReport {
    world.turn += 1;
    let mut report = TurnReport {
        turn: world.turn,
        ..TurnReport::default()
    };

    for unit in world.entities.units_mut() {
        unit.movement = DEFAULT_MOVEMENT;
    }

    for id in world.entities.city_ids() {
        process_city(world, id, &mut report);
    }

    info!(
        "turn {} begins: +{} gold, +{} science, {} events",
        report.turn,
        report.gold,
        report.science,
        report.events.len()
    );
    report
}

fn process_city(world: &mut World, id: CityId, report: &mut TurnReport) {
    let Some(city) = world.entities.city(id) else {
        return;
    };
    let yields = city_yields(&world.map, city);

    let Some(city) = world.entities.city_mut(id) else {
        return;
    };
    city.food += yields.food;
    if city.food >= city.growth_threshold() {
        city.food = 0;
        city.population += 1;
        debug!("city #{id} grew to {}", city.population);
        report.events.push(TurnEvent::Grew {
            city: id,
            population: city.population,
        });
    }
    city.production += yields.production;

    world.gold += yields.gold;
    world.science += yields.science;
    report.gold += yields.gold;
    report.science += yields.science;

    if let Some(tech) = world.tech.add_progress(yields.science) {
        info!("researched {tech}");
        report.events.push(TurnEvent::TechUnlocked { tech });
    }

    resolve_production(world, id, report);
}

fn resolve_production(world: &mut World, id: CityId, report: &mut TurnReport) {
    let tech = &world.tech;
    let Some(city) = world.entities.city_mut(id) else {
        return;
    };

    match city.order {
        ProductionOrder::None => {}
        ProductionOrder::Unit(kind) => {
            let Some(cost) = unit_cost(tech, kind) else {
                cancel(city, report);
                return;
            };
            if city.production < cost {
                return;
            }
            city.production -= cost;
            city.order = ProductionOrder::None;
            let (hex, owner) = (city.hex, city.owner);
            let unit = world.entities.spawn_unit(kind, owner, hex);
            info!("city #{id} completed {kind} #{unit}");
            report
                .events
                .push(TurnEvent::UnitCompleted { city: id, unit, kind });
        }
        ProductionOrder::Building(building) => {
            if !tech.can_build_building(building) || city.buildings.has(building) {
                cancel(city, report);
                return;
            }
            let cost = building.production_cost();
            if city.production < cost {
                return;
            }
            city.production -= cost;
            city.buildings.add(building);
            city.order = ProductionOrder::None;
            info!("city #{id} completed {building}");
            report
                .events
                .push(TurnEvent::BuildingCompleted { city: id, building });
        }
    }
}

fn unit_cost(tech: &TechTree, kind: UnitKind) -> Option<u32> {
    if tech.can_build_unit(kind) {
        kind.production_cost()
    } else {
        None
    }
}

fn cancel(city: &mut City, report: &mut TurnReport) {
    debug!("city #{} dropped {:?}", city.id, city.order);
    report.events.push(TurnEvent::OrderCancelled {
        city: city.id,
        order: city.order,
    });
    city.order = ProductionOrder::None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Faction, Hex, HexTile, RESEARCH_COST, Terrain, WorldMap, hexagon};

    /// Radius-1 grassland world with one city at the origin.
    fn town() -> (World, CityId) {
        let mut map = WorldMap::new(1);
        for hex in hexagon(1) {
            map.insert(HexTile::new(hex, Terrain::Grassland));
        }
        let mut world = World::new(map);
        let city = world.entities.found_city(Faction::Player, Hex::ORIGIN).unwrap();
        (world, city)
    }

    #[test]
    fn test_turn_counter_and_movement() {
        let (mut world, _) = town();
        let id = world
            .entities
            .spawn_unit(UnitKind::Warrior, Faction::Player, Hex::new(1, 0));
        world.entities.unit_mut(id).unwrap().movement = 0.0;
        let report = end_turn(&mut world);
        assert_eq!(world.turn, 2);
        assert_eq!(report.turn, 2);
        assert!((world.entities.unit(id).unwrap().movement - DEFAULT_MOVEMENT).abs() < f32::EPSILON);
    }

    #[test]
    fn test_yields_flow_into_city_and_treasury() {
        let (mut world, city) = town();
        // center base 2/1/2/1, 7 grassland tiles +7 food
        let report = end_turn(&mut world);
        let c = world.entities.city(city).unwrap();
        assert_eq!(c.food, 9);
        assert_eq!(c.production, 1);
        assert_eq!(world.gold, 2);
        assert_eq!(world.science, 1);
        assert_eq!((report.gold, report.science), (2, 1));
        assert!(report.events.is_empty());
    }

    #[test]
    fn test_growth_once_per_turn() {
        let (mut world, city) = town();
        world.entities.city_mut(city).unwrap().food = 500;
        let report = end_turn(&mut world);
        let c = world.entities.city(city).unwrap();
        assert_eq!(c.population, 2);
        assert_eq!(c.food, 0);
        assert_eq!(report.events, vec![TurnEvent::Grew { city, population: 2 }]);
    }

    #[test]
    fn test_unit_production() {
        let (mut world, city) = town();
        {
            let c = world.entities.city_mut(city).unwrap();
            c.production = 12;
            c.order = ProductionOrder::Unit(UnitKind::Warrior);
        }
        let report = end_turn(&mut world);
        let c = world.entities.city(city).unwrap();
        assert_eq!(c.production, 3);
        assert!(c.order.is_none());
        let unit = world.entities.unit_at(Hex::ORIGIN).unwrap();
        assert_eq!(unit.kind, UnitKind::Warrior);
        assert_eq!((unit.health, unit.max_health), (12, 12));
        assert!(report.events.contains(&TurnEvent::UnitCompleted {
            city,
            unit: unit.id,
            kind: UnitKind::Warrior
        }));
    }

    #[test]
    fn test_production_waits_for_cost() {
        let (mut world, city) = town();
        world.entities.city_mut(city).unwrap().order = ProductionOrder::Unit(UnitKind::Settler);
        end_turn(&mut world);
        let c = world.entities.city(city).unwrap();
        assert_eq!(c.production, 1);
        assert_eq!(c.order, ProductionOrder::Unit(UnitKind::Settler));
        assert!(world.entities.units().is_empty());
    }

    #[test]
    fn test_locked_unit_cancelled() {
        let (mut world, city) = town();
        {
            let c = world.entities.city_mut(city).unwrap();
            c.production = 100;
            c.order = ProductionOrder::Unit(UnitKind::Swordsman);
        }
        let report = end_turn(&mut world);
        let c = world.entities.city(city).unwrap();
        assert!(c.order.is_none());
        assert_eq!(c.production, 101);
        assert!(world.entities.units().is_empty());
        assert_eq!(
            report.events,
            vec![TurnEvent::OrderCancelled {
                city,
                order: ProductionOrder::Unit(UnitKind::Swordsman)
            }]
        );
    }

    #[test]
    fn test_building_production() {
        let (mut world, city) = town();
        world.tech.unlock(Tech::Pottery);
        {
            let c = world.entities.city_mut(city).unwrap();
            c.production = 11;
            c.order = ProductionOrder::Building(Building::Granary);
        }
        end_turn(&mut world);
        let c = world.entities.city(city).unwrap();
        assert!(c.buildings.has(Building::Granary));
        assert_eq!(c.production, 0);
        assert!(c.order.is_none());
    }

    #[test]
    fn test_locked_building_cancelled() {
        let (mut world, city) = town();
        world.entities.city_mut(city).unwrap().order = ProductionOrder::Building(Building::Barracks);
        let report = end_turn(&mut world);
        assert!(world.entities.city(city).unwrap().order.is_none());
        assert_eq!(report.events.len(), 1);
    }

    #[test]
    fn test_research_completes() {
        let (mut world, _) = town();
        world.tech.set_target(Tech::Mining, crate::game::ResearchSwitch::Keep);
        let mut unlocked = Vec::new();
        for _ in 0..50 {
            unlocked.extend(end_turn(&mut world).unlocked());
        }
        assert_eq!(unlocked, vec![Tech::Mining]);
        assert!(world.tech.is_unlocked(Tech::Mining));
        assert_eq!(world.tech.current(), None);
        assert_eq!(world.tech.progress(), 0);
    }

    #[test]
    fn test_science_banked_without_target() {
        let (mut world, _) = town();
        end_turn(&mut world);
        assert_eq!(world.science, 1);
        assert_eq!(world.tech.progress(), 1);

        for _ in 0..59 {
            assert!(end_turn(&mut world).unlocked().next().is_none());
        }
        assert!(world.tech.progress() >= RESEARCH_COST);
        assert_eq!(world.tech.progress(), world.science);

        world.tech.set_target(Tech::Mining, crate::game::ResearchSwitch::Keep);
        let report = end_turn(&mut world);
        assert_eq!(report.unlocked().collect::<Vec<_>>(), vec![Tech::Mining]);
        assert_eq!(world.tech.progress(), 0);
    }

    #[test]
    fn test_cities_in_founding_order() {
        let (mut world, first) = town();
        let second = world
            .entities
            .found_city(Faction::Player, Hex::new(1, 0))
            .unwrap();
        for id in [first, second] {
            world.entities.city_mut(id).unwrap().food = 50;
        }
        let report = end_turn(&mut world);
        assert_eq!(
            report.events,
            vec![
                TurnEvent::Grew { city: first, population: 2 },
                TurnEvent::Grew { city: second, population: 2 },
            ]
        );
    }
}
