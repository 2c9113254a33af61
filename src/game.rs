//! Game layer for hexciv.
//!
//! Implements the rules of the simulation:
//! - Axial hex grid and procedurally generated map
//! - Units, cities and the technology tree
//! - City economy and the turn engine
//! - Combat resolution
//! - Player command processing and read-only snapshots

mod city;
mod combat;
mod commands;
mod economy;
mod entities;
mod hex;
mod invariants;
mod map;
mod mapgen;
mod rng;
mod selection;
mod snapshot;
mod state;
mod tech;
mod turn;
mod unit;
mod world;

pub use city::{Building, Buildings, City, CityId, FOOD_PER_POPULATION, ProductionOrder};
pub use combat::{
    ATTACKER_DAMAGE, CombatOutcome, CombatReport, CombatRolls, DEFENDER_DAMAGE, resolve_combat,
    score,
};
pub use commands::{
    BUY_MULTIPLIER, ClickOutcome, Command, MOVE_COST, ROAD_MOVE_COST, build_road, buy_unit,
    found_city, move_selected, queue_production, select_tile, set_research,
};
pub use economy::{CITY_CENTER_BASE, Yields, city_yields, tile_yield};
pub use entities::EntityStore;
pub use hex::{DIRECTIONS, Hex, hexagon};
pub use invariants::{InvariantViolation, SANITY_MAX_POP_PER_CITY, assert_invariants, check_invariants};
pub use map::{HexTile, Resource, Terrain, WorldMap};
pub use mapgen::{
    SETTLER_START, WARRIOR_START, classify_terrain, generate_terrain, generate_world, is_camp_site,
    spawn_barbarian_camp,
};
pub use rng::GameRng;
pub use selection::Selection;
pub use snapshot::{
    CityView, ResearchView, SelectionView, TileView, UnitView, WorldSnapshot, city_views,
    snapshot, tile_views, unit_views,
};
pub use state::{CommandOutcome, DEFAULT_MAP_RADIUS, Game, MAX_MAP_RADIUS, Rules};
pub use tech::{RESEARCH_COST, ResearchSwitch, Tech, TechTree};
pub use turn::{TurnEvent, TurnReport, end_turn};
pub use unit::{DEFAULT_MOVEMENT, Faction, Unit, UnitId, UnitKind, UnitStats};
pub use world::World;
