//! Player command processing.
//!
//! Every command validates fully before mutating anything, so a rejected
//! command leaves both the [`World`] and the [`Selection`] untouched.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{CommandRejected, CommandResult};
use crate::game::{
    CityId, CombatReport, CombatRolls, Faction, GameRng, Hex, ProductionOrder, ResearchSwitch,
    Selection, Tech, UnitId, UnitKind, World, resolve_combat,
};

/// Move cost between two tiles.
pub const MOVE_COST: f32 = 1.0;
/// Move cost when both tiles have a road.
pub const ROAD_MOVE_COST: f32 = 0.5;
/// Purchase price multiplier over production cost.
pub const BUY_MULTIPLIER: u32 = 4;

/// How a click on a tile was resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// The selected unit stepped onto the tile.
    Moved {
        /// Unit that moved.
        unit: UnitId,
        /// Where it ended up.
        to: Hex,
    },
    /// The selected unit attacked whatever stood there.
    Attacked(CombatReport),
    /// A unit on the tile is now selected.
    SelectedUnit(UnitId),
    /// A city on the tile is now selected.
    SelectedCity(CityId),
    /// Nothing there; selection cleared.
    Cleared,
}

/// Resolve a click on `hex`.
///
/// A selected player unit with movement left tries to act on the tile
/// first. If that is not possible the click falls through to selecting
/// whatever is there. The clicked coordinate is always recorded.
pub fn select_tile(
    world: &mut World,
    selection: &mut Selection,
    rng: &mut GameRng,
    hex: Hex,
) -> ClickOutcome {
    selection.tile = Some(hex);

    if let Some(id) = selection.unit {
        let ready = world
            .entities
            .unit(id)
            .is_some_and(|u| u.owner == Faction::Player && u.can_move());
        if ready {
            match move_or_attack(world, selection, rng, id, hex) {
                Ok(outcome) => return outcome,
                Err(reason) => debug!("click on {hex}: #{id} cannot act ({reason})"),
            }
        }
    }

    if let Some(unit) = world.entities.unit_at(hex) {
        selection.focus_unit(unit.id);
        return ClickOutcome::SelectedUnit(unit.id);
    }
    if let Some(city) = world.entities.city_at(hex) {
        selection.focus_city(city.id);
        return ClickOutcome::SelectedCity(city.id);
    }
    selection.clear();
    ClickOutcome::Cleared
}

/// Move or attack with the selected unit, rejecting instead of falling
/// back to selection.
///
/// # Errors
///
/// Rejected without a selected player unit, without movement, or when the
/// target is not an adjacent enemy or free tile.
pub fn move_selected(
    world: &mut World,
    selection: &mut Selection,
    rng: &mut GameRng,
    target: Hex,
) -> CommandResult<ClickOutcome> {
    let id = selection.unit.ok_or(CommandRejected::NoUnitSelected)?;
    let unit = world
        .entities
        .unit(id)
        .ok_or(CommandRejected::NoUnitSelected)?;
    if unit.owner != Faction::Player {
        return Err(CommandRejected::NotOwned);
    }
    move_or_attack(world, selection, rng, id, target)
}

fn move_or_attack(
    world: &mut World,
    selection: &mut Selection,
    rng: &mut GameRng,
    id: UnitId,
    target: Hex,
) -> CommandResult<ClickOutcome> {
    let unit = world
        .entities
        .unit(id)
        .ok_or(CommandRejected::NoUnitSelected)?;
    if !unit.can_move() {
        return Err(CommandRejected::NoMovement);
    }
    let from = unit.hex;
    let owner = unit.owner;
    if from.distance(target) != 1 {
        return Err(CommandRejected::NotAdjacent(target));
    }

    if let Some(enemy) = world.entities.hostile_unit_at(target, owner) {
        let defender = enemy.id;
        let rolls = CombatRolls::draw(rng);
        let report =
            resolve_combat(world, id, defender, rolls).ok_or(CommandRejected::NoUnitSelected)?;
        selection.last_enemy = Some(report.defender_after);
        if report.attacker_killed {
            selection.unit = None;
        }
        return Ok(ClickOutcome::Attacked(report));
    }

    if !world.map.contains(target) {
        return Err(CommandRejected::NoTile(target));
    }
    if world.entities.has_friendly_unit_at(target, owner) {
        return Err(CommandRejected::FriendlyOccupied(target));
    }
    if world.entities.city_at(target).is_some() {
        return Err(CommandRejected::CityOccupied(target));
    }

    let cost = if world.map.has_road(from) && world.map.has_road(target) {
        ROAD_MOVE_COST
    } else {
        MOVE_COST
    };
    let unit = world
        .entities
        .unit_mut(id)
        .ok_or(CommandRejected::NoUnitSelected)?;
    unit.hex = target;
    unit.spend_movement(cost);
    if world.map.get(target).is_some_and(|t| t.camp) {
        world.map.set_camp(target, false);
        debug!("#{id} overran the camp at {target}");
    }
    Ok(ClickOutcome::Moved { unit: id, to: target })
}

/// Found a city with the selected settler.
///
/// The settler is consumed and the city tile is paved.
///
/// # Errors
///
/// Rejected unless a player settler is selected on a tile without a city.
pub fn found_city(world: &mut World, selection: &mut Selection) -> CommandResult<CityId> {
    let id = selection.unit.ok_or(CommandRejected::NoUnitSelected)?;
    let unit = world
        .entities
        .unit(id)
        .ok_or(CommandRejected::NoUnitSelected)?;
    if unit.owner != Faction::Player {
        return Err(CommandRejected::NotOwned);
    }
    if unit.kind != UnitKind::Settler {
        return Err(CommandRejected::WrongUnitKind {
            expected: UnitKind::Settler,
        });
    }
    let (hex, owner) = (unit.hex, unit.owner);

    let city = world
        .entities
        .found_city(owner, hex)
        .ok_or(CommandRejected::CityOccupied(hex))?;
    world.map.set_road(hex, true);
    world.entities.remove_unit(id);
    selection.unit = None;
    info!("city #{city} founded at {hex}");
    Ok(city)
}

/// Pave the selected worker's tile. Spends all its movement.
///
/// # Errors
///
/// Rejected unless a player worker with movement left stands on a tile.
pub fn build_road(world: &mut World, selection: &Selection) -> CommandResult<Hex> {
    let id = selection.unit.ok_or(CommandRejected::NoUnitSelected)?;
    let unit = world
        .entities
        .unit(id)
        .ok_or(CommandRejected::NoUnitSelected)?;
    if unit.owner != Faction::Player {
        return Err(CommandRejected::NotOwned);
    }
    if unit.kind != UnitKind::Worker {
        return Err(CommandRejected::WrongUnitKind {
            expected: UnitKind::Worker,
        });
    }
    if !unit.can_move() {
        return Err(CommandRejected::NoMovement);
    }
    let hex = unit.hex;
    if !world.map.set_road(hex, true) {
        return Err(CommandRejected::NoTile(hex));
    }
    if let Some(unit) = world.entities.unit_mut(id) {
        unit.movement = 0.0;
    }
    debug!("#{id} paved {hex}");
    Ok(hex)
}

/// Buy a unit outright in a city.
///
/// Costs [`BUY_MULTIPLIER`] times the production cost. The unit arrives
/// with no movement.
///
/// # Errors
///
/// Rejected for unknown cities, unbuildable or locked kinds, and when
/// the treasury is short.
pub fn buy_unit(world: &mut World, city: CityId, kind: UnitKind) -> CommandResult<UnitId> {
    let (hex, owner) = world
        .entities
        .city(city)
        .map(|c| (c.hex, c.owner))
        .ok_or(CommandRejected::NoSuchCity(city))?;
    let cost = kind
        .production_cost()
        .ok_or(CommandRejected::NotBuildable(kind))?;
    if !world.tech.can_build_unit(kind) {
        return Err(CommandRejected::Locked(kind));
    }
    let price = cost * BUY_MULTIPLIER;
    if world.gold < price {
        return Err(CommandRejected::InsufficientGold {
            cost: price,
            available: world.gold,
        });
    }

    world.gold -= price;
    let id = world.entities.spawn_unit(kind, owner, hex);
    if let Some(unit) = world.entities.unit_mut(id) {
        unit.movement = 0.0;
    }
    info!("bought {kind} #{id} in city #{city} for {price} gold");
    Ok(id)
}

/// Replace a city's production order.
///
/// Tech requirements are checked when the order resolves, not here.
///
/// # Errors
///
/// Rejected for unknown cities, barbarian units and buildings the city
/// already has.
pub fn queue_production(
    world: &mut World,
    city: CityId,
    order: ProductionOrder,
) -> CommandResult {
    let target = world
        .entities
        .city_mut(city)
        .ok_or(CommandRejected::NoSuchCity(city))?;
    match order {
        ProductionOrder::Unit(kind) if kind.production_cost().is_none() => {
            return Err(CommandRejected::NotBuildable(kind));
        }
        ProductionOrder::Building(building) if target.buildings.has(building) => {
            return Err(CommandRejected::AlreadyBuilt(building));
        }
        _ => {}
    }
    target.order = order;
    Ok(())
}

/// Point research at `tech`.
///
/// # Errors
///
/// Rejected if the technology is unlocked or its prerequisites are not.
pub fn set_research(world: &mut World, tech: Tech, switch: ResearchSwitch) -> CommandResult {
    if world.tech.is_unlocked(tech) {
        return Err(CommandRejected::AlreadyResearched(tech));
    }
    if !world.tech.can_research(tech) {
        return Err(CommandRejected::NotResearchable(tech));
    }
    world.tech.set_target(tech, switch);
    debug!("researching {tech}");
    Ok(())
}

/// A serializable player intent, as stored in command scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Click a tile.
    Select {
        /// Axial column.
        q: i32,
        /// Axial row.
        r: i32,
    },
    /// Found a city with the selected settler.
    FoundCity,
    /// Pave the selected worker's tile.
    BuildRoad,
    /// Buy a unit in a city.
    BuyUnit {
        /// City to buy in.
        city: CityId,
        /// Unit to buy.
        unit: UnitKind,
    },
    /// Replace a city's production order.
    QueueProduction {
        /// City to change.
        city: CityId,
        /// New order.
        order: ProductionOrder,
    },
    /// Change the research target.
    SetResearch {
        /// Technology to research.
        tech: Tech,
    },
    /// Advance the world by one turn.
    EndTurn,
}
