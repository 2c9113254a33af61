//! Combat resolution.
//!
//! Each side rolls a d10 and adds its attack or defense. Ties go to the
//! attacker. Exactly one side takes damage per engagement: the defender
//! loses [`DEFENDER_DAMAGE`] on an attacker win, otherwise the attacker
//! loses [`ATTACKER_DAMAGE`]. Barbarians defend at -1.

use log::debug;

use crate::game::{GameRng, Unit, UnitId, UnitKind, World};

/// Damage dealt to a defender that loses.
pub const DEFENDER_DAMAGE: i32 = 4;
/// Damage dealt to an attacker that loses.
pub const ATTACKER_DAMAGE: i32 = 3;
/// Defense roll penalty applied to barbarian defenders.
const BARBARIAN_DEFENSE_PENALTY: i32 = 1;

/// The two dice for one engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatRolls {
    /// Attacker's d10.
    pub attacker: i32,
    /// Defender's d10.
    pub defender: i32,
}

impl CombatRolls {
    /// Draw both dice from the game RNG, attacker first.
    pub fn draw(rng: &mut GameRng) -> Self {
        let attacker = rng.roll_d10();
        let defender = rng.roll_d10();
        Self { attacker, defender }
    }
}

/// Which side took damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    /// Attacker total met or beat the defender's; the defender was hit.
    DefenderHit,
    /// Defender total was higher; the attacker was hit.
    AttackerHit,
}

/// Everything that happened in one engagement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatReport {
    /// Attacking unit.
    pub attacker: UnitId,
    /// Defending unit.
    pub defender: UnitId,
    /// Dice rolled.
    pub rolls: CombatRolls,
    /// Attacker roll plus attack.
    pub attacker_total: i32,
    /// Defender roll plus defense, after modifiers.
    pub defender_total: i32,
    /// Which side was hit.
    pub outcome: CombatOutcome,
    /// The attacker died and was removed.
    pub attacker_killed: bool,
    /// The defender died and was removed.
    pub defender_killed: bool,
    /// Defender as it stood after the engagement, kept for observers after death.
    pub defender_after: Unit,
}

/// Compute both totals and the outcome without touching any state.
#[must_use]
pub fn score(attacker: &Unit, defender: &Unit, rolls: CombatRolls) -> (i32, i32, CombatOutcome) {
    let attacker_total = rolls.attacker + attacker.attack;
    let mut defender_total = rolls.defender + defender.defense;
    if defender.kind == UnitKind::Barbarian {
        defender_total -= BARBARIAN_DEFENSE_PENALTY;
    }
    let outcome = if attacker_total >= defender_total {
        CombatOutcome::DefenderHit
    } else {
        CombatOutcome::AttackerHit
    };
    (attacker_total, defender_total, outcome)
}

/// Resolve an attack between two existing units.
///
/// Callers check adjacency and hostility. Dead units are removed; a
/// victorious attacker advances into the defender's tile and razes any camp
/// there. The attacker's movement is spent regardless of the outcome.
///
/// Returns `None` if either unit does not exist.
pub fn resolve_combat(
    world: &mut World,
    attacker_id: UnitId,
    defender_id: UnitId,
    rolls: CombatRolls,
) -> Option<CombatReport> {
    let attacker = world.entities.unit(attacker_id)?;
    let defender = world.entities.unit(defender_id)?;
    let (attacker_total, defender_total, outcome) = score(attacker, defender, rolls);
    let defender_hex = defender.hex;

    debug!(
        "combat #{attacker_id} vs #{defender_id}: {} + {} = {attacker_total} vs {} + {} = {defender_total}",
        rolls.attacker, attacker.attack, rolls.defender, defender.defense
    );

    let mut attacker_killed = false;
    let mut defender_killed = false;

    match outcome {
        CombatOutcome::DefenderHit => {
            let defender = world.entities.unit_mut(defender_id)?;
            defender_killed = defender.take_damage(DEFENDER_DAMAGE);
        }
        CombatOutcome::AttackerHit => {
            let attacker = world.entities.unit_mut(attacker_id)?;
            attacker_killed = attacker.take_damage(ATTACKER_DAMAGE);
        }
    }

    let defender_after = if defender_killed {
        let dead = world.entities.remove_unit(defender_id)?;
        world.map.set_camp(defender_hex, false);
        debug!("#{defender_id} destroyed at {defender_hex}");
        dead
    } else {
        *world.entities.unit(defender_id)?
    };

    if attacker_killed {
        world.entities.remove_unit(attacker_id);
        debug!("#{attacker_id} destroyed attacking");
    } else if let Some(attacker) = world.entities.unit_mut(attacker_id) {
        attacker.movement = 0.0;
        if defender_killed {
            attacker.hex = defender_hex;
        }
    }

    Some(CombatReport {
        attacker: attacker_id,
        defender: defender_id,
        rolls,
        attacker_total,
        defender_total,
        outcome,
        attacker_killed,
        defender_killed,
        defender_after,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Faction, Hex, HexTile, Terrain, WorldMap};

    fn arena() -> (World, UnitId, UnitId) {
        let mut map = WorldMap::new(1);
        map.insert(HexTile::new(Hex::ORIGIN, Terrain::Grassland));
        map.insert(HexTile::new(Hex::new(1, 0), Terrain::Grassland));
        map.set_camp(Hex::new(1, 0), true);
        let mut world = World::new(map);
        let attacker = world
            .entities
            .spawn_unit(UnitKind::Warrior, Faction::Player, Hex::ORIGIN);
        let defender = world
            .entities
            .spawn_unit(UnitKind::Barbarian, Faction::Barbarian, Hex::new(1, 0));
        (world, attacker, defender)
    }

    #[test]
    fn test_attacker_wins_tie() {
        let (world, a, d) = arena();
        let attacker = world.entities.unit(a).unwrap();
        let defender = world.entities.unit(d).unwrap();
        // 1 + 6 = 7 vs 3 + 5 - 1 = 7
        let (at, dt, outcome) = score(attacker, defender, CombatRolls { attacker: 1, defender: 3 });
        assert_eq!((at, dt), (7, 7));
        assert_eq!(outcome, CombatOutcome::DefenderHit);
    }

    #[test]
    fn test_barbarian_penalty_only_for_barbarians() {
        let warrior = Unit::new(1, UnitKind::Warrior, Faction::Player, Hex::ORIGIN);
        let enemy = Unit::new(2, UnitKind::Warrior, Faction::Enemy, Hex::new(1, 0));
        let (_, dt, _) = score(&warrior, &enemy, CombatRolls { attacker: 5, defender: 5 });
        assert_eq!(dt, 5 + 8);
    }

    #[test]
    fn test_defender_hit() {
        let (mut world, a, d) = arena();
        let report = resolve_combat(&mut world, a, d, CombatRolls { attacker: 10, defender: 1 }).unwrap();
        assert_eq!(report.outcome, CombatOutcome::DefenderHit);
        assert!(!report.defender_killed);
        assert_eq!(world.entities.unit(d).unwrap().health, 6);
        assert_eq!(world.entities.unit(a).unwrap().health, 12);
        assert!(world.entities.unit(a).unwrap().movement.abs() < f32::EPSILON);
        assert_eq!(world.entities.unit(a).unwrap().hex, Hex::ORIGIN);
    }

    #[test]
    fn test_attacker_hit() {
        let (mut world, a, d) = arena();
        let report = resolve_combat(&mut world, a, d, CombatRolls { attacker: 1, defender: 10 }).unwrap();
        assert_eq!(report.outcome, CombatOutcome::AttackerHit);
        assert_eq!(world.entities.unit(a).unwrap().health, 9);
        assert_eq!(world.entities.unit(d).unwrap().health, 10);
        assert!(world.entities.unit(a).unwrap().movement.abs() < f32::EPSILON);
    }

    #[test]
    fn test_kill_advances_and_razes_camp() {
        let (mut world, a, d) = arena();
        world.entities.unit_mut(d).unwrap().health = 4;
        let report = resolve_combat(&mut world, a, d, CombatRolls { attacker: 10, defender: 1 }).unwrap();
        assert!(report.defender_killed);
        assert_eq!(report.defender_after.health, 0);
        assert!(world.entities.unit(d).is_none());
        assert_eq!(world.entities.unit(a).unwrap().hex, Hex::new(1, 0));
        assert_eq!(world.map.camps().count(), 0);
    }

    #[test]
    fn test_attacker_dies() {
        let (mut world, a, d) = arena();
        world.entities.unit_mut(a).unwrap().health = 3;
        let report = resolve_combat(&mut world, a, d, CombatRolls { attacker: 1, defender: 10 }).unwrap();
        assert!(report.attacker_killed);
        assert!(world.entities.unit(a).is_none());
        assert!(world.entities.unit(d).is_some());
        assert_eq!(world.map.camps().count(), 1);
    }

    #[test]
    fn test_missing_unit() {
        let (mut world, a, _) = arena();
        assert!(resolve_combat(&mut world, a, 99, CombatRolls { attacker: 5, defender: 5 }).is_none());
    }
}
