#![no_main]

use arbitrary::Arbitrary;
use hexciv::game::{
    ATTACKER_DAMAGE, CombatOutcome, CombatRolls, DEFENDER_DAMAGE, Faction, Hex, HexTile, Terrain,
    UnitKind, World, WorldMap, check_invariants, hexagon, resolve_combat,
};
use libfuzzer_sys::fuzz_target;

/// Structured input for combat fuzzing.
#[derive(Arbitrary, Debug)]
struct CombatInput {
    /// Attacker kind selector.
    attacker: u8,
    /// Defender kind selector.
    defender: u8,
    /// Attacker health before the fight.
    attacker_health: u8,
    /// Defender health before the fight.
    defender_health: u8,
    /// Die rolls, folded into 1..=10.
    attacker_roll: u8,
    defender_roll: u8,
    /// Direction from attacker to defender.
    direction: u8,
    /// Whether the defender stands in a camp.
    camp: bool,
}

const KINDS: [UnitKind; 7] = [
    UnitKind::Settler,
    UnitKind::Warrior,
    UnitKind::Archer,
    UnitKind::Chariot,
    UnitKind::Swordsman,
    UnitKind::Worker,
    UnitKind::Barbarian,
];

fuzz_target!(|input: CombatInput| {
    let mut map = WorldMap::new(1);
    for hex in hexagon(1) {
        map.insert(HexTile::new(hex, Terrain::Grassland));
    }
    let mut world = World::new(map);

    let target = Hex::ORIGIN.neighbor(usize::from(input.direction) % 6);
    let attacker_kind = KINDS[usize::from(input.attacker) % KINDS.len()];
    let defender_kind = KINDS[usize::from(input.defender) % KINDS.len()];

    let attacker = world
        .entities
        .spawn_unit(attacker_kind, Faction::Player, Hex::ORIGIN);
    let defender = world
        .entities
        .spawn_unit(defender_kind, Faction::Barbarian, target);
    if input.camp {
        world.map.set_camp(target, true);
    }

    for (id, health) in [(attacker, input.attacker_health), (defender, input.defender_health)] {
        if let Some(unit) = world.entities.unit_mut(id) {
            unit.health = i32::from(health).clamp(1, unit.max_health);
        }
    }
    let a_health = world.entities.unit(attacker).map_or(0, |u| u.health);
    let d_health = world.entities.unit(defender).map_or(0, |u| u.health);

    let rolls = CombatRolls {
        attacker: i32::from(input.attacker_roll % 10) + 1,
        defender: i32::from(input.defender_roll % 10) + 1,
    };
    let Some(report) = resolve_combat(&mut world, attacker, defender, rolls) else {
        panic!("both units exist");
    };

    match report.outcome {
        CombatOutcome::DefenderHit => {
            assert_eq!(report.defender_after.health, d_health - DEFENDER_DAMAGE);
            assert!(!report.attacker_killed);
            let unit = world.entities.unit(attacker).map_or(-1, |u| u.health);
            assert_eq!(unit, a_health);
        }
        CombatOutcome::AttackerHit => {
            assert_eq!(report.defender_after.health, d_health);
            assert!(!report.defender_killed);
            if !report.attacker_killed {
                let unit = world.entities.unit(attacker).map_or(-1, |u| u.health);
                assert_eq!(unit, a_health - ATTACKER_DAMAGE);
            }
        }
    }

    assert_eq!(report.attacker_killed, world.entities.unit(attacker).is_none());
    assert_eq!(report.defender_killed, world.entities.unit(defender).is_none());
    if report.defender_killed {
        assert!(!world.map.get(target).is_some_and(|t| t.camp));
    }

    let violations = check_invariants(&world);
    assert!(violations.is_empty(), "after combat: {violations:?}");
});
