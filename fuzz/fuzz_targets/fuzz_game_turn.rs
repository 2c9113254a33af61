#![no_main]

//! Full game fuzzer.
//!
//! Drives a generated game through arbitrary player commands and checks
//! every world invariant after each one, so integration bugs between the
//! command processor and the turn engine surface here.

use arbitrary::Arbitrary;
use hexciv::game::{
    Building, Command, ProductionOrder, ResearchSwitch, Tech, UnitKind, check_invariants,
};
use hexciv::{Game, Rules};
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated command.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzCommand {
    Select { q: i8, r: i8 },
    FoundCity,
    BuildRoad,
    BuyUnit { city: u8, unit: u8 },
    QueueUnit { city: u8, unit: u8 },
    QueueBuilding { city: u8, building: u8 },
    ClearOrder { city: u8 },
    SetResearch { tech: u8 },
    EndTurn,
}

impl FuzzCommand {
    fn to_command(self) -> Command {
        let kind = |b: u8| UnitKind::BUILDABLE[usize::from(b) % UnitKind::BUILDABLE.len()];
        let city = |c: u8| u32::from(c % 4);
        match self {
            Self::Select { q, r } => Command::Select {
                q: i32::from(q) % 8,
                r: i32::from(r) % 8,
            },
            Self::FoundCity => Command::FoundCity,
            Self::BuildRoad => Command::BuildRoad,
            Self::BuyUnit { city: c, unit } => Command::BuyUnit {
                city: city(c),
                unit: kind(unit),
            },
            Self::QueueUnit { city: c, unit } => Command::QueueProduction {
                city: city(c),
                order: ProductionOrder::Unit(kind(unit)),
            },
            Self::QueueBuilding { city: c, building } => Command::QueueProduction {
                city: city(c),
                order: ProductionOrder::Building(
                    Building::ALL[usize::from(building) % Building::ALL.len()],
                ),
            },
            Self::ClearOrder { city: c } => Command::QueueProduction {
                city: city(c),
                order: ProductionOrder::None,
            },
            Self::SetResearch { tech } => Command::SetResearch {
                tech: Tech::ALL[usize::from(tech) % Tech::ALL.len()],
            },
            Self::EndTurn => Command::EndTurn,
        }
    }
}

/// Structured input for full game fuzzing.
#[derive(Arbitrary, Debug)]
struct GameInput {
    seed: u64,
    radius: u8,
    discard_research: bool,
    commands: Vec<FuzzCommand>,
}

fuzz_target!(|input: GameInput| {
    let radius = u32::from(input.radius % 12) + 1;
    let rules = Rules {
        research_switch: if input.discard_research {
            ResearchSwitch::Discard
        } else {
            ResearchSwitch::Keep
        },
    };
    let mut game = Game::new(input.seed, radius, rules);

    for command in input.commands.iter().take(200) {
        let command = command.to_command();
        let turn = game.turn();
        let result = game.execute(command);

        if command == Command::EndTurn {
            assert!(result.is_ok());
            assert_eq!(game.turn(), turn + 1);
        } else {
            assert_eq!(game.turn(), turn);
        }

        let violations = check_invariants(&game.world);
        assert!(violations.is_empty(), "after {command:?}: {violations:?}");
    }

    // Snapshots must always serialize.
    let json = serde_json::to_string(&game.snapshot());
    assert!(json.is_ok());
});
