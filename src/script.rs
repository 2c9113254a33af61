//! Command scripts.
//!
//! A script is a JSON array of [`Command`] values applied to a game in
//! order. Rejected commands are counted, not treated as failures.

use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::config::GameConfig;
use crate::error::CommandRejected;
use crate::game::{
    ClickOutcome, Command, CommandOutcome, Game, ProductionOrder, SETTLER_START, Tech, UnitKind,
    WARRIOR_START,
};

/// Failure to load a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The file is not a JSON command list.
    #[error("cannot parse {}: {source}", .path.display())]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
}

/// Parse a script from JSON text.
///
/// # Errors
///
/// Returns the parse error; `path` only labels it.
pub fn parse_script(text: &str, path: &Path) -> Result<Vec<Command>, ScriptError> {
    serde_json::from_str(text).map_err(|source| ScriptError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse a script file.
///
/// # Errors
///
/// Fails if the file cannot be read or parsed.
pub fn load_script(path: &Path) -> Result<Vec<Command>, ScriptError> {
    let text = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&text, path)
}

/// The script used when none is given: settle the capital, start a
/// warrior and mining, then step the starting warrior outward.
#[must_use]
pub fn opening_script() -> Vec<Command> {
    vec![
        Command::Select {
            q: SETTLER_START.q,
            r: SETTLER_START.r,
        },
        Command::FoundCity,
        Command::QueueProduction {
            city: 1,
            order: ProductionOrder::Unit(UnitKind::Warrior),
        },
        Command::SetResearch { tech: Tech::Mining },
        Command::Select {
            q: WARRIOR_START.q,
            r: WARRIOR_START.r,
        },
        Command::Select {
            q: WARRIOR_START.q + 1,
            r: WARRIOR_START.r - 1,
        },
        Command::EndTurn,
    ]
}

/// A command the game refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// Position in the script.
    pub index: usize,
    /// The command.
    pub command: Command,
    /// Why it was refused.
    #[serde(serialize_with = "serialize_display")]
    pub reason: CommandRejected,
}

fn serialize_display<S: serde::Serializer>(
    value: &CommandRejected,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Tally of a script run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScriptSummary {
    /// Commands that took effect.
    pub applied: usize,
    /// Commands that were refused.
    pub rejections: Vec<Rejection>,
    /// Turns ended by the script.
    pub turns_ended: u32,
    /// Combats fought.
    pub battles: u32,
}

/// Apply every command in order.
pub fn run_script(game: &mut Game, commands: &[Command]) -> ScriptSummary {
    let mut summary = ScriptSummary::default();
    for (index, command) in commands.iter().enumerate() {
        match game.execute(*command) {
            Ok(outcome) => {
                summary.applied += 1;
                match outcome {
                    CommandOutcome::TurnEnded(_) => summary.turns_ended += 1,
                    CommandOutcome::Click(ClickOutcome::Attacked(_)) => {
                        summary.battles += 1;
                    }
                    _ => {}
                }
            }
            Err(reason) => {
                debug!("script command {index} ({command:?}) rejected: {reason}");
                summary.rejections.push(Rejection {
                    index,
                    command: *command,
                    reason,
                });
            }
        }
    }
    summary
}

/// Play one game: generate the map, apply the script, then end
/// `config.turns` more turns.
pub fn play(config: &GameConfig, commands: &[Command]) -> (Game, ScriptSummary) {
    let mut game = Game::new(config.seed, config.map_radius, config.rules);
    let summary = run_script(&mut game, commands);
    for _ in 0..config.turns {
        game.end_turn();
    }
    debug!(
        "seed {} finished on turn {} with {} cities",
        config.seed,
        game.turn(),
        game.world.entities.cities().len()
    );
    (game, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Rules;

    #[test]
    fn test_parse_script() {
        let text = r#"[
            {"command": "select", "q": 0, "r": 0},
            {"command": "found_city"},
            {"command": "set_research", "tech": "pottery"},
            {"command": "end_turn"}
        ]"#;
        let script = parse_script(text, Path::new("inline")).unwrap();
        assert_eq!(script.len(), 4);
        assert_eq!(script[2], Command::SetResearch { tech: Tech::Pottery });
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = parse_script(r#"[{"command": "fly"}]"#, Path::new("bad.json")).unwrap_err();
        assert!(err.to_string().starts_with("cannot parse bad.json"));
    }

    #[test]
    fn test_opening_script_settles() {
        let mut game = Game::new(12, 10, Rules::default());
        let summary = run_script(&mut game, &opening_script());
        assert_eq!(game.cities().len(), 1);
        assert_eq!(game.turn(), 2);
        assert_eq!(summary.turns_ended, 1);
        assert!(summary.rejections.is_empty(), "{:?}", summary.rejections);
        assert_eq!(summary.applied, opening_script().len());
    }

    #[test]
    fn test_rejections_recorded() {
        let mut game = Game::new(12, 10, Rules::default());
        let script = [
            Command::FoundCity,
            Command::BuyUnit {
                city: 7,
                unit: UnitKind::Warrior,
            },
        ];
        let summary = run_script(&mut game, &script);
        assert_eq!(summary.applied, 0);
        assert_eq!(summary.rejections.len(), 2);
        assert_eq!(summary.rejections[0].reason, CommandRejected::NoUnitSelected);
        assert_eq!(summary.rejections[1].index, 1);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["rejections"][1]["reason"], "no city with id 7");
    }

    #[test]
    fn test_play_runs_extra_turns() {
        let config = GameConfig {
            seed: 3,
            map_radius: 8,
            turns: 5,
            ..GameConfig::default()
        };
        let (game, summary) = play(&config, &opening_script());
        assert_eq!(summary.turns_ended, 1);
        assert_eq!(game.turn(), 7);
        assert_eq!(game.cities().len(), 1);
        assert!(game.world.gold > 0);
    }
}
