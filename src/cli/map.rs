//! Map command implementation.

use super::output::format_map_text;
use super::{CliError, OutputFormat, Overrides, resolve_config};
use hexciv::game::Game;
use std::path::PathBuf;

/// Execute the map command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded.
pub(crate) fn execute(
    config: Option<PathBuf>,
    overrides: Overrides,
    format: OutputFormat,
) -> Result<(), CliError> {
    let config = resolve_config(config.as_deref(), overrides)?;
    let game = Game::new(config.seed, config.map_radius, config.rules);

    match format {
        OutputFormat::Text => {
            println!("Map (seed: {})", config.seed);
            println!();
            print!("{}", format_map_text(&game.world));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&game.snapshot())?;
            println!("{json}");
        }
    }

    Ok(())
}
