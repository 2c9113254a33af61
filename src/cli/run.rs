//! Run command implementation.

use super::output::{JsonGameResult, format_text};
use super::{CliError, OutputFormat, Overrides, resolve_config};
use hexciv::script::{load_script, opening_script, play};
use log::info;
use std::path::PathBuf;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the config or script cannot be loaded.
pub(crate) fn execute(
    config: Option<PathBuf>,
    script: Option<PathBuf>,
    overrides: Overrides,
    format: OutputFormat,
    snapshot: bool,
) -> Result<(), CliError> {
    let config = resolve_config(config.as_deref(), overrides)?;
    let commands = match &script {
        Some(path) => load_script(path)?,
        None => opening_script(),
    };

    info!(
        "running seed {} on radius {} for {} commands + {} turns",
        config.seed,
        config.map_radius,
        commands.len(),
        config.turns
    );
    let (game, summary) = play(&config, &commands);

    match format {
        OutputFormat::Text => {
            print!("{}", format_text(&game, &summary));
        }
        OutputFormat::Json => {
            let json_result = JsonGameResult::new(&game, &summary, snapshot);
            let json = serde_json::to_string_pretty(&json_result)?;
            println!("{json}");
        }
    }

    Ok(())
}
