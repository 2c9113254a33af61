//! CLI command implementations for hexciv.

pub(crate) mod batch;
pub(crate) mod map;
pub(crate) mod run;

mod output;

use clap::ValueEnum;
use hexciv::config::{ConfigError, GameConfig};
use hexciv::script::ScriptError;
use std::path::Path;
use thiserror::Error;

/// Output format for the `run` and `map` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `batch` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum BatchFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format, one row per game.
    Csv,
}

/// Values given on the command line that override the config file.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Overrides {
    pub(crate) seed: Option<u64>,
    pub(crate) radius: Option<u32>,
    pub(crate) turns: Option<u32>,
}

/// CLI error type.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Config could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Script could not be loaded.
    #[error(transparent)]
    Script(#[from] ScriptError),
    /// Output could not be serialized.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    /// Anything else.
    #[error("{0}")]
    Other(String),
}

/// Load the config file if given, apply overrides and validate.
///
/// # Errors
///
/// Returns an error if the file is unreadable or the result is invalid.
pub(crate) fn resolve_config(
    path: Option<&Path>,
    overrides: Overrides,
) -> Result<GameConfig, CliError> {
    let mut config = match path {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = overrides.seed {
        config.seed = seed;
    }
    if let Some(radius) = overrides.radius {
        config.map_radius = radius;
    }
    if let Some(turns) = overrides.turns {
        config.turns = turns;
    }
    Ok(config.validated()?)
}
