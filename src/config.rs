//! Game configuration.
//!
//! A config file is a JSON object; every field is optional and falls back
//! to [`GameConfig::default`]. Command-line flags override file values.

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use crate::game::MAX_MAP_RADIUS;
use crate::game::{DEFAULT_MAP_RADIUS, Rules};

/// Turns simulated when none is given.
pub const DEFAULT_TURNS: u32 = 20;

/// Settings for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Seed for map generation and combat dice.
    pub seed: u64,
    /// Hexagon radius of the map.
    pub map_radius: u32,
    /// Turns to simulate after the script runs out.
    pub turns: u32,
    /// Rule tweaks.
    pub rules: Rules,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            map_radius: DEFAULT_MAP_RADIUS,
            turns: DEFAULT_TURNS,
            rules: Rules::default(),
        }
    }
}

/// A single problem with an otherwise well-formed config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    /// Radius outside `1..=MAX_MAP_RADIUS`.
    #[error("map_radius {0} outside 1..={max}", max = MAX_MAP_RADIUS)]
    RadiusOutOfRange(u32),
    /// Zero turns requested.
    #[error("turns must be at least 1")]
    NoTurns,
}

/// Failure to load a config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The file is not valid config JSON.
    #[error("cannot parse {}: {source}", .path.display())]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
    /// The values are out of range.
    #[error("invalid config: {}", join_issues(.0))]
    Invalid(Vec<ConfigIssue>),
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl GameConfig {
    /// Every problem with the current values. Empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if !(1..=MAX_MAP_RADIUS).contains(&self.map_radius) {
            issues.push(ConfigIssue::RadiusOutOfRange(self.map_radius));
        }
        if self.turns == 0 {
            issues.push(ConfigIssue::NoTurns);
        }
        issues
    }

    /// Fail with every issue found, or pass the config through.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] listing every out-of-range value.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let issues = self.validate();
        if issues.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(issues))
        }
    }

    /// Parse a config from JSON text without validating it.
    ///
    /// # Errors
    ///
    /// Returns the parse error; `path` only labels it.
    pub fn from_json(text: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read, parse and validate a config file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed, or holds invalid values.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text, path)?.validated()?;
        debug!("loaded config from {}: {config:?}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ResearchSwitch;

    #[test]
    fn test_default_is_valid() {
        assert!(GameConfig::default().validate().is_empty());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{"seed": 9}"#, Path::new("inline")).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.map_radius, DEFAULT_MAP_RADIUS);
        assert_eq!(config.turns, DEFAULT_TURNS);
        assert_eq!(config.rules.research_switch, ResearchSwitch::Keep);
    }

    #[test]
    fn test_nested_rules() {
        let config = GameConfig::from_json(
            r#"{"rules": {"research_switch": "discard"}}"#,
            Path::new("inline"),
        )
        .unwrap();
        assert_eq!(config.rules.research_switch, ResearchSwitch::Discard);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = GameConfig::from_json(r#"{"radius": 5}"#, Path::new("x.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("cannot parse x.json"));
    }

    #[test]
    fn test_all_issues_reported() {
        let config = GameConfig {
            map_radius: 0,
            turns: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            vec![ConfigIssue::RadiusOutOfRange(0), ConfigIssue::NoTurns]
        );
        let err = config.validated().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid config: map_radius 0 outside 1..=64; turns must be at least 1"
        );
    }

    #[test]
    fn test_radius_bounds() {
        let at = |map_radius| GameConfig {
            map_radius,
            ..GameConfig::default()
        };
        assert!(at(1).validate().is_empty());
        assert!(at(MAX_MAP_RADIUS).validate().is_empty());
        assert_eq!(
            at(MAX_MAP_RADIUS + 1).validate(),
            vec![ConfigIssue::RadiusOutOfRange(65)]
        );
    }
}
