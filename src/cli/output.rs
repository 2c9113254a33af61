//! Output formatting utilities for CLI.

use hexciv::game::{Faction, Game, Hex, Resource, Tech, Terrain, UnitKind, World, WorldSnapshot};
use hexciv::script::ScriptSummary;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Headline numbers for one finished game.
#[derive(Debug, Clone, Serialize)]
pub(super) struct GameStats {
    /// Random seed used.
    pub(super) seed: u64,
    /// Turn the game stopped on.
    pub(super) turn: u32,
    /// Gold in the treasury.
    pub(super) gold: u32,
    /// Lifetime science.
    pub(super) science: u32,
    /// Cities owned.
    pub(super) cities: usize,
    /// Population across all cities.
    pub(super) population: u32,
    /// Player units alive.
    pub(super) units: usize,
    /// Technologies unlocked.
    pub(super) techs: usize,
    /// Script commands that took effect.
    pub(super) applied: usize,
    /// Script commands that were refused.
    pub(super) rejected: usize,
}

impl GameStats {
    /// Collect stats from a finished game.
    pub(super) fn from_game(game: &Game, summary: &ScriptSummary) -> Self {
        let world = &game.world;
        Self {
            seed: game.seed(),
            turn: world.turn,
            gold: world.gold,
            science: world.science,
            cities: world.entities.cities().len(),
            population: world.entities.cities().iter().map(|c| c.population).sum(),
            units: world
                .entities
                .units()
                .iter()
                .filter(|u| u.owner == Faction::Player)
                .count(),
            techs: world.tech.unlocked().count(),
            applied: summary.applied,
            rejected: summary.rejections.len(),
        }
    }
}

/// JSON-serializable game result.
#[derive(Debug, Serialize)]
pub(super) struct JsonGameResult<'a> {
    /// Headline numbers.
    #[serde(flatten)]
    pub(super) stats: GameStats,
    /// Technologies unlocked.
    pub(super) unlocked: Vec<Tech>,
    /// Script tally.
    pub(super) script: &'a ScriptSummary,
    /// Full world state, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) snapshot: Option<WorldSnapshot>,
}

impl<'a> JsonGameResult<'a> {
    /// Create from a finished game.
    pub(super) fn new(game: &Game, summary: &'a ScriptSummary, with_snapshot: bool) -> Self {
        Self {
            stats: GameStats::from_game(game, summary),
            unlocked: game.world.tech.unlocked().collect(),
            script: summary,
            snapshot: with_snapshot.then(|| game.snapshot()),
        }
    }
}

/// Format a game result as human-readable text.
pub(super) fn format_text(game: &Game, summary: &ScriptSummary) -> String {
    let stats = GameStats::from_game(game, summary);
    let mut output = String::new();

    let _ = writeln!(output, "Game Result (seed: {})", stats.seed);
    let _ = writeln!(output, "  Turn: {}", stats.turn);
    let _ = writeln!(output, "  Gold: {}  Science: {}", stats.gold, stats.science);
    let _ = writeln!(
        output,
        "  Script: {} applied, {} rejected",
        stats.applied, stats.rejected
    );
    for rejection in &summary.rejections {
        let _ = writeln!(
            output,
            "    #{} {:?}: {}",
            rejection.index, rejection.command, rejection.reason
        );
    }

    let techs: Vec<String> = game.world.tech.unlocked().map(|t| t.to_string()).collect();
    let _ = writeln!(
        output,
        "  Technologies: {}",
        if techs.is_empty() { "none".to_string() } else { techs.join(", ") }
    );
    if let Some(current) = game.world.tech.current() {
        let _ = writeln!(
            output,
            "  Researching: {current} ({}/{})",
            game.world.tech.progress(),
            hexciv::game::RESEARCH_COST
        );
    }
    output.push('\n');

    for city in game.cities() {
        let _ = writeln!(
            output,
            "  {} at ({}, {}): population {}, order {:?}",
            city.name, city.q, city.r, city.population, city.order
        );
    }
    for unit in game.units() {
        let _ = writeln!(
            output,
            "  {} #{} {} at ({}, {}): {}/{} hp",
            unit.owner, unit.id, unit.kind, unit.q, unit.r, unit.health, unit.max_health
        );
    }

    output
}

/// Batch statistics across many games.
#[derive(Debug, Default)]
pub(super) struct BatchStats {
    /// Per-game results.
    pub(super) games: Vec<GameStats>,
}

impl BatchStats {
    /// Add a game result to the stats.
    pub(super) fn add_result(&mut self, stats: GameStats) {
        self.games.push(stats);
    }

    /// Merge another partial result into this one.
    pub(super) fn merge(&mut self, other: Self) {
        self.games.extend(other.games);
    }

    /// Sort by seed so output is stable regardless of scheduling.
    pub(super) fn sort(&mut self) {
        self.games.sort_by_key(|g| g.seed);
    }

    /// Number of games recorded.
    pub(super) fn games_played(&self) -> usize {
        self.games.len()
    }

    fn metric(&self, f: impl Fn(&GameStats) -> f64) -> Metric {
        Metric::from_values(self.games.iter().map(f))
    }

    /// Summary of each tracked metric, in display order.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn metrics(&self) -> Vec<(&'static str, Metric)> {
        vec![
            ("gold", self.metric(|g| f64::from(g.gold))),
            ("science", self.metric(|g| f64::from(g.science))),
            ("cities", self.metric(|g| g.cities as f64)),
            ("population", self.metric(|g| f64::from(g.population))),
            ("units", self.metric(|g| g.units as f64)),
            ("techs", self.metric(|g| g.techs as f64)),
        ]
    }
}

/// Mean, spread and range of one metric.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub(super) struct Metric {
    mean: f64,
    std_dev: f64,
    min: f64,
    max: f64,
}

impl Metric {
    #[allow(clippy::cast_precision_loss)]
    fn from_values(values: impl Iterator<Item = f64>) -> Self {
        let mut n = 0usize;
        let mut sum = 0.0;
        let mut sq_sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            n += 1;
            sum += v;
            sq_sum += v * v;
            min = min.min(v);
            max = max.max(v);
        }
        if n == 0 {
            return Self::default();
        }
        let count = n as f64;
        let mean = sum / count;
        let variance = (sq_sum / count) - (mean * mean);
        Self {
            mean,
            std_dev: if variance < 0.0 { 0.0 } else { variance.sqrt() },
            min,
            max,
        }
    }
}

/// JSON-serializable batch result.
#[derive(Debug, Serialize)]
pub(super) struct JsonBatchResult<'a> {
    /// Total games played.
    games_played: usize,
    /// Aggregates keyed by metric name.
    metrics: BTreeMap<&'static str, Metric>,
    /// Per-game results.
    games: &'a [GameStats],
}

impl<'a> JsonBatchResult<'a> {
    /// Create from stats.
    pub(super) fn from_stats(stats: &'a BatchStats) -> Self {
        Self {
            games_played: stats.games_played(),
            metrics: stats.metrics().into_iter().collect(),
            games: &stats.games,
        }
    }
}

/// Format batch stats as human-readable text.
pub(super) fn format_batch_text(stats: &BatchStats) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Batch Results ({} games)", stats.games_played());
    output.push_str("========================================\n\n");

    for (name, m) in stats.metrics() {
        let _ = writeln!(
            output,
            "  {name:<11} {:>8.1} (+/- {:.1})  [{:.0}..{:.0}]",
            m.mean, m.std_dev, m.min, m.max
        );
    }

    output
}

/// Format batch stats as CSV, one row per game.
pub(super) fn format_batch_csv(stats: &BatchStats) -> String {
    let mut output = String::new();

    output.push_str("seed,turn,gold,science,cities,population,units,techs,applied,rejected\n");
    for g in &stats.games {
        let _ = writeln!(
            output,
            "{},{},{},{},{},{},{},{},{},{}",
            g.seed,
            g.turn,
            g.gold,
            g.science,
            g.cities,
            g.population,
            g.units,
            g.techs,
            g.applied,
            g.rejected
        );
    }

    output
}

fn tile_glyph(world: &World, hex: Hex) -> char {
    if let Some(unit) = world.entities.unit_at(hex) {
        return match (unit.owner, unit.kind) {
            (Faction::Barbarian, _) => 'B',
            (_, UnitKind::Settler) => 'S',
            (_, UnitKind::Worker) => 'w',
            _ => 'U',
        };
    }
    if world.entities.city_at(hex).is_some() {
        return 'C';
    }
    let Some(tile) = world.map.get(hex) else {
        return ' ';
    };
    match (tile.terrain, tile.resource) {
        (_, Resource::Wheat) => '"',
        (_, Resource::Iron) => '*',
        (Terrain::Ocean | Terrain::Coast, _) => '~',
        (Terrain::Grassland | Terrain::Plains, _) => '.',
        (Terrain::Hill, _) => 'n',
        (Terrain::Mountain, _) => '^',
        (Terrain::Snow, _) => '#',
    }
}

/// Draw the map as offset rows of glyphs, one row per axial `r`.
pub(super) fn format_map_text(world: &World) -> String {
    let radius = i32::try_from(world.map.radius()).unwrap_or(i32::MAX);
    let mut output = String::new();

    for r in -radius..=radius {
        let indent = usize::try_from(r.abs()).unwrap_or(0);
        output.push_str(&" ".repeat(indent));
        let q_min = (-radius).max(-r - radius);
        let q_max = radius.min(-r + radius);
        for q in q_min..=q_max {
            output.push(tile_glyph(world, Hex::new(q, r)));
            output.push(' ');
        }
        output.push('\n');
    }

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for tile in world.map.iter() {
        *counts.entry(format!("{:?}", tile.terrain)).or_default() += 1;
    }
    output.push('\n');
    let _ = writeln!(output, "{} tiles (radius {})", world.map.len(), world.map.radius());
    for (terrain, count) in counts {
        let _ = writeln!(output, "  {terrain:<10} {count}");
    }
    for camp in world.map.camps() {
        let _ = writeln!(output, "  Barbarian camp at {camp}");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexciv::config::GameConfig;
    use hexciv::script::{opening_script, play};

    fn stats_for(seed: u64) -> GameStats {
        let config = GameConfig {
            seed,
            map_radius: 6,
            turns: 3,
            ..GameConfig::default()
        };
        let (game, summary) = play(&config, &opening_script());
        GameStats::from_game(&game, &summary)
    }

    #[test]
    fn test_metric_from_values() {
        let m = Metric::from_values([2.0, 4.0, 6.0].into_iter());
        assert!((m.mean - 4.0).abs() < 1e-9);
        assert!((m.min - 2.0).abs() < 1e-9);
        assert!((m.max - 6.0).abs() < 1e-9);
        assert!(m.std_dev > 1.6 && m.std_dev < 1.7);
    }

    #[test]
    fn test_empty_metric_is_zero() {
        let m = Metric::from_values(std::iter::empty());
        assert!(m.mean.abs() < f64::EPSILON);
    }

    #[test]
    fn test_batch_sort_and_csv() {
        let mut stats = BatchStats::default();
        stats.add_result(stats_for(9));
        let mut other = BatchStats::default();
        other.add_result(stats_for(3));
        stats.merge(other);
        stats.sort();

        assert_eq!(stats.games_played(), 2);
        let csv = format_batch_csv(&stats);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("seed,turn,"));
        assert!(lines[1].starts_with("3,"));
        assert!(lines[2].starts_with("9,"));
    }

    #[test]
    fn test_opening_stats() {
        let stats = stats_for(1);
        assert_eq!(stats.cities, 1);
        assert_eq!(stats.turn, 5);
        assert!(stats.techs <= 1);
    }

    #[test]
    fn test_map_text_has_every_row() {
        let config = GameConfig {
            map_radius: 4,
            ..GameConfig::default()
        };
        let (game, _) = play(&config, &[]);
        let text = format_map_text(&game.world);
        assert!(text.contains("61 tiles (radius 4)"));
        // settler at the origin on the middle row
        let middle = text.lines().nth(4).unwrap();
        assert!(middle.contains('S'));
    }
}
