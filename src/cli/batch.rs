//! Batch command implementation.

use super::output::{
    BatchStats, GameStats, JsonBatchResult, format_batch_csv, format_batch_text,
};
use super::{BatchFormat, CliError, Overrides, resolve_config};
use hexciv::config::GameConfig;
use hexciv::script::{load_script, opening_script, play};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

/// Execute the batch command.
///
/// Game `i` uses seed `base + i`; everything else comes from the config.
///
/// # Errors
///
/// Returns an error if the config or script cannot be loaded.
#[allow(clippy::too_many_arguments)]
pub(crate) fn execute(
    config: Option<PathBuf>,
    script: Option<PathBuf>,
    overrides: Overrides,
    games: u64,
    threads: Option<usize>,
    format: BatchFormat,
    progress: bool,
) -> Result<(), CliError> {
    let base = resolve_config(config.as_deref(), overrides)?;
    let commands = match &script {
        Some(path) => load_script(path)?,
        None => opening_script(),
    };

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let pb = if progress {
        let pb = ProgressBar::new(games);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
            .map_err(|e| CliError::Other(format!("bad progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Each thread accumulates its own BatchStats; partials are merged at the end.
    let mut stats = (0..games)
        .into_par_iter()
        .fold(BatchStats::default, |mut local, i| {
            let config = GameConfig {
                seed: base.seed.wrapping_add(i),
                ..base
            };
            let (game, summary) = play(&config, &commands);
            local.add_result(GameStats::from_game(&game, &summary));
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local
        })
        .reduce(BatchStats::default, |mut a, b| {
            a.merge(b);
            a
        });
    stats.sort();

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    #[allow(clippy::cast_precision_loss)]
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played() as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        BatchFormat::Text => {
            println!();
            print!("{}", format_batch_text(&stats));
            println!();
            println!(
                "Duration: {:.2}s ({games_per_sec:.0} games/sec)",
                duration.as_secs_f64()
            );
        }
        BatchFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonBatchResult::from_stats(&stats))?;
            println!("{json}");
        }
        BatchFormat::Csv => {
            print!("{}", format_batch_csv(&stats));
        }
    }

    Ok(())
}
