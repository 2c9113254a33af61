//! hexciv CLI - run, batch and inspect seeded hex strategy games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// hexciv - a deterministic hex-grid strategy simulation
#[derive(Parser, Debug)]
#[command(name = "hexciv")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play one seeded game driven by a command script
    Run {
        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// JSON command script (default: built-in opening)
        #[arg(long)]
        script: Option<PathBuf>,

        /// Random seed (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Map radius (overrides config)
        #[arg(short, long)]
        radius: Option<u32>,

        /// Turns to play after the script (overrides config)
        #[arg(short, long)]
        turns: Option<u32>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Include the full world snapshot in JSON output
        #[arg(long)]
        snapshot: bool,
    },

    /// Play many seeds in parallel and aggregate statistics
    Batch {
        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// JSON command script (default: built-in opening)
        #[arg(long)]
        script: Option<PathBuf>,

        /// Number of games to run (default: 100)
        #[arg(short, long, default_value = "100")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Map radius (overrides config)
        #[arg(short, long)]
        radius: Option<u32>,

        /// Turns to play after the script (overrides config)
        #[arg(short, long)]
        turns: Option<u32>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::BatchFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Generate a map and print it
    Map {
        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Random seed (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Map radius (overrides config)
        #[arg(short, long)]
        radius: Option<u32>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_secs()
        .try_init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let result = match args.command {
        Commands::Run {
            config,
            script,
            seed,
            radius,
            turns,
            format,
            snapshot,
        } => {
            let overrides = cli::Overrides {
                seed,
                radius,
                turns,
            };
            cli::run::execute(config, script, overrides, format, snapshot)
        }

        Commands::Batch {
            config,
            script,
            games,
            seed,
            radius,
            turns,
            threads,
            format,
            progress,
        } => {
            let overrides = cli::Overrides {
                seed,
                radius,
                turns,
            };
            cli::batch::execute(config, script, overrides, games, threads, format, progress)
        }

        Commands::Map {
            config,
            seed,
            radius,
            format,
        } => {
            let overrides = cli::Overrides {
                seed,
                radius,
                turns: None,
            };
            cli::map::execute(config, overrides, format)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
