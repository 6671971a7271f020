#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that feeds board snapshots to the Skirmish engine.

mod inspect;
mod settings;
mod wire;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use skirmish_board::Board;
use skirmish_system_policy::{Config, DecisionPolicy};
use tracing_subscriber::EnvFilter;

use crate::settings::EngineSettings;

/// Decide the next move for a ship from a board snapshot.
#[derive(Debug, Parser)]
#[command(name = "skirmish", version, about)]
struct Cli {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Print the move response JSON for a snapshot.
    Decide(EngineArgs),
    /// Print a readable breakdown of how the engine sees a snapshot.
    Inspect(EngineArgs),
}

#[derive(Debug, Args)]
struct EngineArgs {
    /// Snapshot JSON file; reads stdin when omitted.
    #[arg(long)]
    snapshot: Option<PathBuf>,
    /// TOML file with engine tuning.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum number of cells a shot travels.
    #[arg(long)]
    firing_range: Option<u32>,
    /// Number of turns projected for each enemy.
    #[arg(long)]
    horizon: Option<u32>,
    /// Rank enemies that point at the ship ahead of the rest.
    #[arg(long)]
    prioritise_facing: bool,
}

impl EngineArgs {
    fn config(&self) -> Result<Config> {
        let settings = match &self.config {
            Some(path) => EngineSettings::from_path(path)?,
            None => EngineSettings::default(),
        };

        let mut config = settings.apply(Config::default());
        if let Some(firing_range) = self.firing_range {
            config = config.with_firing_range(firing_range);
        }
        if let Some(horizon) = self.horizon {
            config = config.with_prediction_horizon(horizon);
        }
        if self.prioritise_facing {
            config = config.with_prioritised_facing(true);
        }

        config.validate().context("invalid engine configuration")?;
        Ok(config)
    }
}

/// Entry point for the Skirmish command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.mode {
        Mode::Decide(args) => {
            let config = args.config()?;
            let snapshot = wire::read_snapshot(args.snapshot.as_deref())?;
            tracing::info!(game_id = snapshot.game_id, "deciding move");

            let decision = DecisionPolicy::new(config)
                .decide_snapshot(&snapshot)
                .context("snapshot rejected")?;
            println!("{}", wire::encode_response(decision.command)?);
        }
        Mode::Inspect(args) => {
            let config = args.config()?;
            let snapshot = wire::read_snapshot(args.snapshot.as_deref())?;
            let board = Board::parse(&snapshot).context("snapshot rejected")?;
            print!("{}", inspect::Report::new(&board, &config));
        }
    }

    Ok(())
}
