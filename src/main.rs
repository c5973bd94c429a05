use std::time::Duration;

use anyhow::{ensure, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use tic_tac_n::game::types::Config;
use tic_tac_n::stats::StatsStore;
use tic_tac_n::storage;
use tic_tac_n::ui;

/// Generalized n×n tic-tac-toe with a learning computer opponent.
#[derive(Parser, Debug)]
#[command(name = "tic_tac_n", version, about)]
struct Cli {
    /// Board size (side length, at least 3)
    #[arg(short = 'n', long)]
    size: Option<usize>,

    /// Two human players instead of the computer opponent
    #[arg(long)]
    pvp: bool,

    /// Let the computer make the opening move
    #[arg(long, conflicts_with = "pvp")]
    computer_first: bool,

    /// Exhaustive-search opponent (remembered for later runs)
    #[arg(long, conflicts_with = "normal")]
    hard: bool,

    /// Heuristic opponent (remembered for later runs)
    #[arg(long)]
    normal: bool,

    /// Pause before each computer move, in milliseconds
    #[arg(long)]
    delay: Option<u64>,

    /// Keep games and statistics in memory only
    #[arg(long)]
    ephemeral: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut settings = storage::load_settings();
    if let Some(size) = cli.size {
        settings.board_size = size;
    }
    if let Some(delay) = cli.delay {
        settings.move_delay_ms = delay;
    }
    if cli.hard {
        settings.hard_mode = true;
    }
    if cli.normal {
        settings.hard_mode = false;
    }

    ensure!(
        settings.board_size > 2,
        "board size must be at least 3 (got {})",
        settings.board_size
    );

    if !cli.ephemeral {
        if let Err(err) = storage::save_settings(&settings) {
            warn!(error = %err, "failed to save settings");
        }
    }

    let store = if cli.ephemeral {
        StatsStore::in_memory()
    } else {
        StatsStore::load()
    };

    let config = Config {
        size: settings.board_size,
        pvp: cli.pvp,
        player_first: !cli.computer_first,
        hard_mode: settings.hard_mode,
    };

    ui::app::run(config, store, Duration::from_millis(settings.move_delay_ms))?;
    Ok(())
}
