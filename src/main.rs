use anyhow::{Context, Result};
use clap::Parser;
use mini_arcade::catalog::GameKind;
use mini_arcade::config::ArcadeConfig;
use mini_arcade::modes::PlayMode;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

#[derive(Parser)]
#[command(name = "mini_arcade")]
#[command(version, about = "Casual mini-games in the terminal")]
struct Cli {
    /// Game to open with (switch any time with Tab or F1-F3)
    #[arg(long, value_enum)]
    game: Option<GameKind>,

    /// Seed for opponent choices and food placement
    #[arg(long)]
    seed: Option<u64>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Snake grid size, overrides the config file
    #[arg(long)]
    grid_size: Option<usize>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(path: &Path, level: &str) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_tracing(path, &cli.log_level)?;
    }

    // Build configuration: file, then CLI overrides
    let mut config = match &cli.config {
        Some(path) => ArcadeConfig::load(path)?,
        None => ArcadeConfig::default(),
    };
    if let Some(grid_size) = cli.grid_size {
        config.snake.grid_size = grid_size;
    }
    config.validate().context("Invalid configuration")?;
    info!(?config, "configuration ready");

    let mut play_mode = PlayMode::new(config, cli.seed);
    if let Some(game) = cli.game {
        play_mode.select(game)?;
    }
    play_mode.run().await?;

    Ok(())
}
