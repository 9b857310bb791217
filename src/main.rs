use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::audio::{AudioSink, Silent, TerminalBell};
use grid_snake::game::{GameConfig, GameSession};
use grid_snake::modes::PlayMode;
use grid_snake::storage::HighScoreStore;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a square grid, in your terminal")]
struct Cli {
    /// Board width and height in cells
    #[arg(long, default_value = "20", value_parser = clap::value_parser!(u16).range(4..=100))]
    board_size: u16,

    /// Milliseconds between two moves of the snake
    #[arg(long, default_value = "150")]
    tick_ms: u64,

    /// File holding the persisted high score
    #[arg(long, default_value = "grid_snake_high_score.json")]
    high_score_file: PathBuf,

    /// Write logs to this file
    #[arg(long, default_value = "grid_snake.log")]
    log_file: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Disable the terminal bell
    #[arg(long)]
    mute: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The terminal belongs to the game, so logs go to a file
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?;
    WriteLogger::init(cli.log_level, Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let config = GameConfig::new(cli.board_size as usize).with_tick_interval_ms(cli.tick_ms);
    log::info!("Starting grid_snake with {:?}", config);

    let audio: Box<dyn AudioSink> = if cli.mute {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell::new(std::io::stderr()))
    };

    let high_score = HighScoreStore::open(cli.high_score_file);
    let session = GameSession::new(config, high_score, audio);

    let mut play_mode = PlayMode::new(session);
    play_mode.run().await?;

    Ok(())
}
