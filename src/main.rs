use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use term_snake::game::{Direction, GameConfig, TimingConfig};
use term_snake::modes::HumanMode;
use term_snake::storage::{HighScoreStore, DEFAULT_HIGH_SCORE_FILE};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "term_snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// JSON file with a game configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board rows
    #[arg(long)]
    rows: Option<usize>,

    /// Board columns
    #[arg(long)]
    cols: Option<usize>,

    /// Initial snake length
    #[arg(long)]
    starting_length: Option<usize>,

    /// Score per food item
    #[arg(long)]
    points_per_food: Option<u32>,

    /// Direction of travel at start
    #[arg(long, value_enum)]
    direction: Option<Heading>,

    /// Wall cells scattered over the board
    #[arg(long)]
    walls: Option<usize>,

    /// Seed for food and wall placement
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between ticks
    #[arg(long, default_value = "150")]
    tick_ms: u64,

    /// File holding the best score
    #[arg(long, default_value = DEFAULT_HIGH_SCORE_FILE)]
    high_score_file: PathBuf,

    /// Write logs to this file (logs are discarded otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl From<Heading> for Direction {
    fn from(heading: Heading) -> Self {
        match heading {
            Heading::Up => Direction::Up,
            Heading::Down => Direction::Down,
            Heading::Left => Direction::Left,
            Heading::Right => Direction::Right,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => GameConfig::default(),
        };

        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(length) = self.starting_length {
            config.starting_length = length;
        }
        if let Some(points) = self.points_per_food {
            config.points_per_food = points;
        }
        if let Some(heading) = self.direction {
            config.initial_direction = heading.into();
        }
        if let Some(walls) = self.walls {
            config.wall_count = walls;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }

    fn timing(&self) -> TimingConfig {
        TimingConfig {
            tick_interval: Duration::from_millis(self.tick_ms.max(1)),
            ..Default::default()
        }
    }
}

fn load_config(path: &Path) -> Result<GameConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {:?}", path))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse config {:?}", path))
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive("term_snake=info".parse()?);

    // The TUI owns the terminal, so logs only ever go to a file
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::sink)
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = cli.game_config()?;
    let high_scores = HighScoreStore::open(&cli.high_score_file);
    tracing::info!(?config, high_score = high_scores.best(), "starting");

    let mut human_mode = HumanMode::new(config, cli.timing(), high_scores)?;
    human_mode.run().await?;

    println!("Thanks for playing!");
    Ok(())
}
