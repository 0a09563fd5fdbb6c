use anyhow::Result;
use clap::{Parser, ValueEnum};
use evo_snake::modes::{ReplayMode, TrainConfig, TrainMode};
use evo_snake::neuro::TickRate;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "evo_snake")]
#[command(version, about = "Snake played by neuroevolved policies")]
struct Cli {
    /// What to run
    #[arg(long, default_value = "train")]
    mode: Mode,

    /// Training configuration file (JSON); flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Seed for fruit placement and the optimizer
    #[arg(long)]
    seed: Option<u64>,

    /// Generations to train
    #[arg(long)]
    generations: Option<usize>,

    /// Policies per generation
    #[arg(long)]
    population: Option<usize>,

    /// Where the champion is saved (train) or loaded from (replay)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Replay ticks per second
    #[arg(long, default_value = "8")]
    tick_rate: u32,

    /// Play evaluation games one agent at a time
    #[arg(long)]
    sequential: bool,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Evolve a population and save the champion
    Train,
    /// Watch a saved champion play one game
    Replay,
}

impl Cli {
    fn train_config(&self) -> Result<TrainConfig> {
        let mut config = match &self.config {
            Some(path) => TrainConfig::from_file(path)?,
            None => TrainConfig::default(),
        };

        if let Some(width) = self.width {
            config.game_config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.game_config.grid_height = height;
        }
        if let Some(seed) = self.seed {
            config.game_config.seed = Some(seed);
            config.evolution_config.seed = Some(seed);
        }
        if let Some(generations) = self.generations {
            config.generations = generations;
        }
        if let Some(population) = self.population {
            config.evolution_config.population_size = population;
        }
        if let Some(model) = &self.model {
            config.save_path = model.clone();
        }
        if self.sequential {
            config.evaluator_config.parallel = false;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; the replay TUI draws on the alternate screen
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.train_config()?;

    match cli.mode {
        Mode::Train => {
            let mut train_mode = TrainMode::new(config)?;
            // Training is CPU bound; keep it off the async workers
            tokio::task::block_in_place(|| train_mode.run())?;
        }
        Mode::Replay => {
            let mut replay_mode = ReplayMode::new(
                &config.save_path,
                config.game_config,
                TickRate::new(cli.tick_rate),
            )?;
            replay_mode.run().await?;
        }
    }

    Ok(())
}
