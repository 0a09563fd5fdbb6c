//! Training mode for evolved snake policies
//!
//! Each generation the optimizer hands out its population, the evaluator plays
//! one game per policy, and the resulting fitness goes back to the optimizer.
//! The champion is saved periodically and once more at the end.
//!
//! # Example
//!
//! ```rust,no_run
//! use evo_snake::modes::{TrainConfig, TrainMode};
//! use std::path::PathBuf;
//!
//! let mut config = TrainConfig::new(50, PathBuf::from("models/snake.json"));
//! config.evolution_config.population_size = 200;
//!
//! let mut train_mode = TrainMode::new(config)?;
//! train_mode.run()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::game::{GameConfig, GameEngine};
use crate::metrics::TrainingStats;
use crate::neuro::{
    save_policy, EvaluatorConfig, Evolution, EvolutionConfig, FeedForwardNetwork,
    GenerationReport, ModelMetadata, Optimizer, PopulationEvaluator,
};

/// Configuration for training mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Number of generations to run
    pub generations: usize,

    /// Path to save the final champion
    pub save_path: PathBuf,

    /// Save a checkpoint every N generations (0 disables)
    pub checkpoint_frequency: usize,

    /// Log training progress every N generations
    pub log_frequency: usize,

    /// Game configuration (grid size, starting snake, seed)
    pub game_config: GameConfig,

    /// Population and mutation settings
    pub evolution_config: EvolutionConfig,

    /// Fitness shaping and parallelism
    pub evaluator_config: EvaluatorConfig,
}

impl TrainConfig {
    /// Create a new training configuration with defaults
    ///
    /// ```rust
    /// use evo_snake::modes::TrainConfig;
    /// use std::path::PathBuf;
    ///
    /// let config = TrainConfig::new(100, PathBuf::from("models/snake.json"));
    /// assert_eq!(config.generations, 100);
    /// ```
    pub fn new(generations: usize, save_path: PathBuf) -> Self {
        Self {
            generations,
            save_path,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json).with_context(|| format!("Failed to parse config {:?}", path))
    }

    pub fn validate(&self) -> Result<()> {
        self.game_config
            .validate()
            .context("Invalid game configuration")?;
        self.evolution_config
            .validate()
            .map_err(|msg| anyhow!(msg))
            .context("Invalid evolution configuration")?;
        self.evaluator_config
            .fitness
            .validate()
            .map_err(|msg| anyhow!(msg))
            .context("Invalid fitness configuration")?;
        Ok(())
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            generations: 100,
            save_path: PathBuf::from("models/snake.json"),
            checkpoint_frequency: 25,
            log_frequency: 1,
            game_config: GameConfig::default(),
            evolution_config: EvolutionConfig::default(),
            evaluator_config: EvaluatorConfig::default(),
        }
    }
}

/// Training mode for evolved policies
pub struct TrainMode {
    evolution: Evolution,
    evaluator: PopulationEvaluator,
    stats: TrainingStats,
    config: TrainConfig,
}

impl TrainMode {
    pub fn new(config: TrainConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            evolution: Evolution::new(config.evolution_config.clone()),
            evaluator: PopulationEvaluator::new(config.evaluator_config.clone()),
            // 10-generation rolling window
            stats: TrainingStats::new(10),
            config,
        })
    }

    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    /// Best policy found so far
    pub fn champion(&self) -> Option<(&FeedForwardNetwork, f64)> {
        self.evolution.champion()
    }

    /// Run every configured generation and save the champion
    pub fn run(&mut self) -> Result<()> {
        self.print_header();

        for generation in 0..self.config.generations {
            let report = self.run_generation()?;
            self.stats.record_report(&report);

            if report.error_count() > 0 {
                warn!(
                    generation,
                    errors = report.error_count(),
                    "agents dropped this generation"
                );
            }

            if self.config.log_frequency > 0 && (generation + 1) % self.config.log_frequency == 0 {
                info!(
                    generation = generation + 1,
                    best = report.best_fitness(),
                    mean = report.mean_fitness(),
                    score = report.best_score(),
                    ticks = report.ticks,
                    "generation complete"
                );
                self.print_progress(generation + 1);
            }

            if self.config.checkpoint_frequency > 0
                && (generation + 1) % self.config.checkpoint_frequency == 0
            {
                self.save_checkpoint(generation + 1)?;
            }
        }

        self.save_champion(&self.config.save_path)?;

        println!("\nTraining complete!");
        println!("Champion saved to: {:?}", self.config.save_path);
        println!("\nFinal Statistics:");
        println!("{}", self.stats.format_summary());

        Ok(())
    }

    /// Evaluate the current population and breed the next one
    pub fn run_generation(&mut self) -> Result<GenerationReport> {
        let generation = self.evolution.generation();
        let game_config = self.generation_game_config(generation);

        let agents = self
            .evolution
            .population()
            .iter()
            .map(|policy| GameEngine::new(game_config.clone()).map(|engine| (policy, engine)))
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to set up games")?;

        let report = self.evaluator.evaluate(agents);
        self.evolution.tell(&report.fitness());

        Ok(report)
    }

    /// Seeded runs shift the seed per generation so each one sees new fruit
    fn generation_game_config(&self, generation: usize) -> GameConfig {
        let mut config = self.config.game_config.clone();
        config.seed = config.seed.map(|seed| seed.wrapping_add(generation as u64));
        config
    }

    fn save_checkpoint(&self, generation: usize) -> Result<()> {
        let checkpoint_path = self
            .config
            .save_path
            .parent()
            .unwrap_or(Path::new("."))
            .join(format!("checkpoint_gen{}.json", generation));

        self.save_champion(&checkpoint_path)?;
        println!("  Checkpoint saved: {:?}", checkpoint_path);

        Ok(())
    }

    fn save_champion(&self, path: &Path) -> Result<()> {
        let (network, fitness) = self
            .evolution
            .champion()
            .ok_or_else(|| anyhow!("No champion to save; no generation has run"))?;

        let metadata = ModelMetadata::new(
            self.evolution.generation(),
            fitness,
            self.config.game_config.grid_width,
            self.config.game_config.grid_height,
        );

        save_policy(network, &metadata, path)
            .with_context(|| format!("Failed to save champion to {:?}", path))
    }

    fn print_header(&self) {
        let evolution = &self.config.evolution_config;
        let fitness = &self.config.evaluator_config.fitness;

        println!("{}", "=".repeat(70));
        println!("Neuroevolution Training - Snake");
        println!("{}", "=".repeat(70));
        println!("Generations: {}", self.config.generations);
        println!(
            "Game Config: {}x{} grid",
            self.config.game_config.grid_width, self.config.game_config.grid_height
        );
        println!("Evolution Config:");
        println!("  Population: {}", evolution.population_size);
        println!("  Hidden size: {}", evolution.hidden_size);
        println!("  Elites: {}", evolution.elite_count());
        println!("  Mutation rate: {}", evolution.mutation_rate);
        println!("  Mutation strength: {}", evolution.mutation_strength);
        println!(
            "Fitness: +{} per tick, +{} per fruit, -{} on death",
            fitness.survival_reward, fitness.growth_reward, fitness.death_penalty
        );
        println!("Parallel: {}", self.config.evaluator_config.parallel);
        println!("Save path: {:?}", self.config.save_path);
        println!("{}", "=".repeat(70));
        println!();
    }

    fn print_progress(&self, generation: usize) {
        println!(
            "[Generation {}/{}] {}",
            generation,
            self.config.generations,
            self.stats.format_summary()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neuro::load_policy;
    use tempfile::TempDir;

    fn small_config(generations: usize, save_path: PathBuf) -> TrainConfig {
        let mut config = TrainConfig::new(generations, save_path);
        config.game_config = GameConfig::default().with_seed(3);
        config.evolution_config.population_size = 6;
        config.evolution_config.hidden_size = 4;
        config.evolution_config.seed = Some(11);
        config.checkpoint_frequency = 0;
        config
    }

    #[test]
    fn test_train_config_creation() {
        let config = TrainConfig::new(1000, PathBuf::from("test.json"));
        assert_eq!(config.generations, 1000);
        assert_eq!(config.save_path, PathBuf::from("test.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("train.json");
        std::fs::write(
            &path,
            r#"{"generations": 7, "evolution_config": {"population_size": 12}}"#,
        )
        .unwrap();

        let config = TrainConfig::from_file(&path).unwrap();

        assert_eq!(config.generations, 7);
        assert_eq!(config.evolution_config.population_size, 12);
        assert_eq!(config.game_config, GameConfig::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = TrainConfig::new(1, PathBuf::from("x.json"));
        config.game_config = GameConfig::new(5, 5);
        assert!(TrainMode::new(config).is_err());
    }

    #[test]
    fn test_run_generation() {
        let temp_dir = TempDir::new().unwrap();
        let mut mode = TrainMode::new(small_config(1, temp_dir.path().join("m.json"))).unwrap();

        let report = mode.run_generation().unwrap();

        assert_eq!(report.agents.len(), 6);
        assert!(report.ticks > 0);
        assert!(mode.champion().is_some());
    }

    #[test]
    fn test_run_saves_champion() {
        let temp_dir = TempDir::new().unwrap();
        let save_path = temp_dir.path().join("models").join("champion.json");
        let mut config = small_config(2, save_path.clone());
        config.checkpoint_frequency = 1;

        let mut mode = TrainMode::new(config).unwrap();
        mode.run().unwrap();

        assert_eq!(mode.stats().total_generations(), 2);
        let (network, metadata) = load_policy(&save_path).unwrap();
        assert_eq!(network.hidden_size(), 4);
        assert_eq!(metadata.generation, 2);
        assert_eq!(metadata.fitness, mode.champion().unwrap().1);
        assert!(temp_dir
            .path()
            .join("models")
            .join("checkpoint_gen1.json")
            .exists());
    }
}
