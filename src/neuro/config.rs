//! Evaluation and evolution configuration

use serde::{Deserialize, Serialize};

/// Reward shaping applied by the fitness tracker
///
/// # Example
///
/// ```rust
/// use evo_snake::neuro::FitnessConfig;
///
/// let config = FitnessConfig::default();
/// assert_eq!(config.growth_reward, 2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessConfig {
    /// Added every tick the agent starts alive
    ///
    /// Default: 0.1
    pub survival_reward: f64,

    /// Added on the tick the snake eats
    ///
    /// Default: 2.0
    pub growth_reward: f64,

    /// Subtracted once, on the tick the snake dies
    ///
    /// Default: 1.0
    pub death_penalty: f64,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            survival_reward: 0.1,
            growth_reward: 2.0,
            death_penalty: 1.0,
        }
    }
}

impl FitnessConfig {
    /// Rewards must be non-negative; the penalty is given as a magnitude
    pub fn validate(&self) -> Result<(), String> {
        if self.survival_reward < 0.0 {
            return Err(format!(
                "survival_reward must be non-negative, got {}",
                self.survival_reward
            ));
        }
        if self.growth_reward < 0.0 {
            return Err(format!(
                "growth_reward must be non-negative, got {}",
                self.growth_reward
            ));
        }
        if self.death_penalty < 0.0 {
            return Err(format!(
                "death_penalty is a magnitude and must be non-negative, got {}",
                self.death_penalty
            ));
        }
        Ok(())
    }
}

/// Population evaluator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Run each tick's agents on the rayon pool
    pub parallel: bool,

    pub fitness: FitnessConfig,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            fitness: FitnessConfig::default(),
        }
    }
}

/// Hyperparameters for the reference neuroevolution optimizer
///
/// # Example
///
/// ```rust
/// use evo_snake::neuro::EvolutionConfig;
///
/// let config = EvolutionConfig {
///     population_size: 50,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Policies evaluated per generation
    ///
    /// Default: 100
    pub population_size: usize,

    /// Hidden neurons in each network
    ///
    /// Default: 8
    pub hidden_size: usize,

    /// Share of the population kept unchanged as parents
    ///
    /// Default: 0.2
    pub elite_fraction: f32,

    /// Probability that a single weight is perturbed
    ///
    /// Default: 0.1
    pub mutation_rate: f32,

    /// Largest perturbation applied to a mutated weight
    ///
    /// Default: 0.5
    pub mutation_strength: f32,

    /// Seed for initial weights and mutation
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            hidden_size: 8,
            elite_fraction: 0.2,
            mutation_rate: 0.1,
            mutation_strength: 0.5,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Number of elites carried into the next generation (at least one)
    pub fn elite_count(&self) -> usize {
        ((self.population_size as f32 * self.elite_fraction).round() as usize)
            .clamp(1, self.population_size.max(1))
    }

    /// Validate configuration parameters
    ///
    /// # Returns
    ///
    /// `Ok(())` if all parameters are valid, `Err(String)` with an error message otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size == 0 {
            return Err("population_size must be at least 1".to_string());
        }

        if self.hidden_size == 0 {
            return Err("hidden_size must be at least 1".to_string());
        }

        if self.elite_fraction <= 0.0 || self.elite_fraction > 1.0 {
            return Err(format!(
                "elite_fraction must be in (0, 1], got {}",
                self.elite_fraction
            ));
        }

        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            ));
        }

        if self.mutation_strength <= 0.0 {
            return Err(format!(
                "mutation_strength must be positive, got {}",
                self.mutation_strength
            ));
        }

        Ok(())
    }
}
