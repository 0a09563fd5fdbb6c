//! Reference neuroevolution optimizer
//!
//! The evaluator only needs something that hands out policies and takes back
//! fitness; [`Optimizer`] is that seam. [`Evolution`] is a small truncation
//! selection scheme over [`FeedForwardNetwork`] genomes, enough to train the
//! binary end to end.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::config::EvolutionConfig;
use super::network::FeedForwardNetwork;
use super::policy::Policy;

/// Population optimizer driven one generation at a time
pub trait Optimizer {
    type Policy: Policy;

    /// Candidates for the current generation
    fn population(&self) -> &[Self::Policy];

    /// Report fitness for `population()` in the same order and breed the next generation
    fn tell(&mut self, fitness: &[f64]);

    /// Best policy seen so far with its fitness
    fn champion(&self) -> Option<(&Self::Policy, f64)>;

    fn generation(&self) -> usize;
}

/// Truncation selection with uniform weight mutation
pub struct Evolution {
    config: EvolutionConfig,
    population: Vec<FeedForwardNetwork>,
    champion: Option<(FeedForwardNetwork, f64)>,
    generation: usize,
    rng: ChaCha8Rng,
}

impl Evolution {
    pub fn new(config: EvolutionConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let population = (0..config.population_size)
            .map(|_| FeedForwardNetwork::random(&mut rng, config.hidden_size))
            .collect();

        Self {
            config,
            population,
            champion: None,
            generation: 0,
            rng,
        }
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }
}

impl Optimizer for Evolution {
    type Policy = FeedForwardNetwork;

    fn population(&self) -> &[FeedForwardNetwork] {
        &self.population
    }

    fn tell(&mut self, fitness: &[f64]) {
        debug_assert_eq!(fitness.len(), self.population.len());

        let mut ranked: Vec<usize> = (0..self.population.len().min(fitness.len())).collect();
        ranked.sort_by(|&a, &b| fitness[b].total_cmp(&fitness[a]));

        if let Some(&best) = ranked.first() {
            let improved = self
                .champion
                .as_ref()
                .map_or(true, |(_, champion_fitness)| fitness[best] > *champion_fitness);
            if improved {
                debug!(
                    generation = self.generation,
                    fitness = fitness[best],
                    "new champion"
                );
                self.champion = Some((self.population[best].clone(), fitness[best]));
            }
        }

        let elites: Vec<FeedForwardNetwork> = ranked
            .iter()
            .take(self.config.elite_count())
            .map(|&idx| self.population[idx].clone())
            .collect();

        let mut next = elites.clone();
        while next.len() < self.config.population_size {
            let Some(parent) = elites.choose(&mut self.rng) else {
                break;
            };
            next.push(parent.offspring(
                &mut self.rng,
                self.config.mutation_rate,
                self.config.mutation_strength,
            ));
        }

        self.population = next;
        self.generation += 1;
    }

    fn champion(&self) -> Option<(&FeedForwardNetwork, f64)> {
        self.champion.as_ref().map(|(net, fitness)| (net, *fitness))
    }

    fn generation(&self) -> usize {
        self.generation
    }
}
