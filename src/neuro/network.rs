//! Fixed-topology feed-forward network used as the reference policy
//!
//! # Architecture
//!
//! ```text
//! Input: [11] observation bits as 0.0 / 1.0
//!   ↓ Linear(11 → hidden) + tanh
//!   ↓ Linear(hidden → 4)
//! Output: [4] action scores (Right, Down, Left, Up)
//! ```
//!
//! Weights live in one flat vector so the optimizer can mutate them directly.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::observation::{Observation, OBSERVATION_SIZE};
use super::policy::{Policy, NUM_ACTIONS};

/// Small dense network whose weights are the genome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedForwardNetwork {
    hidden_size: usize,
    /// Hidden rows of `OBSERVATION_SIZE + 1` (bias last), then output rows of `hidden_size + 1`
    weights: Vec<f32>,
}

impl FeedForwardNetwork {
    /// Number of weights (biases included) for a hidden layer of `hidden_size`
    pub fn weight_count(hidden_size: usize) -> usize {
        hidden_size * (OBSERVATION_SIZE + 1) + NUM_ACTIONS * (hidden_size + 1)
    }

    /// Network with weights drawn uniformly from [-1, 1)
    pub fn random<R: Rng + ?Sized>(rng: &mut R, hidden_size: usize) -> Self {
        let weights = (0..Self::weight_count(hidden_size))
            .map(|_| rng.gen_range(-1.0..1.0))
            .collect();
        Self {
            hidden_size,
            weights,
        }
    }

    /// Build from explicit weights; `None` if the count does not match
    pub fn from_weights(hidden_size: usize, weights: Vec<f32>) -> Option<Self> {
        (hidden_size > 0 && weights.len() == Self::weight_count(hidden_size)).then_some(Self {
            hidden_size,
            weights,
        })
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Whether the weight vector matches the declared topology
    pub fn is_well_formed(&self) -> bool {
        self.hidden_size > 0 && self.weights.len() == Self::weight_count(self.hidden_size)
    }

    /// Forward pass
    pub fn forward(&self, inputs: &[f32; OBSERVATION_SIZE]) -> [f32; NUM_ACTIONS] {
        let (hidden_weights, output_weights) =
            self.weights.split_at(self.hidden_size * (OBSERVATION_SIZE + 1));

        let hidden: Vec<f32> = hidden_weights
            .chunks_exact(OBSERVATION_SIZE + 1)
            .map(|row| {
                let (w, bias) = row.split_at(OBSERVATION_SIZE);
                let sum: f32 = w.iter().zip(inputs).map(|(w, x)| w * x).sum();
                (sum + bias[0]).tanh()
            })
            .collect();

        let mut outputs = [0.0; NUM_ACTIONS];
        for (out, row) in outputs
            .iter_mut()
            .zip(output_weights.chunks_exact(self.hidden_size + 1))
        {
            let (w, bias) = row.split_at(self.hidden_size);
            *out = w.iter().zip(&hidden).map(|(w, h)| w * h).sum::<f32>() + bias[0];
        }
        outputs
    }

    /// Perturb each weight with probability `rate` by up to ±`strength`
    pub fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R, rate: f32, strength: f32) {
        for weight in &mut self.weights {
            if rng.gen::<f32>() < rate {
                *weight += rng.gen_range(-strength..strength);
            }
        }
    }

    /// Mutated copy of this network
    pub fn offspring<R: Rng + ?Sized>(&self, rng: &mut R, rate: f32, strength: f32) -> Self {
        let mut child = self.clone();
        child.mutate(rng, rate, strength);
        child
    }
}

impl Policy for FeedForwardNetwork {
    fn evaluate(&self, observation: &Observation) -> Vec<f32> {
        self.forward(&observation.as_inputs()).to_vec()
    }
}
