//! Per-agent fitness accounting

use super::config::FitnessConfig;
use crate::game::GameState;

/// Accumulates one agent's fitness over its lifetime
#[derive(Debug, Clone)]
pub struct FitnessTracker {
    config: FitnessConfig,
    fitness: f64,
    penalized: bool,
}

impl FitnessTracker {
    pub fn new(config: FitnessConfig) -> Self {
        Self {
            config,
            fitness: 0.0,
            penalized: false,
        }
    }

    /// Account for one tick, called after the game stepped
    ///
    /// `was_alive` is the alive flag from before the step.
    pub fn record(&mut self, was_alive: bool, state: &GameState) {
        if was_alive {
            self.fitness += self.config.survival_reward;
        }

        if state.snake.has_grown {
            self.fitness += self.config.growth_reward;
        }

        if was_alive && !state.is_alive && !self.penalized {
            self.fitness -= self.config.death_penalty;
            self.penalized = true;
        }
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Position, Snake};

    fn state() -> GameState {
        GameState::new(
            Snake::new(Position::new(10, 5), Direction::Right, 4),
            Position::new(0, 0),
            15,
            15,
        )
    }

    #[test]
    fn test_survival_reward() {
        let mut tracker = FitnessTracker::new(FitnessConfig::default());
        let state = state();

        for _ in 0..10 {
            tracker.record(true, &state);
        }

        assert!((tracker.fitness() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_growth_reward() {
        let mut tracker = FitnessTracker::new(FitnessConfig::default());
        let mut state = state();
        state.snake.has_grown = true;

        tracker.record(true, &state);

        assert!((tracker.fitness() - 2.1).abs() < 1e-9);
    }

    #[test]
    fn test_death_penalty_applied_once() {
        let mut tracker = FitnessTracker::new(FitnessConfig::default());
        let mut state = state();
        tracker.record(true, &state);

        state.is_alive = false;
        tracker.record(true, &state);
        let after_death = tracker.fitness();
        assert!((after_death - (0.2 - 1.0)).abs() < 1e-9);

        // Later ticks on a dead game change nothing
        tracker.record(false, &state);
        tracker.record(false, &state);
        assert_eq!(tracker.fitness(), after_death);
    }

    #[test]
    fn test_custom_shaping() {
        let config = FitnessConfig {
            survival_reward: 1.0,
            growth_reward: 10.0,
            death_penalty: 5.0,
        };
        let mut tracker = FitnessTracker::new(config);
        let mut state = state();
        state.snake.has_grown = true;
        tracker.record(true, &state);

        state.snake.has_grown = false;
        state.is_alive = false;
        tracker.record(true, &state);

        assert!((tracker.fitness() - 7.0).abs() < 1e-9);
    }
}
