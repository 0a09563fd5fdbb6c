//! The decision-making seam between the simulation and whatever drives it

use super::error::EvaluationError;
use super::observation::Observation;
use crate::game::Direction;

/// Number of action scores a policy must return, one per direction
pub const NUM_ACTIONS: usize = 4;

/// Maps an observation to one score per action
///
/// Scores are indexed by direction ordinal: Right, Down, Left, Up.
/// Implementations must not carry state between calls within a generation.
pub trait Policy {
    fn evaluate(&self, observation: &Observation) -> Vec<f32>;
}

impl<P: Policy + ?Sized> Policy for &P {
    fn evaluate(&self, observation: &Observation) -> Vec<f32> {
        (**self).evaluate(observation)
    }
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn evaluate(&self, observation: &Observation) -> Vec<f32> {
        (**self).evaluate(observation)
    }
}

/// Adapts a closure into a policy
#[derive(Debug, Clone, Copy)]
pub struct FnPolicy<F>(pub F);

impl<F> Policy for FnPolicy<F>
where
    F: Fn(&Observation) -> Vec<f32>,
{
    fn evaluate(&self, observation: &Observation) -> Vec<f32> {
        (self.0)(observation)
    }
}

/// Pick the direction with the strictly greatest score
///
/// Ties go to the lowest index.
pub fn select_action(scores: &[f32]) -> Result<Direction, EvaluationError> {
    if scores.is_empty() {
        return Err(EvaluationError::EmptyActionVector);
    }
    if scores.len() != NUM_ACTIONS {
        return Err(EvaluationError::WrongActionCount {
            expected: NUM_ACTIONS,
            got: scores.len(),
        });
    }
    if let Some((index, &value)) = scores.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(EvaluationError::NonFiniteScore { index, value });
    }

    let mut best_idx = 0;
    let mut best_score = scores[0];
    for (idx, &score) in scores.iter().enumerate().skip(1) {
        if score > best_score {
            best_score = score;
            best_idx = idx;
        }
    }

    Direction::from_action_index(best_idx).ok_or(EvaluationError::WrongActionCount {
        expected: NUM_ACTIONS,
        got: scores.len(),
    })
}
