use thiserror::Error;

use crate::game::GameError;

/// Why an agent was dropped from a generation early
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("policy returned an empty action vector")]
    EmptyActionVector,

    #[error("policy returned {got} action scores, expected {expected}")]
    WrongActionCount { expected: usize, got: usize },

    #[error("policy returned non-finite score {value} at index {index}")]
    NonFiniteScore { index: usize, value: f32 },

    #[error(transparent)]
    Game(#[from] GameError),
}
