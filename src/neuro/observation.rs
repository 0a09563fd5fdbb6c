//! Compact observation vector fed to policies
//!
//! Layout:
//! - 0..3: moving straight / right / left of the current heading is safe
//! - 3..7: heading is Right / Down / Left / Up
//! - 7..11: fruit is right / down / left / up of the head

use crate::game::{Direction, GameState};

/// Number of elements in an observation
pub const OBSERVATION_SIZE: usize = 11;

/// One-tick snapshot encoded for a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation([bool; OBSERVATION_SIZE]);

impl Observation {
    pub fn new(values: [bool; OBSERVATION_SIZE]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    /// Values as network inputs (1.0 / 0.0)
    pub fn as_inputs(&self) -> [f32; OBSERVATION_SIZE] {
        self.0.map(|bit| if bit { 1.0 } else { 0.0 })
    }

    pub fn safe_straight(&self) -> bool {
        self.0[0]
    }

    pub fn safe_right(&self) -> bool {
        self.0[1]
    }

    pub fn safe_left(&self) -> bool {
        self.0[2]
    }
}

/// Encode a game state into an observation
///
/// Safety bits probe a single move from the current head against the current
/// body; nothing is mutated.
pub fn create_observation(state: &GameState) -> Observation {
    let head = state.snake.head();
    let heading = state.snake.direction;
    let fruit = state.fruit;

    let safe = |direction: Direction| state.is_safe_move(head.moved_in_direction(direction));

    Observation([
        safe(heading),
        safe(heading.turned_right()),
        safe(heading.turned_left()),
        heading == Direction::Right,
        heading == Direction::Down,
        heading == Direction::Left,
        heading == Direction::Up,
        fruit.x > head.x,
        fruit.y > head.y,
        fruit.x < head.x,
        fruit.y < head.y,
    ])
}
