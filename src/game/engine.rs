use super::{
    action::Direction,
    config::GameConfig,
    error::GameError,
    state::{DeathCause, GameState, Position, Snake},
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate fruit this step
    pub ate_food: bool,
    /// Set on the step the snake died
    pub death: Option<DeathCause>,
}

impl StepInfo {
    /// Whether this step ended the game
    pub fn terminated(&self) -> bool {
        self.death.is_some()
    }
}

/// One snake game: its state plus the RNG that places fruit
///
/// Every engine owns its own RNG so games never share mutable state.
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    rng: ChaCha8Rng,
}

impl GameEngine {
    /// Create a game in its starting position
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let state = Self::initial_state(&config, &mut rng)?;

        Ok(Self { config, state, rng })
    }

    /// Resume a game from an arbitrary state
    ///
    /// The state's grid dimensions override the ones in `config`.
    pub fn with_state(mut config: GameConfig, state: GameState) -> Result<Self, GameError> {
        config.grid_width = state.grid_width;
        config.grid_height = state.grid_height;
        config.validate()?;

        if state.snake.is_empty() {
            return Err(GameError::Configuration("snake body is empty".to_string()));
        }
        if let Some(cell) = state.snake.body.iter().find(|p| !state.is_in_bounds(**p)) {
            return Err(GameError::Configuration(format!(
                "snake segment ({}, {}) lies outside the grid",
                cell.x, cell.y
            )));
        }

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(Self { config, state, rng })
    }

    fn initial_state(config: &GameConfig, rng: &mut ChaCha8Rng) -> Result<GameState, GameError> {
        let snake = Snake::new(
            config.start_head,
            Direction::Right,
            config.initial_snake_length,
        );
        let mut state = GameState::new(
            snake,
            config.start_head,
            config.grid_width,
            config.grid_height,
        );
        state.fruit = spawn_fruit(rng, &state, config.max_spawn_attempts)?;
        Ok(state)
    }

    /// Read-only view of the game
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_alive(&self) -> bool {
        self.state.is_alive
    }

    /// Queue a heading for the next step
    pub fn set_direction(&mut self, direction: Direction) {
        self.state.snake.request_direction(direction);
    }

    pub fn move_right(&mut self) {
        self.set_direction(Direction::Right);
    }

    pub fn move_down(&mut self) {
        self.set_direction(Direction::Down);
    }

    pub fn move_left(&mut self) {
        self.set_direction(Direction::Left);
    }

    pub fn move_up(&mut self) {
        self.set_direction(Direction::Up);
    }

    /// Advance the game one tick
    ///
    /// A dead game is left untouched. `GameError::BoardFull` means the snake
    /// filled the grid; the game is over at that point.
    pub fn step(&mut self) -> Result<StepInfo, GameError> {
        if !self.state.is_alive {
            return Ok(StepInfo::default());
        }

        let state = &mut self.state;
        state.snake.has_grown = false;
        state.snake.resolve_direction();
        state.steps += 1;

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);

        if let Some(cause) = state.collision_at(new_head) {
            kill(state, cause);
            return Ok(StepInfo {
                ate_food: false,
                death: Some(cause),
            });
        }

        state.snake.advance(new_head);

        // A snake that starves on the fruit cell still eats it
        state.steps_since_eating += 1;
        let starved =
            state.steps_since_eating > state.starvation_limit(self.config.starvation_allowance);
        if starved {
            kill(state, DeathCause::Starvation);
        }

        let ate_food = new_head == state.fruit;
        if ate_food {
            state.snake.grow();
            state.score += 1;
            state.steps_since_eating = 0;

            match spawn_fruit(&mut self.rng, state, self.config.max_spawn_attempts) {
                Ok(fruit) => state.fruit = fruit,
                Err(err) => {
                    state.snake.is_alive = false;
                    state.is_alive = false;
                    return Err(err);
                }
            }
        }

        Ok(StepInfo {
            ate_food,
            death: starved.then_some(DeathCause::Starvation),
        })
    }
}

fn kill(state: &mut GameState, cause: DeathCause) {
    trace!(?cause, score = state.score, steps = state.steps, "snake died");
    state.snake.is_alive = false;
    state.is_alive = false;
}

/// Pick a fruit cell off the snake and away from the current fruit
///
/// Uniform rejection sampling, capped at `max_attempts`; past the cap the free
/// cells are listed and one is drawn uniformly.
fn spawn_fruit(
    rng: &mut ChaCha8Rng,
    state: &GameState,
    max_attempts: usize,
) -> Result<Position, GameError> {
    let is_free = |pos: Position| pos != state.fruit && !state.is_occupied_by_snake(pos);

    for _ in 0..max_attempts {
        let x = rng.gen_range(0..state.grid_width) as i32;
        let y = rng.gen_range(0..state.grid_height) as i32;
        let pos = Position::new(x, y);

        if is_free(pos) {
            return Ok(pos);
        }
    }

    trace!(
        attempts = max_attempts,
        "rejection sampling exhausted, scanning free cells"
    );

    let free: Vec<Position> = (0..state.grid_height as i32)
        .flat_map(|y| (0..state.grid_width as i32).map(move |x| Position::new(x, y)))
        .filter(|pos| is_free(*pos))
        .collect();

    free.choose(rng).copied().ok_or(GameError::BoardFull {
        width: state.grid_width,
        height: state.grid_height,
    })
}
