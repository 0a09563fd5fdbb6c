use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::state::Position;

/// Smallest grid edge that can host the starting snake
pub const MIN_GRID_TILES: usize = 15;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Head cell of the starting snake; the body trails to the left
    pub start_head: Position,
    /// Idle ticks granted on top of the body length before starvation
    pub starvation_allowance: usize,
    /// Rejection-sampling attempts before fruit placement scans for free cells
    pub max_spawn_attempts: usize,
    /// Seed for fruit placement; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 15,
            grid_height: 15,
            initial_snake_length: 4,
            start_head: Position::new(10, 5),
            starvation_allowance: 30,
            max_spawn_attempts: 1024,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Same configuration with a fixed fruit seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that the grid is large enough and the starting body fits inside it
    pub fn validate(&self) -> Result<(), GameError> {
        if self.grid_width < MIN_GRID_TILES || self.grid_height < MIN_GRID_TILES {
            return Err(GameError::Configuration(format!(
                "grid must be at least {MIN_GRID_TILES}x{MIN_GRID_TILES}, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }

        if self.initial_snake_length == 0 {
            return Err(GameError::Configuration(
                "initial_snake_length must be at least 1".to_string(),
            ));
        }

        let head = self.start_head;
        let too_long = || {
            GameError::Configuration(format!(
                "initial_snake_length {} is too long",
                self.initial_snake_length
            ))
        };
        let length = i32::try_from(self.initial_snake_length).map_err(|_| too_long())?;
        let tail_x = head.x.checked_sub(length - 1).ok_or_else(too_long)?;
        if tail_x < 0
            || head.x >= self.grid_width as i32
            || head.y < 0
            || head.y >= self.grid_height as i32
        {
            return Err(GameError::Configuration(format!(
                "starting snake at ({}, {}) with length {} does not fit a {}x{} grid",
                head.x, head.y, self.initial_snake_length, self.grid_width, self.grid_height
            )));
        }

        if self.max_spawn_attempts == 0 {
            return Err(GameError::Configuration(
                "max_spawn_attempts must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 15);
        assert_eq!(config.initial_snake_length, 4);
        assert_eq!(config.start_head, Position::new(10, 5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(20, 30).with_seed(7);
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 30);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_undersized_grid_rejected() {
        let err = GameConfig::new(14, 15).validate().unwrap_err();
        assert!(matches!(err, GameError::Configuration(_)));

        assert!(GameConfig::new(15, 10).validate().is_err());
    }

    #[test]
    fn test_start_body_must_fit() {
        let mut config = GameConfig::default();
        config.start_head = Position::new(2, 5);
        assert!(config.validate().is_err());

        config.start_head = Position::new(3, 5);
        assert!(config.validate().is_ok());

        config.start_head = Position::new(10, 15);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_huge_snake_length_rejected() {
        let mut config = GameConfig::default();
        config.initial_snake_length = i32::MAX as usize + 1;
        assert!(matches!(config.validate(), Err(GameError::Configuration(_))));

        config.initial_snake_length = usize::MAX;
        assert!(matches!(config.validate(), Err(GameError::Configuration(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"grid_width": 20}"#).unwrap();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 15);
        assert_eq!(config.starvation_allowance, 30);
    }
}
