use thiserror::Error;

/// Errors raised by the grid simulation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The configuration cannot host a game
    #[error("invalid game configuration: {0}")]
    Configuration(String),

    /// No free cell is left for the fruit
    #[error("board is full: no free cell for fruit on a {width}x{height} grid")]
    BoardFull { width: usize, height: usize },
}
