//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Each `GameEngine` is one independent game, so many can be stepped side by side.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{GameConfig, MIN_GRID_TILES};
pub use engine::{GameEngine, StepInfo};
pub use error::GameError;
pub use state::{DeathCause, GameState, Position, Snake};
