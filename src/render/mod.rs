//! Terminal rendering of a game state

pub mod renderer;

pub use renderer::{ReplayStatus, Renderer};
