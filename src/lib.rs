//! Evo Snake - grid snake with neuroevolved policies
//!
//! This library provides:
//! - Core game logic (game module)
//! - Observation encoding, fitness shaping, population evaluation and replay (neuro module)
//! - TUI rendering and replay controls (render and input modules)
//! - Training statistics (metrics module)
//! - Execution modes (train, replay)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod neuro;
pub mod render;
