//! Keyboard controls for replay

pub mod handler;

pub use handler::{InputHandler, KeyAction};
