use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Replay control derived from a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Double the tick rate
    SpeedUp,
    /// Halve the tick rate
    SlowDown,
    /// Turn board drawing on or off
    ToggleDrawing,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Speed - arrow keys
            KeyCode::Right => KeyAction::SpeedUp,
            KeyCode::Left => KeyAction::SlowDown,

            // Speed - +/-
            KeyCode::Char('+') | KeyCode::Char('=') => KeyAction::SpeedUp,
            KeyCode::Char('-') => KeyAction::SlowDown,

            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::ToggleDrawing,

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
