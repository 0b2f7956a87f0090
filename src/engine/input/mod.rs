// Input handling system
//
// Keyboard and mouse input for the local player, with remappable bindings,
// buffered edge triggers and a world-space cursor.
//
// ## Architecture
//
// - `action`: Game actions and default bindings
// - `buffer`: Trigger buffering so presses are consumed exactly once
// - `player`: Player input state, implements `InputSource`
// - `config`: Binding tables and text remapping
// - `manager`: Routes winit events into the player state
//
// ## Usage
//
// ```rust
// let mut input = InputManager::default();
//
// // In the event loop
// input.process_keyboard_event(&key_event);
// input.process_cursor_moved(screen_pos, &camera);
//
// // In each fixed update
// let axis = input.player_mut().move_axis();
// if input.player_mut().consume_trigger(Action::Shoot) { /* fire */ }
//
// // Once per rendered frame
// input.update();
// ```

pub mod action;
pub mod buffer;
pub mod config;
pub mod manager;
pub mod player;

use glam::Vec2;
use thiserror::Error;

// Re-export commonly used types
pub use action::Action;
pub use config::InputConfig;
pub use manager::InputManager;
#[allow(unused_imports)]
pub use action::InputBinding;
#[allow(unused_imports)]
pub use player::PlayerInput;

/// Per-tick input consumed by a character
pub trait InputSource {
    /// Movement direction, length 0 or 1
    fn move_axis(&self) -> Vec2;

    /// Cursor position in world space, if the cursor is over the window
    fn cursor_world(&self) -> Option<Vec2>;

    /// Take a buffered edge trigger. Each press is returned once.
    fn consume_trigger(&mut self, action: Action) -> bool;
}

/// Input source for characters nobody is controlling
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn move_axis(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn cursor_world(&self) -> Option<Vec2> {
        None
    }

    fn consume_trigger(&mut self, _action: Action) -> bool {
        false
    }
}

/// Errors related to input configuration
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Unknown input: {0}")]
    UnknownBinding(String),

    #[error("Malformed binding on line {line}: {content}")]
    MalformedLine { line: usize, content: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
