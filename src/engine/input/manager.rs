// Input manager: routes window events into player input state

use super::action::InputBinding;
use super::config::InputConfig;
use super::player::PlayerInput;
use crate::engine::visual::Camera;
use glam::Vec2;
use log::debug;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// Coordinates bindings and the local player's input state
#[derive(Debug)]
pub struct InputManager {
    config: InputConfig,
    global: InputConfig,
    player: PlayerInput,
}

impl InputManager {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            global: InputConfig::global(),
            player: PlayerInput::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(code) = event.physical_key {
            self.handle_binding(InputBinding::key(code), event.state, event.repeat);
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.handle_binding(InputBinding::mouse(button), state, false);
    }

    /// Record the cursor position (window pixels) and its world position
    pub fn process_cursor_moved(&mut self, screen: Vec2, camera: &Camera) {
        self.player.set_cursor(screen, camera.screen_to_world(screen));
    }

    /// Recompute the cursor's world position after the camera moved
    pub fn refresh_cursor(&mut self, camera: &Camera) {
        if let Some(screen) = self.player.cursor_screen() {
            self.player.set_cursor(screen, camera.screen_to_world(screen));
        }
    }

    pub fn process_cursor_left(&mut self) {
        self.player.clear_cursor();
    }

    /// Route a physical input through global then player bindings
    pub fn handle_binding(&mut self, binding: InputBinding, state: ElementState, repeat: bool) {
        let action = self
            .global
            .get_action(binding)
            .or_else(|| self.config.get_action(binding));
        let Some(action) = action else {
            return;
        };

        match state {
            ElementState::Pressed if !repeat => {
                debug!("{} pressed", action);
                self.player.press(action);
            }
            ElementState::Pressed => {}
            ElementState::Released => self.player.release(action),
        }
    }

    /// End-of-frame bookkeeping. Call once per rendered frame.
    pub fn update(&mut self) {
        self.player.update();
    }

    pub fn player_mut(&mut self) -> &mut PlayerInput {
        &mut self.player
    }

    /// Drop all held and buffered input (e.g. on focus loss)
    pub fn reset(&mut self) {
        self.player.reset();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(InputConfig::player_defaults())
    }
}
