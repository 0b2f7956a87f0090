// Player input state

use super::action::Action;
use super::buffer::InputBuffer;
use super::InputSource;
use glam::Vec2;
use std::collections::HashSet;

/// Input state for the local player.
///
/// Tracks held actions, per-frame press/release edges, buffered triggers and
/// the cursor position.
#[derive(Debug, Default)]
pub struct PlayerInput {
    pressed: HashSet<Action>,
    just_pressed: HashSet<Action>,
    just_released: HashSet<Action>,
    buffer: InputBuffer,
    /// Cursor in window pixels
    cursor_screen: Option<Vec2>,
    /// Cursor in world units
    cursor_world: Option<Vec2>,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Pressed since the last `update`
    #[allow(dead_code)]
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Released since the last `update`
    #[allow(dead_code)]
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    pub(crate) fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
            self.buffer.push(action);
        }
    }

    pub(crate) fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    pub(crate) fn set_cursor(&mut self, screen: Vec2, world: Vec2) {
        self.cursor_screen = Some(screen);
        self.cursor_world = Some(world);
    }

    pub(crate) fn clear_cursor(&mut self) {
        self.cursor_screen = None;
        self.cursor_world = None;
    }

    pub fn cursor_screen(&self) -> Option<Vec2> {
        self.cursor_screen
    }

    /// Clear per-frame edges and age the trigger buffer.
    /// Call once per rendered frame, after the fixed updates.
    pub(crate) fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.buffer.update();
    }

    /// Forget everything (e.g. on focus loss)
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
        self.buffer.clear();
    }

    /// Raw movement axis; each component is -1, 0 or 1
    pub fn raw_axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.is_pressed(Action::MoveLeft) {
            axis.x -= 1.0;
        }
        if self.is_pressed(Action::MoveRight) {
            axis.x += 1.0;
        }
        if self.is_pressed(Action::MoveDown) {
            axis.y -= 1.0;
        }
        if self.is_pressed(Action::MoveUp) {
            axis.y += 1.0;
        }
        axis
    }
}

impl InputSource for PlayerInput {
    fn move_axis(&self) -> Vec2 {
        self.raw_axis().normalize_or_zero()
    }

    fn cursor_world(&self) -> Option<Vec2> {
        self.cursor_world
    }

    fn consume_trigger(&mut self, action: Action) -> bool {
        self.buffer.consume(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_press_and_release_edges() {
        let mut input = PlayerInput::new();
        input.press(Action::MoveUp);
        assert!(input.is_pressed(Action::MoveUp));
        assert!(input.just_pressed(Action::MoveUp));

        input.update();
        assert!(!input.just_pressed(Action::MoveUp));

        input.release(Action::MoveUp);
        assert!(input.just_released(Action::MoveUp));
        assert!(!input.is_pressed(Action::MoveUp));
    }

    #[test]
    fn test_held_key_buffers_once() {
        let mut input = PlayerInput::new();
        input.press(Action::Shoot);
        input.press(Action::Shoot);

        assert!(input.consume_trigger(Action::Shoot));
        assert!(!input.consume_trigger(Action::Shoot));
    }

    #[test]
    fn test_trigger_survives_frame_without_fixed_update() {
        let mut input = PlayerInput::new();
        input.press(Action::Teleport);
        input.update();
        input.release(Action::Teleport);
        input.update();

        assert!(input.consume_trigger(Action::Teleport));
    }

    #[test]
    fn test_axis_is_normalized() {
        let mut input = PlayerInput::new();
        input.press(Action::MoveUp);
        input.press(Action::MoveRight);

        assert_eq!(input.raw_axis(), Vec2::new(1.0, 1.0));
        let axis = input.move_axis();
        assert_relative_eq!(axis.length(), 1.0);
        assert_relative_eq!(axis.x, axis.y);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut input = PlayerInput::new();
        input.press(Action::MoveLeft);
        input.press(Action::MoveRight);
        assert_eq!(input.move_axis(), Vec2::ZERO);
    }

    #[test]
    fn test_cursor() {
        let mut input = PlayerInput::new();
        assert!(input.cursor_world().is_none());

        input.set_cursor(Vec2::new(400.0, 300.0), Vec2::new(1.5, -2.0));
        assert_eq!(input.cursor_world(), Some(Vec2::new(1.5, -2.0)));
        assert_eq!(input.cursor_screen(), Some(Vec2::new(400.0, 300.0)));

        input.clear_cursor();
        assert!(input.cursor_world().is_none());
    }

    #[test]
    fn test_reset() {
        let mut input = PlayerInput::new();
        input.press(Action::Shoot);
        input.press(Action::MoveDown);
        input.reset();

        assert!(!input.is_pressed(Action::MoveDown));
        assert!(!input.consume_trigger(Action::Shoot));
    }
}
