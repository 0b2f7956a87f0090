// Top-down movement: look modes, look smoothing and teleport

use glam::Vec2;
use log::{debug, info};

use crate::core::math::lerp_vec2;

/// Movement scheme. Every mode moves along the input axis; the mode picks
/// what the character looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementMode {
    /// Look where moving
    #[default]
    Directional,
    /// Look at the cursor
    MouseLook,
    /// Look along a fixed direction
    LockedDirection,
}

impl MovementMode {
    /// Look mode this movement mode implies
    pub fn look_mode(self) -> LookMode {
        match self {
            MovementMode::Directional => LookMode::FaceMovementDirection,
            MovementMode::MouseLook => LookMode::FaceMousePosition,
            MovementMode::LockedDirection => LookMode::FaceFixedDirection,
        }
    }
}

/// What the character looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookMode {
    /// Look where the character is going, else the last direction moved
    #[default]
    FaceMovementDirection,
    /// Look at the cursor
    FaceMousePosition,
    /// Look along `MovementSettings::fixed_look_direction`
    FaceFixedDirection,
    /// Look at `MovementSettings::look_target`
    FaceTargetObject,
}

/// Movement behaviour settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementSettings {
    pub movement_mode: MovementMode,
    pub look_mode: LookMode,
    pub smooth_looking: bool,
    pub look_smoothing_speed: f32,
    pub fixed_look_direction: Vec2,
    /// World point watched in `FaceTargetObject` mode
    pub look_target: Option<Vec2>,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            movement_mode: MovementMode::Directional,
            look_mode: LookMode::FaceMovementDirection,
            smooth_looking: true,
            look_smoothing_speed: 10.0,
            fixed_look_direction: Vec2::NEG_Y,
            look_target: None,
        }
    }
}

/// Input length above which the character counts as moving
pub const WALK_THRESHOLD: f32 = 0.1;

/// Squared look length below which the look carries no direction
const LOOK_EPSILON_SQ: f32 = 0.1;

/// Runtime movement state of one character
#[derive(Debug, Clone)]
pub struct Movement {
    settings: MovementSettings,
    /// Current input axis
    input: Vec2,
    /// Last meaningful movement direction (normalized)
    last_direction: Vec2,
    /// Smoothed look direction
    look_direction: Vec2,
    /// Seconds until the next teleport is allowed
    teleport_cooldown: f32,
    threshold: f32,
}

impl Movement {
    pub fn new(settings: MovementSettings) -> Self {
        Self {
            settings,
            input: Vec2::ZERO,
            last_direction: Vec2::NEG_Y,
            look_direction: Vec2::NEG_Y,
            teleport_cooldown: 0.0,
            threshold: WALK_THRESHOLD,
        }
    }

    /// Input length that must be exceeded to move
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn settings(&self) -> &MovementSettings {
        &self.settings
    }

    #[allow(dead_code)]
    pub fn input(&self) -> Vec2 {
        self.input
    }

    #[allow(dead_code)]
    pub fn look_direction(&self) -> Vec2 {
        self.look_direction
    }

    #[allow(dead_code)]
    pub fn last_direction(&self) -> Vec2 {
        self.last_direction
    }

    #[allow(dead_code)]
    pub fn teleport_cooldown(&self) -> f32 {
        self.teleport_cooldown
    }

    /// Switch movement mode along with the look mode it implies
    pub fn set_movement_mode(&mut self, mode: MovementMode) {
        if self.settings.movement_mode != mode {
            self.settings.movement_mode = mode;
            info!("Movement mode changed to {:?}", mode);
        }
        self.set_look_mode(mode.look_mode());
    }

    pub fn set_look_mode(&mut self, mode: LookMode) {
        if self.settings.look_mode != mode {
            self.settings.look_mode = mode;
            info!("Look mode changed to {:?}", mode);
        }
    }

    /// Move with the keys, look where moving
    pub fn use_directional_movement(&mut self) {
        self.set_movement_mode(MovementMode::Directional);
    }

    /// Move with the keys, look at the cursor
    pub fn use_mouse_look_movement(&mut self) {
        self.set_movement_mode(MovementMode::MouseLook);
    }

    /// Move with the keys, look along the fixed direction
    pub fn use_locked_direction_movement(&mut self) {
        self.set_movement_mode(MovementMode::LockedDirection);
    }

    /// Record this tick's input axis
    pub fn set_input(&mut self, axis: Vec2) {
        self.input = axis;
        if self.is_moving() {
            self.last_direction = axis.normalize();
        }
    }

    /// Whether the current input is long enough to move the character
    pub fn is_moving(&self) -> bool {
        self.input.length() > self.threshold
    }

    /// Where the character wants to look, before smoothing.
    /// Falls back to the current look direction when the mode has no answer.
    pub fn desired_look(&self, position: Vec2, cursor: Option<Vec2>) -> Vec2 {
        let toward = |point: Vec2| {
            let offset = point - position;
            if offset == Vec2::ZERO {
                None
            } else {
                Some(offset.normalize())
            }
        };

        let desired = match self.settings.look_mode {
            LookMode::FaceMovementDirection => {
                if self.is_moving() {
                    Some(self.input.normalize())
                } else {
                    Some(self.last_direction)
                }
            }
            LookMode::FaceMousePosition => cursor.and_then(toward),
            LookMode::FaceFixedDirection => {
                Some(self.settings.fixed_look_direction.normalize_or_zero())
            }
            LookMode::FaceTargetObject => self.settings.look_target.and_then(toward),
        };

        desired.unwrap_or(self.look_direction)
    }

    /// Move the look direction toward the desired one
    pub fn update_look(&mut self, position: Vec2, cursor: Option<Vec2>, dt: f32) -> Vec2 {
        let desired = self.desired_look(position, cursor);
        self.look_direction = if self.settings.smooth_looking {
            lerp_vec2(
                self.look_direction,
                desired,
                self.settings.look_smoothing_speed * dt,
            )
        } else {
            desired
        };
        self.look_direction
    }

    /// Whether the sprite should turn toward the look direction this tick.
    ///
    /// Standing still only turns the character in mouse-look mode; otherwise
    /// the facing follows the look direction while walking.
    pub fn should_face(&self, moving: bool) -> bool {
        self.look_direction.length_squared() > LOOK_EPSILON_SQ
            && (moving || self.settings.look_mode == LookMode::FaceMousePosition)
    }

    /// Displacement for one tick; zero while the input is below the threshold
    pub fn step(&self, speed: f32, dt: f32) -> Vec2 {
        if self.is_moving() {
            self.input.normalize() * speed * dt
        } else {
            Vec2::ZERO
        }
    }

    /// Count down the teleport cooldown
    pub fn tick_cooldown(&mut self, dt: f32) {
        self.teleport_cooldown = (self.teleport_cooldown - dt).max(0.0);
    }

    /// Teleport along the look direction.
    ///
    /// Returns the displacement, or `None` while cooling down or when there
    /// is no look direction.
    pub fn try_teleport(&mut self, distance: f32, cooldown: f32) -> Option<Vec2> {
        if self.teleport_cooldown > 0.0 {
            debug!("Teleport on cooldown ({:.2}s left)", self.teleport_cooldown);
            return None;
        }

        let direction = self.look_direction.normalize_or_zero();
        if direction == Vec2::ZERO {
            return None;
        }

        self.teleport_cooldown = cooldown;
        let offset = direction * distance;
        info!(
            "Teleported {} units toward ({:.2}, {:.2})",
            distance, direction.x, direction.y
        );
        Some(offset)
    }
}

impl Default for Movement {
    fn default() -> Self {
        Self::new(MovementSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn instant_look() -> Movement {
        Movement::new(MovementSettings {
            smooth_looking: false,
            ..Default::default()
        })
    }

    #[test]
    fn test_defaults_face_south() {
        let movement = Movement::default();
        assert_eq!(movement.look_direction(), Vec2::NEG_Y);
        assert_eq!(movement.settings().look_mode, LookMode::FaceMovementDirection);
    }

    #[test]
    fn test_face_movement_keeps_last_direction() {
        let mut movement = instant_look();
        movement.set_input(Vec2::X);
        assert_eq!(movement.update_look(Vec2::ZERO, None, 0.1), Vec2::X);

        movement.set_input(Vec2::ZERO);
        assert_eq!(movement.update_look(Vec2::ZERO, None, 0.1), Vec2::X);
    }

    #[test]
    fn test_face_mouse() {
        let mut movement = instant_look();
        movement.use_mouse_look_movement();

        let look = movement.update_look(Vec2::new(1.0, 1.0), Some(Vec2::new(1.0, 4.0)), 0.1);
        assert_eq!(look, Vec2::Y);
    }

    #[test]
    fn test_face_mouse_without_cursor_keeps_look() {
        let mut movement = instant_look();
        movement.use_mouse_look_movement();
        assert_eq!(movement.update_look(Vec2::ZERO, None, 0.1), Vec2::NEG_Y);
    }

    #[test]
    fn test_face_fixed_direction() {
        let mut movement = Movement::new(MovementSettings {
            smooth_looking: false,
            fixed_look_direction: Vec2::new(-2.0, 0.0),
            ..Default::default()
        });
        movement.set_look_mode(LookMode::FaceFixedDirection);
        movement.set_input(Vec2::Y);

        assert_eq!(movement.update_look(Vec2::ZERO, None, 0.1), Vec2::NEG_X);
    }

    #[test]
    fn test_face_target() {
        let mut movement = Movement::new(MovementSettings {
            smooth_looking: false,
            look_target: Some(Vec2::new(5.0, 0.0)),
            ..Default::default()
        });
        movement.set_look_mode(LookMode::FaceTargetObject);

        assert_eq!(movement.update_look(Vec2::ZERO, None, 0.1), Vec2::X);
    }

    #[test]
    fn test_smoothing_moves_partway() {
        let mut movement = Movement::default();
        movement.set_input(Vec2::X);

        let look = movement.update_look(Vec2::ZERO, None, 0.05);
        // t = 10 * 0.05
        assert_relative_eq!(look.x, 0.5);
        assert_relative_eq!(look.y, -0.5);

        for _ in 0..20 {
            movement.update_look(Vec2::ZERO, None, 0.05);
        }
        assert_relative_eq!(movement.look_direction().x, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_large_dt_does_not_overshoot() {
        let mut movement = Movement::default();
        movement.set_input(Vec2::X);
        assert_eq!(movement.update_look(Vec2::ZERO, None, 1.0), Vec2::X);
    }

    #[test]
    fn test_should_face() {
        let mut movement = instant_look();
        assert!(movement.should_face(true));
        assert!(!movement.should_face(false));

        movement.use_mouse_look_movement();
        assert!(movement.should_face(false));
    }

    #[test]
    fn test_step_normalizes_input() {
        let mut movement = Movement::default();
        movement.set_input(Vec2::new(3.0, 4.0));
        let step = movement.step(5.0, 0.1);
        assert_relative_eq!(step.x, 0.3);
        assert_relative_eq!(step.y, 0.4);

        movement.set_input(Vec2::ZERO);
        assert_eq!(movement.step(5.0, 0.1), Vec2::ZERO);
    }

    #[test]
    fn test_sub_threshold_input_does_not_move() {
        let mut movement = instant_look();
        movement.set_input(Vec2::new(0.05, 0.0));

        assert!(!movement.is_moving());
        assert_eq!(movement.step(5.0, 0.1), Vec2::ZERO);
        // Nor does it count as a direction to remember
        assert_eq!(movement.last_direction(), Vec2::NEG_Y);
        assert_eq!(movement.update_look(Vec2::ZERO, None, 0.1), Vec2::NEG_Y);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let mut movement = Movement::default().with_threshold(0.5);
        movement.set_input(Vec2::new(0.4, 0.0));
        assert!(!movement.is_moving());

        movement.set_input(Vec2::new(0.6, 0.0));
        assert!(movement.is_moving());
        assert_relative_eq!(movement.step(1.0, 1.0).x, 1.0);
    }

    #[test]
    fn test_teleport_along_look_with_cooldown() {
        let mut movement = instant_look();
        movement.set_input(Vec2::X);
        movement.update_look(Vec2::ZERO, None, 0.1);

        assert_eq!(movement.try_teleport(3.0, 1.0), Some(Vec2::new(3.0, 0.0)));
        assert!(movement.try_teleport(3.0, 1.0).is_none());

        movement.tick_cooldown(0.6);
        assert!(movement.try_teleport(3.0, 1.0).is_none());

        movement.tick_cooldown(0.4);
        assert_eq!(movement.teleport_cooldown(), 0.0);
        assert!(movement.try_teleport(3.0, 1.0).is_some());
    }

    #[test]
    fn test_presets() {
        let mut movement = Movement::default();
        movement.use_mouse_look_movement();
        assert_eq!(movement.settings().look_mode, LookMode::FaceMousePosition);
        assert_eq!(movement.settings().movement_mode, MovementMode::MouseLook);

        movement.use_locked_direction_movement();
        assert_eq!(movement.settings().look_mode, LookMode::FaceFixedDirection);
        assert_eq!(movement.settings().movement_mode, MovementMode::LockedDirection);

        movement.use_directional_movement();
        assert_eq!(movement.settings().look_mode, LookMode::FaceMovementDirection);
        assert_eq!(movement.settings().movement_mode, MovementMode::Directional);
    }

    #[test]
    fn test_locked_direction_faces_fixed_while_moving() {
        let mut movement = instant_look();
        movement.set_movement_mode(MovementMode::LockedDirection);
        movement.set_input(Vec2::X);

        assert_eq!(movement.update_look(Vec2::ZERO, None, 0.1), Vec2::NEG_Y);
        assert!(movement.is_moving());
    }
}
