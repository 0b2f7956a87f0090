// Directional facing animation

use glam::Vec2;
use log::{debug, info, warn};

use crate::engine::visual::SpriteTarget;

use super::direction::Direction;
use super::offsets::OffsetTable;
use super::sheet::{AnimationFrame, SpriteCellTable};
use super::state::{FacingState, MotionState};
use super::VisualError;

/// Timing and procedural motion settings for the facing animator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSettings {
    /// Walk cycle frames per second
    pub frame_rate: f32,
    /// Cycle through walk frames while moving
    pub enable_walk_animation: bool,
    /// Movement vectors longer than this count as walking
    pub walk_threshold: f32,
    /// Vertical bounce while walking
    pub bounce_height: f32,
    pub bounce_speed: f32,
    /// Vertical breathing motion while idle
    pub enable_breathing: bool,
    pub breathing_height: f32,
    pub breathing_speed: f32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            frame_rate: 10.0,
            enable_walk_animation: true,
            walk_threshold: 0.1,
            bounce_height: 0.1,
            bounce_speed: 10.0,
            enable_breathing: true,
            breathing_height: 0.02,
            breathing_speed: 2.0,
        }
    }
}

impl AnimationSettings {
    /// Duration of one walk frame in seconds
    pub fn frame_duration(&self) -> f32 {
        1.0 / self.frame_rate
    }

    pub fn validate(&self) -> Result<(), VisualError> {
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Err(VisualError::InvalidFrameRate(self.frame_rate));
        }
        Ok(())
    }
}

/// Drives a character's sprite facing.
///
/// Owns the facing state and pushes cell, flip and head offset changes to a
/// `SpriteTarget`. Every operation checks the target first: while it is
/// unavailable nothing is stored, so the same request succeeds once the
/// target comes back.
#[derive(Debug, Clone)]
pub struct FacingAnimator {
    settings: AnimationSettings,
    cells: SpriteCellTable,
    head_offsets: OffsetTable,
    state: FacingState,
    /// Set when a walk was (re)entered; the next `update` shows that frame
    /// for a full tick instead of advancing
    fresh_walk: bool,
    /// Clock for bounce/breathing motion
    elapsed: f32,
    /// Whether the current target outage has been reported
    target_missing_reported: bool,
}

impl FacingAnimator {
    pub fn new(settings: AnimationSettings, cells: SpriteCellTable, head_offsets: OffsetTable) -> Self {
        Self {
            settings,
            cells,
            head_offsets,
            state: FacingState::default(),
            fresh_walk: false,
            elapsed: 0.0,
            target_missing_reported: false,
        }
    }

    /// Animator for the standard character sheet
    pub fn standard() -> Self {
        Self::new(
            AnimationSettings::default(),
            SpriteCellTable::standard_character(),
            OffsetTable::standard_head(),
        )
    }

    #[allow(dead_code)]
    pub fn state(&self) -> &FacingState {
        &self.state
    }

    pub fn motion(&self) -> MotionState {
        self.state.motion()
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    #[allow(dead_code)]
    pub fn frame_index(&self) -> usize {
        self.state.frame_index
    }

    #[allow(dead_code)]
    pub fn is_walking(&self) -> bool {
        self.state.walking
    }

    pub fn is_flipped(&self) -> bool {
        self.state.flipped
    }

    #[allow(dead_code)]
    pub fn settings(&self) -> &AnimationSettings {
        &self.settings
    }

    #[allow(dead_code)]
    pub fn cells(&self) -> &SpriteCellTable {
        &self.cells
    }

    /// Cells for the frame currently shown
    pub fn current_frame(&self) -> Option<AnimationFrame> {
        self.cells.frame(self.state.direction, self.state.frame_index)
    }

    /// Whether a movement vector is long enough to count as walking
    pub fn is_moving(&self, movement: Vec2) -> bool {
        movement.length() > self.settings.walk_threshold
    }

    /// Push the complete current state to the target.
    ///
    /// Used on spawn and whenever a target has been replaced.
    pub fn sync(&mut self, target: &mut dyn SpriteTarget) {
        if !self.check_target(target) {
            return;
        }

        target.set_flipped(self.state.flipped);
        target.set_head_offset(self.head_offsets.get(self.state.direction));
        if let Some(frame) = self.current_frame() {
            Self::apply_frame(frame, target);
        }
    }

    /// Follow a movement vector: walk while it exceeds the threshold, face
    /// along it, and fall back to idle when it drops below. Sub-threshold
    /// movement never turns the character.
    ///
    /// Returns the new motion state when a transition happened.
    pub fn set_movement(
        &mut self,
        movement: Vec2,
        target: &mut dyn SpriteTarget,
    ) -> Option<MotionState> {
        if self.is_moving(movement) {
            self.drive(movement, true, target)
        } else {
            self.drive(Vec2::ZERO, false, target)
        }
    }

    /// Face along `facing` and walk or stand according to `moving`.
    ///
    /// The facing vector and the walking decision are separate so a character
    /// can look one way (e.g. at the cursor) while the walk cycle is driven by
    /// movement. A zero facing vector keeps the current direction.
    pub fn drive(
        &mut self,
        facing: Vec2,
        moving: bool,
        target: &mut dyn SpriteTarget,
    ) -> Option<MotionState> {
        if !self.check_target(target) {
            return None;
        }

        let before = self.state.motion();
        let direction = Direction::classify(facing, self.state.direction);

        if moving {
            if !self.state.walking || direction != self.state.direction {
                self.enter_walk(direction, target);
            }
        } else {
            if direction != self.state.direction {
                self.turn(direction, target);
            }
            if self.state.walking {
                self.stop(target);
            }
        }

        let after = self.state.motion();
        if after != before {
            debug!("Facing {} -> {} ({})", before.direction(), after.direction(), after.name());
            Some(after)
        } else {
            None
        }
    }

    /// Turn towards `look` and stand still
    pub fn face(&mut self, look: Vec2, target: &mut dyn SpriteTarget) -> Option<MotionState> {
        self.drive(look, false, target)
    }

    /// Mirror the quads. Requesting the current flip state is a no-op.
    #[allow(dead_code)]
    pub fn flip(&mut self, flipped: bool, target: &mut dyn SpriteTarget) {
        if !self.check_target(target) {
            return;
        }
        self.apply_flip(flipped, target);
    }

    /// Advance timers by `dt` seconds
    pub fn update(&mut self, dt: f32, target: &mut dyn SpriteTarget) {
        if !self.check_target(target) {
            return;
        }

        self.elapsed += dt;
        target.set_body_bob(self.body_bob());

        if !self.state.walking || !self.settings.enable_walk_animation {
            return;
        }

        if self.fresh_walk {
            self.fresh_walk = false;
            return;
        }

        let direction = self.state.direction;
        let frame_count = self.cells.frame_count(direction);
        if frame_count == 0 {
            warn!("{}", VisualError::ConfigurationMissing { direction });
            return;
        }
        if frame_count == 1 {
            return;
        }

        self.state.frame_timer += dt;
        if self.state.frame_timer >= self.settings.frame_duration() {
            self.state.frame_timer = 0.0;
            self.state.frame_index = (self.state.frame_index + 1) % frame_count;

            if let Some(frame) = self.current_frame() {
                Self::apply_frame(frame, target);
            }
        }
    }

    /// Combined per-tick entry: follow `movement`, then advance timers
    #[allow(dead_code)]
    pub fn tick(
        &mut self,
        movement: Vec2,
        dt: f32,
        target: &mut dyn SpriteTarget,
    ) -> Option<MotionState> {
        let transition = self.set_movement(movement, target);
        self.update(dt, target);
        transition
    }

    /// Vertical offset of the visual container for the current state
    pub fn body_bob(&self) -> f32 {
        let s = &self.settings;
        if self.state.walking && s.enable_walk_animation {
            (self.elapsed * s.bounce_speed).sin() * s.bounce_height
        } else if s.enable_breathing {
            (self.elapsed * s.breathing_speed).sin() * s.breathing_height
        } else {
            0.0
        }
    }

    fn check_target(&mut self, target: &dyn SpriteTarget) -> bool {
        if target.is_available() {
            if self.target_missing_reported {
                info!("Sprite target available again");
                self.target_missing_reported = false;
            }
            return true;
        }

        if !self.target_missing_reported {
            warn!("{}; facing update skipped", VisualError::MissingRenderTarget);
            self.target_missing_reported = true;
        }
        false
    }

    fn enter_walk(&mut self, direction: Direction, target: &mut dyn SpriteTarget) {
        let Some(first) = self.cells.idle_frame(direction) else {
            warn!("{}", VisualError::ConfigurationMissing { direction });
            return;
        };

        self.state.direction = direction;
        self.state.reset_frame();
        self.state.walking = true;
        self.fresh_walk = true;

        self.apply_flip(direction.is_flipped(), target);
        target.set_head_offset(self.head_offsets.get(direction));
        Self::apply_frame(first, target);
    }

    fn turn(&mut self, direction: Direction, target: &mut dyn SpriteTarget) {
        let Some(first) = self.cells.idle_frame(direction) else {
            warn!("{}", VisualError::ConfigurationMissing { direction });
            return;
        };

        self.state.direction = direction;
        self.state.reset_frame();

        self.apply_flip(direction.is_flipped(), target);
        target.set_head_offset(self.head_offsets.get(direction));
        Self::apply_frame(first, target);
    }

    fn stop(&mut self, target: &mut dyn SpriteTarget) {
        let direction = self.state.direction;
        let Some(idle) = self.cells.idle_frame(direction) else {
            warn!("{}", VisualError::ConfigurationMissing { direction });
            return;
        };

        self.state.walking = false;
        self.state.reset_frame();
        self.fresh_walk = false;
        Self::apply_frame(idle, target);
    }

    fn apply_flip(&mut self, flipped: bool, target: &mut dyn SpriteTarget) {
        if self.state.flipped == flipped {
            return;
        }
        self.state.flipped = flipped;
        target.set_flipped(flipped);
    }

    fn apply_frame(frame: AnimationFrame, target: &mut dyn SpriteTarget) {
        target.set_body_cell(frame.body);
        target.set_head_cell(frame.head);
    }
}

impl Default for FacingAnimator {
    fn default() -> Self {
        Self::standard()
    }
}
