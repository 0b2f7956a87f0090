// Facing state owned by one character's animator

use super::direction::Direction;

/// Motion state of the facing animator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionState {
    /// Standing still, showing the static frame for the direction
    Idle(Direction),
    /// Walking, cycling through the direction's frames
    Walking(Direction),
}

impl Default for MotionState {
    fn default() -> Self {
        Self::Idle(Direction::South)
    }
}

impl MotionState {
    /// Direction the character is facing in this state
    pub fn direction(&self) -> Direction {
        match self {
            Self::Idle(direction) | Self::Walking(direction) => *direction,
        }
    }

    #[allow(dead_code)]
    pub fn is_walking(&self) -> bool {
        matches!(self, Self::Walking(_))
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle(_) => "idle",
            Self::Walking(_) => "walk",
        }
    }
}

/// Mutable facing state.
///
/// Updated at most once per tick by `FacingAnimator`; never shared between
/// characters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacingState {
    /// Direction currently shown
    pub direction: Direction,
    /// Whether the quads are currently mirrored
    pub flipped: bool,
    /// Index into the direction's frame list
    pub frame_index: usize,
    /// Time accumulated towards the next frame
    pub frame_timer: f32,
    /// Whether the walk cycle is active
    pub walking: bool,
}

impl Default for FacingState {
    fn default() -> Self {
        Self::facing(Direction::South)
    }
}

impl FacingState {
    /// Idle state facing `direction`
    pub fn facing(direction: Direction) -> Self {
        Self {
            direction,
            flipped: direction.is_flipped(),
            frame_index: 0,
            frame_timer: 0.0,
            walking: false,
        }
    }

    /// Current motion state
    pub fn motion(&self) -> MotionState {
        if self.walking {
            MotionState::Walking(self.direction)
        } else {
            MotionState::Idle(self.direction)
        }
    }

    /// Rewind the frame cycle
    pub fn reset_frame(&mut self) {
        self.frame_index = 0;
        self.frame_timer = 0.0;
    }
}
