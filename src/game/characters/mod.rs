// Character system
//
// Everything a top-down character is made of:
// - Direction classification and facing state
// - Spritesheet cell and offset tables
// - Facing animator driving the quad rig
// - Movement, look modes and teleport
// - Weapon aiming and shooting

pub mod animation;
pub mod character;
pub mod direction;
pub mod movement;
pub mod offsets;
pub mod profile;
pub mod sheet;
pub mod state;
pub mod weapon;

use thiserror::Error;

use crate::engine::visual::Cell;

// Re-export commonly used types
pub use character::CharacterManager;
pub use direction::Direction;
pub use profile::CharacterProfile;
pub use weapon::BulletSpawner;

#[allow(unused_imports)]
pub use animation::{AnimationSettings, FacingAnimator};
#[allow(unused_imports)]
pub use character::{Character, CharacterId};
#[allow(unused_imports)]
pub use movement::{LookMode, Movement, MovementMode, MovementSettings};
#[allow(unused_imports)]
pub use offsets::OffsetTable;
#[allow(unused_imports)]
pub use profile::CharacterStats;
#[allow(unused_imports)]
pub use sheet::{AnimationFrame, SpriteCellTable};
#[allow(unused_imports)]
pub use state::{FacingState, MotionState};
#[allow(unused_imports)]
pub use weapon::{ShotEvent, WeaponAim, WeaponSettings};

/// Errors raised by the character visual layer
#[derive(Debug, Error)]
pub enum VisualError {
    #[error("Sprite render target is not available")]
    MissingRenderTarget,

    #[error("Invalid direction: {0}")]
    InvalidDirectionInput(String),

    #[error("No animation frames configured for direction {direction}")]
    ConfigurationMissing { direction: Direction },

    #[error("Cell {cell} is outside the {columns}x{rows} spritesheet")]
    CellOutOfBounds { cell: Cell, columns: u32, rows: u32 },

    #[error("Invalid frame rate: {0}")]
    InvalidFrameRate(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = VisualError::ConfigurationMissing {
            direction: Direction::North,
        };
        assert_eq!(
            err.to_string(),
            "No animation frames configured for direction north"
        );

        let err = VisualError::CellOutOfBounds {
            cell: Cell::new(2, 0),
            columns: 2,
            rows: 3,
        };
        assert_eq!(err.to_string(), "Cell (2, 0) is outside the 2x3 spritesheet");
    }
}
