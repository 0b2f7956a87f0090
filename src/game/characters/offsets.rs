// Per-direction positional offsets for attached parts (head, weapon)

use glam::Vec3;

use super::direction::Direction;

/// Direction -> local offset of an attached part.
///
/// Configured once per character and read-only afterwards. West is stored
/// explicitly rather than derived from East, so mirrored layouts stay under
/// the author's control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetTable {
    pub south: Vec3,
    pub north: Vec3,
    pub east: Vec3,
    pub west: Vec3,
}

impl OffsetTable {
    pub fn new(south: Vec3, north: Vec3, east: Vec3, west: Vec3) -> Self {
        Self {
            south,
            north,
            east,
            west,
        }
    }

    /// Head placement for the standard character.
    /// Negative z puts the head in front of the body.
    pub fn standard_head() -> Self {
        Self::new(
            Vec3::new(0.0, 0.8, -0.1),
            Vec3::new(0.0, 0.8, -0.1),
            Vec3::new(0.05, 0.8, -0.1),
            Vec3::new(-0.05, 0.8, -0.1),
        )
    }

    /// Weapon pivot placement for the standard character.
    /// Facing north the weapon sits behind the body.
    pub fn standard_weapon() -> Self {
        Self::new(
            Vec3::new(0.3, -0.2, -0.1),
            Vec3::new(0.3, -0.2, 0.1),
            Vec3::new(0.3, -0.2, -0.1),
            Vec3::new(-0.3, -0.2, -0.1),
        )
    }

    /// Offset for a direction
    pub fn get(&self, direction: Direction) -> Vec3 {
        match direction {
            Direction::South => self.south,
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }
}
