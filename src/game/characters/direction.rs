// Cardinal facing directions and vector classification

use std::fmt;
use std::str::FromStr;

use glam::Vec2;

use super::VisualError;

/// One of the four cardinal directions a character visually presents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Facing the camera (down the screen)
    #[default]
    South,
    /// Facing away from the camera (up the screen)
    North,
    /// Facing right
    East,
    /// Facing left (East artwork mirrored)
    West,
}

impl Direction {
    /// All directions, in table order
    pub const ALL: [Direction; 4] = [
        Direction::South,
        Direction::North,
        Direction::East,
        Direction::West,
    ];

    /// Classify a vector into a direction.
    ///
    /// Returns `None` for the zero vector, which carries no directional
    /// information. The horizontal axis only wins when it is strictly larger.
    pub fn from_vector(v: Vec2) -> Option<Self> {
        if v == Vec2::ZERO {
            return None;
        }

        let direction = if v.x.abs() > v.y.abs() {
            if v.x > 0.0 {
                Self::East
            } else {
                Self::West
            }
        } else if v.y > 0.0 {
            Self::North
        } else {
            Self::South
        };

        Some(direction)
    }

    /// Classify a vector, keeping `previous` when the vector is zero
    pub fn classify(v: Vec2, previous: Direction) -> Self {
        Self::from_vector(v).unwrap_or(previous)
    }

    /// Table index for this direction (matches `ALL`)
    pub fn index(self) -> usize {
        match self {
            Self::South => 0,
            Self::North => 1,
            Self::East => 2,
            Self::West => 3,
        }
    }

    /// Whether quads facing this way are mirrored horizontally
    pub fn is_flipped(self) -> bool {
        self == Self::West
    }

    /// Lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Self::South => "south",
            Self::North => "north",
            Self::East => "east",
            Self::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = VisualError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "up" => Ok(Self::North),
            "south" | "down" => Ok(Self::South),
            "east" | "right" => Ok(Self::East),
            "west" | "left" => Ok(Self::West),
            _ => Err(VisualError::InvalidDirectionInput(s.to_string())),
        }
    }
}
