// Spritesheet layout and per-direction cell tables

use crate::engine::visual::{Cell, SpriteSheetConfig};

use super::direction::Direction;
use super::VisualError;

/// Body and head cells shown together for one animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimationFrame {
    pub body: Cell,
    pub head: Cell,
}

impl AnimationFrame {
    pub const fn new(body: Cell, head: Cell) -> Self {
        Self { body, head }
    }
}

/// Direction -> animation frames.
///
/// Exactly one entry per direction. West normally reuses East's cells and
/// relies on the quads being mirrored.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteCellTable {
    frames: [Vec<AnimationFrame>; 4],
}

impl SpriteCellTable {
    /// Build a table from explicit frame lists
    pub fn new(
        south: Vec<AnimationFrame>,
        north: Vec<AnimationFrame>,
        east: Vec<AnimationFrame>,
        west: Vec<AnimationFrame>,
    ) -> Self {
        Self {
            frames: [south, north, east, west],
        }
    }

    /// Build a table where West mirrors East's frames
    pub fn mirrored(
        south: Vec<AnimationFrame>,
        north: Vec<AnimationFrame>,
        east: Vec<AnimationFrame>,
    ) -> Self {
        let west = east.clone();
        Self::new(south, north, east, west)
    }

    /// Single-frame table for the standard 2x3 sheet
    pub fn standard_character() -> Self {
        Self::mirrored(
            vec![AnimationFrame::new(Cell::new(0, 0), Cell::new(1, 0))],
            vec![AnimationFrame::new(Cell::new(0, 2), Cell::new(1, 2))],
            vec![AnimationFrame::new(Cell::new(0, 1), Cell::new(1, 1))],
        )
    }

    /// All frames for a direction
    pub fn frames(&self, direction: Direction) -> &[AnimationFrame] {
        &self.frames[direction.index()]
    }

    /// Number of frames for a direction
    pub fn frame_count(&self, direction: Direction) -> usize {
        self.frames(direction).len()
    }

    /// A specific frame, if it exists
    pub fn frame(&self, direction: Direction, index: usize) -> Option<AnimationFrame> {
        self.frames(direction).get(index).copied()
    }

    /// The static (idle) frame for a direction
    pub fn idle_frame(&self, direction: Direction) -> Option<AnimationFrame> {
        self.frame(direction, 0)
    }

    /// Check that every direction has frames and every cell fits the sheet
    pub fn validate(&self, sheet: &SpriteSheetConfig) -> Result<(), VisualError> {
        for direction in Direction::ALL {
            let frames = self.frames(direction);
            if frames.is_empty() {
                return Err(VisualError::ConfigurationMissing { direction });
            }
            for frame in frames {
                for cell in [frame.body, frame.head] {
                    if !sheet.contains(cell) {
                        return Err(VisualError::CellOutOfBounds {
                            cell,
                            columns: sheet.columns,
                            rows: sheet.rows,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for SpriteCellTable {
    fn default() -> Self {
        Self::standard_character()
    }
}
