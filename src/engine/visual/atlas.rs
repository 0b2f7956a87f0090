// Spritesheet grid: cell addressing and UV calculation

use std::fmt;

use glam::Vec2;

/// A (column, row) index into the spritesheet grid.
/// Rows are counted from the top of the texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub column: u32,
    pub row: u32,
}

impl Cell {
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Spritesheet grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSheetConfig {
    /// Number of columns in the sprite sheet
    pub columns: u32,
    /// Number of rows in the sprite sheet
    pub rows: u32,
}

impl SpriteSheetConfig {
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns: columns.max(1),
            rows: rows.max(1),
        }
    }

    /// The 2x3 character sheet: body in column 0, head in column 1,
    /// rows south / east / north
    pub fn standard_character() -> Self {
        Self::new(2, 3)
    }

    /// Whether a cell lies inside the grid
    pub fn contains(&self, cell: Cell) -> bool {
        cell.column < self.columns && cell.row < self.rows
    }

    /// Size of one cell in UV space
    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(1.0 / self.columns as f32, 1.0 / self.rows as f32)
    }

    /// UV coordinates for a cell, in quad corner order
    /// bottom-left, top-left, top-right, bottom-right.
    ///
    /// V is inverted because texture rows count down from the top.
    pub fn cell_uvs(&self, cell: Cell) -> [Vec2; 4] {
        let size = self.cell_size();
        let start_u = cell.column as f32 * size.x;
        let start_v = 1.0 - (cell.row + 1) as f32 * size.y;

        [
            Vec2::new(start_u, start_v),
            Vec2::new(start_u, start_v + size.y),
            Vec2::new(start_u + size.x, start_v + size.y),
            Vec2::new(start_u + size.x, start_v),
        ]
    }
}

impl Default for SpriteSheetConfig {
    fn default() -> Self {
        Self::standard_character()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_contains() {
        let sheet = SpriteSheetConfig::standard_character();
        assert!(sheet.contains(Cell::new(1, 2)));
        assert!(!sheet.contains(Cell::new(2, 0)));
        assert!(!sheet.contains(Cell::new(0, 3)));
    }

    #[test]
    fn test_zero_sized_grid_is_clamped() {
        let sheet = SpriteSheetConfig::new(0, 0);
        assert_eq!(sheet.columns, 1);
        assert_eq!(sheet.rows, 1);
    }

    #[test]
    fn test_cell_uvs_top_row() {
        let sheet = SpriteSheetConfig::new(2, 4);
        let uvs = sheet.cell_uvs(Cell::new(0, 0));

        // Row 0 is the top quarter of the texture
        assert_relative_eq!(uvs[0].x, 0.0);
        assert_relative_eq!(uvs[0].y, 0.75);
        assert_relative_eq!(uvs[1].y, 1.0);
        assert_relative_eq!(uvs[2].x, 0.5);
        assert_relative_eq!(uvs[2].y, 1.0);
        assert_relative_eq!(uvs[3].x, 0.5);
        assert_relative_eq!(uvs[3].y, 0.75);
    }

    #[test]
    fn test_cell_uvs_bottom_right() {
        let sheet = SpriteSheetConfig::new(2, 4);
        let uvs = sheet.cell_uvs(Cell::new(1, 3));
        assert_relative_eq!(uvs[0].x, 0.5);
        assert_relative_eq!(uvs[0].y, 0.0);
        assert_relative_eq!(uvs[2].x, 1.0);
        assert_relative_eq!(uvs[2].y, 0.25);
    }
}
