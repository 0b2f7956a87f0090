// 2D camera for mapping between screen and world space

use glam::Vec2;

/// Orthographic 2D camera
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec2,
    /// World units per pixel is `1 / (zoom * pixels_per_unit)`
    zoom: f32,
    /// Pixels covering one world unit at zoom 1.0
    pixels_per_unit: f32,
    viewport_width: f32,
    viewport_height: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Vec2, viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            position,
            zoom: 1.0,
            pixels_per_unit: 64.0,
            viewport_width: viewport_width.max(1.0),
            viewport_height: viewport_height.max(1.0),
        }
    }

    /// Set camera position
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Set camera zoom
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.max(0.1); // Prevent zoom from being too small
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width.max(1.0);
        self.viewport_height = height.max(1.0);
    }

    /// Half extents of the visible area in world units
    fn half_extents(&self) -> Vec2 {
        let scale = self.zoom * self.pixels_per_unit;
        Vec2::new(
            (self.viewport_width / 2.0) / scale,
            (self.viewport_height / 2.0) / scale,
        )
    }

    /// Convert screen coordinates (pixels, origin top-left) to world coordinates
    pub fn screen_to_world(&self, screen_pos: Vec2) -> Vec2 {
        let normalized_x = (screen_pos.x / self.viewport_width) * 2.0 - 1.0;
        let normalized_y = 1.0 - (screen_pos.y / self.viewport_height) * 2.0;
        let half = self.half_extents();

        Vec2::new(
            self.position.x + normalized_x * half.x,
            self.position.y + normalized_y * half.y,
        )
    }

    /// Convert world coordinates to screen coordinates
    #[allow(dead_code)]
    pub fn world_to_screen(&self, world_pos: Vec2) -> Vec2 {
        let half = self.half_extents();
        let normalized_x = (world_pos.x - self.position.x) / half.x;
        let normalized_y = (world_pos.y - self.position.y) / half.y;

        Vec2::new(
            (normalized_x + 1.0) * self.viewport_width / 2.0,
            (1.0 - normalized_y) * self.viewport_height / 2.0,
        )
    }
}
