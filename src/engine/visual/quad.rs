// Textured quad mesh with horizontal mirroring

use glam::{Vec2, Vec3};

use super::vertex::Vertex;

/// Triangle indices for a quad built from `QuadMesh` corners
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// A single sprite quad anchored at its bottom-left corner.
///
/// Corner order is bottom-left, top-left, top-right, bottom-right, matching
/// `SpriteSheetConfig::cell_uvs`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadMesh {
    size: Vec2,
    vertices: [Vertex; 4],
    flipped: bool,
}

impl QuadMesh {
    /// Create a quad of the given size with the given corner UVs
    pub fn new(size: Vec2, uvs: [Vec2; 4]) -> Self {
        let corners = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, size.y, 0.0),
            Vec3::new(size.x, size.y, 0.0),
            Vec3::new(size.x, 0.0, 0.0),
        ];

        let vertices = [
            Vertex::new(corners[0], uvs[0]),
            Vertex::new(corners[1], uvs[1]),
            Vertex::new(corners[2], uvs[2]),
            Vertex::new(corners[3], uvs[3]),
        ];

        Self {
            size,
            vertices,
            flipped: false,
        }
    }

    /// Replace the texture coordinates (re-texture the quad)
    pub fn set_uvs(&mut self, uvs: [Vec2; 4]) {
        for (vertex, uv) in self.vertices.iter_mut().zip(uvs) {
            vertex.tex_coords = uv.to_array();
        }
    }

    /// Mirror the quad about its local vertical center line (`x' = width - x`).
    ///
    /// Returns `true` if the geometry changed. Requesting the current state
    /// again leaves the vertices untouched.
    pub fn set_flipped(&mut self, flipped: bool) -> bool {
        if self.flipped == flipped {
            return false;
        }

        for vertex in &mut self.vertices {
            vertex.position[0] = self.size.x - vertex.position[0];
        }
        self.flipped = flipped;
        true
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    #[allow(dead_code)]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[allow(dead_code)]
    pub fn vertices(&self) -> &[Vertex; 4] {
        &self.vertices
    }

    /// Vertex data as raw bytes, ready for upload
    #[allow(dead_code)]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw bytes
    #[allow(dead_code)]
    pub fn index_bytes() -> &'static [u8] {
        bytemuck::cast_slice(&QUAD_INDICES)
    }
}
