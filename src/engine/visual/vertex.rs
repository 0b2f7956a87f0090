// Vertex structure for CPU-side sprite quads

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Vertex for a textured sprite quad
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in local quad space (z for layering)
    pub position: [f32; 3],
    /// Texture coordinates (UV)
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Byte offset of `tex_coords` inside the vertex
    pub const TEX_COORDS_OFFSET: usize = std::mem::size_of::<[f32; 3]>();

    /// Create a new vertex
    pub fn new(position: Vec3, tex_coords: Vec2) -> Self {
        Self {
            position: position.to_array(),
            tex_coords: tex_coords.to_array(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    #[allow(dead_code)]
    pub fn tex_coords(&self) -> Vec2 {
        Vec2::from_array(self.tex_coords)
    }

    /// Size of one vertex in bytes (the buffer stride)
    #[allow(dead_code)]
    pub const fn stride() -> usize {
        std::mem::size_of::<Vertex>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(Vertex::stride(), 5 * std::mem::size_of::<f32>());
        assert_eq!(Vertex::TEX_COORDS_OFFSET, 12);
    }

    #[test]
    fn test_vertex_bytes() {
        let vertex = Vertex::new(Vec3::new(1.0, 2.0, 3.0), Vec2::new(0.5, 0.25));
        let bytes: &[u8] = bytemuck::bytes_of(&vertex);
        assert_eq!(bytes.len(), Vertex::stride());

        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.5, 0.25]);
    }
}
