// Visual layer: spritesheet addressing and CPU-side quad meshes
//
// No GPU work happens here. Meshes are kept as plain vertex data that a
// renderer can upload as-is.

mod atlas;
mod camera;
mod quad;
mod rig;
mod vertex;

pub use atlas::{Cell, SpriteSheetConfig};
pub use camera::Camera;
pub use rig::{QuadRig, QuadRigConfig, SpriteTarget};

// Mesh types for whoever uploads the rig
#[allow(unused_imports)]
pub use quad::{QuadMesh, QUAD_INDICES};
#[allow(unused_imports)]
pub use vertex::Vertex;
