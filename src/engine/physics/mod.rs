// Physics system using rapier2d (top-down, no gravity)

pub mod body;
mod collision;
mod world;

pub use body::presets;
pub use world::{ColliderHandle, PhysicsWorld, RigidBodyHandle};

// Re-export for internal use and future expansion
#[allow(unused_imports)]
pub use body::{BodyBuilder, ColliderBuilder2D};
#[allow(unused_imports)]
pub use collision::{CollisionEvent, CollisionGroups};
#[allow(unused_imports)]
pub use world::{to_vec2, to_vector};
