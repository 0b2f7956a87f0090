use super::collision::CollisionGroups;
use glam::Vec2;
use rapier2d::prelude::*;

/// Builder for rigid bodies in a top-down (zero gravity) world
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    linvel: Vector<Real>,
    ccd: bool,
    can_sleep: bool,
    lock_rotation: bool,
}

impl BodyBuilder {
    fn with_type(body_type: RigidBodyType) -> Self {
        Self {
            body_type,
            position: Isometry::identity(),
            linvel: Vector::zeros(),
            ccd: false,
            can_sleep: true,
            lock_rotation: false,
        }
    }

    /// Body moved by forces and velocity
    pub fn new_dynamic() -> Self {
        Self::with_type(RigidBodyType::Dynamic)
    }

    /// Body moved by setting its next position each step
    pub fn new_kinematic_position_based() -> Self {
        Self::with_type(RigidBodyType::KinematicPositionBased).can_sleep(false)
    }

    /// Immovable body
    pub fn new_fixed() -> Self {
        Self::with_type(RigidBodyType::Fixed)
    }

    pub fn position(mut self, position: Vec2) -> Self {
        self.position = Isometry::translation(position.x, position.y);
        self
    }

    /// Position and rotation (radians)
    pub fn position_rotation(mut self, position: Vec2, angle: Real) -> Self {
        self.position = Isometry::new(vector![position.x, position.y], angle);
        self
    }

    pub fn linvel(mut self, velocity: Vec2) -> Self {
        self.linvel = vector![velocity.x, velocity.y];
        self
    }

    /// Continuous collision detection for fast movers
    pub fn ccd(mut self, enabled: bool) -> Self {
        self.ccd = enabled;
        self
    }

    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    pub fn lock_rotation(mut self) -> Self {
        self.lock_rotation = true;
        self
    }

    pub fn build(self) -> RigidBody {
        let mut builder = RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .linvel(self.linvel)
            .gravity_scale(0.0)
            .ccd_enabled(self.ccd)
            .can_sleep(self.can_sleep);

        if self.lock_rotation {
            builder = builder.lock_rotations();
        }

        builder.build()
    }
}

/// Builder for colliders with the arena's collision layers
pub struct ColliderBuilder2D {
    shape: SharedShape,
    collision_groups: CollisionGroups,
    density: Real,
}

impl ColliderBuilder2D {
    fn with_shape(shape: SharedShape) -> Self {
        Self {
            shape,
            collision_groups: CollisionGroups::Wall,
            density: 1.0,
        }
    }

    pub fn box_shape(half_extents: Vec2) -> Self {
        Self::with_shape(SharedShape::cuboid(half_extents.x, half_extents.y))
    }

    pub fn circle(radius: Real) -> Self {
        Self::with_shape(SharedShape::ball(radius))
    }

    pub fn collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    pub fn density(mut self, density: Real) -> Self {
        self.density = density;
        self
    }

    pub fn build(self) -> Collider {
        // Kinematic vs fixed pairs only report events with this flag set
        let active_types = ActiveCollisionTypes::default()
            | ActiveCollisionTypes::KINEMATIC_FIXED
            | ActiveCollisionTypes::KINEMATIC_KINEMATIC;

        ColliderBuilder::new(self.shape)
            .collision_groups(self.collision_groups.to_interaction_groups())
            .friction(0.0)
            .density(self.density)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .active_collision_types(active_types)
            .build()
    }
}

/// Common body configurations
pub mod presets {
    use super::*;

    /// Top-down character: kinematic, moved by position, never rotates
    pub fn character_body(position: Vec2) -> RigidBody {
        BodyBuilder::new_kinematic_position_based()
            .position(position)
            .lock_rotation()
            .build()
    }

    pub fn character_collider(radius: Real) -> Collider {
        ColliderBuilder2D::circle(radius)
            .collision_groups(CollisionGroups::Player)
            .build()
    }

    pub fn wall_body(position: Vec2) -> RigidBody {
        BodyBuilder::new_fixed().position(position).build()
    }

    pub fn wall_collider(size: Vec2) -> Collider {
        ColliderBuilder2D::box_shape(size / 2.0)
            .collision_groups(CollisionGroups::Wall)
            .build()
    }

    /// Bullet: dynamic, CCD, rotated to `angle` (radians)
    pub fn bullet_body(position: Vec2, velocity: Vec2, angle: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position_rotation(position, angle)
            .linvel(velocity)
            .ccd(true)
            .can_sleep(false)
            .build()
    }

    pub fn bullet_collider(radius: Real) -> Collider {
        ColliderBuilder2D::circle(radius)
            .collision_groups(CollisionGroups::Projectile)
            .density(0.1)
            .build()
    }
}
