use glam::Vec2;
use rapier2d::control::KinematicCharacterController;
use rapier2d::prelude::*;

use super::collision::{CollisionEvent as GameCollisionEvent, CollisionEventQueue, CollisionGroups};

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

pub fn to_vector(v: Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

pub fn to_vec2(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Top-down physics world (no gravity)
pub struct PhysicsWorld {
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    collision_event_queue: CollisionEventQueue,
    character_controller: KinematicCharacterController,
    /// Colliders were added or removed since the query pipeline was built
    queries_stale: bool,
}

impl PhysicsWorld {
    /// Create a world stepping at `timestep` seconds
    pub fn new(timestep: Real) -> Self {
        let integration_parameters = IntegrationParameters {
            dt: timestep,
            ..Default::default()
        };

        Self {
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::new(),
            character_controller: KinematicCharacterController {
                // Top-down: nothing to stand on
                snap_to_ground: None,
                ..Default::default()
            },
            queries_stale: false,
        }
    }

    /// Advance the simulation by one timestep.
    /// Collision events from the previous step are discarded.
    pub fn step(&mut self) {
        self.collision_event_queue.clear();

        self.physics_pipeline.step(
            &Vector::zeros(),
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.collision_event_queue,
        );
        self.queries_stale = false;
    }

    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(&mut self, collider: Collider, parent: RigidBodyHandle) -> ColliderHandle {
        self.queries_stale = true;
        self.collider_set
            .insert_with_parent(collider, parent, &mut self.rigid_body_set)
    }

    /// Remove a rigid body and its colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.queries_stale = true;
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }

    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Current body position
    pub fn translation(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.get_rigid_body(handle)
            .map(|body| to_vec2(body.translation()))
    }

    /// Queue a kinematic body's position for the next step
    pub fn move_kinematic(&mut self, handle: RigidBodyHandle, target: Vec2) -> bool {
        match self.rigid_body_set.get_mut(handle) {
            Some(body) if body.is_kinematic() => {
                body.set_next_kinematic_translation(to_vector(target));
                true
            }
            _ => false,
        }
    }

    /// Move a kinematic character by `desired`, stopping and sliding at walls.
    ///
    /// The collider's shape is swept from the body's current position. Only
    /// walls block; other characters and bullets are ignored. Returns the
    /// position queued for the next step.
    pub fn move_character(
        &mut self,
        body: RigidBodyHandle,
        collider: ColliderHandle,
        desired: Vec2,
    ) -> Option<Vec2> {
        if self.queries_stale {
            self.query_pipeline
                .update(&self.rigid_body_set, &self.collider_set);
            self.queries_stale = false;
        }

        let rigid_body = self.rigid_body_set.get(body)?;
        let shape = self.collider_set.get(collider)?;
        if !rigid_body.is_kinematic() {
            return None;
        }

        let position = *rigid_body.position();
        let groups = InteractionGroups::new(
            shape.collision_groups().memberships,
            CollisionGroups::Wall.bits(),
        );
        let filter = QueryFilter::new()
            .exclude_rigid_body(body)
            .exclude_sensors()
            .groups(groups);

        let movement = self.character_controller.move_shape(
            self.integration_parameters.dt,
            &self.rigid_body_set,
            &self.collider_set,
            &self.query_pipeline,
            shape.shape(),
            &position,
            to_vector(desired),
            filter,
            |_| {},
        );

        let target = to_vec2(&(position.translation.vector + movement.translation));
        self.move_kinematic(body, target);
        Some(target)
    }

    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    /// Collision events from the last step
    pub fn collision_events(&self) -> Vec<GameCollisionEvent> {
        self.collision_event_queue.events()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body::presets;
    use approx::assert_relative_eq;

    #[test]
    fn test_kinematic_move_applies_on_step() {
        let mut world = PhysicsWorld::default();
        let body = world.add_rigid_body(presets::character_body(Vec2::ZERO));
        world.add_collider(presets::character_collider(0.4), body);

        assert!(world.move_kinematic(body, Vec2::new(0.5, -0.25)));
        world.step();

        let position = world.translation(body).unwrap();
        assert_relative_eq!(position.x, 0.5, epsilon = 1e-5);
        assert_relative_eq!(position.y, -0.25, epsilon = 1e-5);
    }

    #[test]
    fn test_move_kinematic_rejects_dynamic() {
        let mut world = PhysicsWorld::default();
        let bullet = world.add_rigid_body(presets::bullet_body(Vec2::ZERO, Vec2::X, 0.0));
        assert!(!world.move_kinematic(bullet, Vec2::ONE));
    }

    #[test]
    fn test_no_gravity() {
        let mut world = PhysicsWorld::default();
        let body = world.add_rigid_body(presets::bullet_body(Vec2::ZERO, Vec2::ZERO, 0.0));
        world.add_collider(presets::bullet_collider(0.1), body);

        for _ in 0..30 {
            world.step();
        }
        let position = world.translation(body).unwrap();
        assert_relative_eq!(position.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_bullet_travels_at_its_velocity() {
        let mut world = PhysicsWorld::default();
        let body = world.add_rigid_body(presets::bullet_body(Vec2::ZERO, Vec2::new(20.0, 0.0), 0.0));
        world.add_collider(presets::bullet_collider(0.1), body);

        for _ in 0..60 {
            world.step();
        }
        assert_relative_eq!(world.translation(body).unwrap().x, 20.0, epsilon = 1e-2);
    }

    #[test]
    fn test_bullet_hits_wall() {
        let mut world = PhysicsWorld::default();
        let wall = world.add_rigid_body(presets::wall_body(Vec2::new(3.0, 0.0)));
        let wall_collider = world.add_collider(presets::wall_collider(Vec2::new(1.0, 4.0)), wall);

        let bullet = world.add_rigid_body(presets::bullet_body(Vec2::ZERO, Vec2::new(20.0, 0.0), 0.0));
        let bullet_collider = world.add_collider(presets::bullet_collider(0.1), bullet);

        let mut hit = false;
        for _ in 0..30 {
            world.step();
            hit |= world
                .collision_events()
                .iter()
                .any(|e| e.started_with(bullet_collider) == Some(wall_collider));
        }
        assert!(hit);
    }

    #[test]
    fn test_remove_body() {
        let mut world = PhysicsWorld::default();
        let body = world.add_rigid_body(presets::character_body(Vec2::ZERO));
        let collider = world.add_collider(presets::character_collider(0.4), body);
        assert_eq!(world.body_count(), 1);

        world.remove_rigid_body(body);
        assert_eq!(world.body_count(), 0);
        assert!(world.translation(body).is_none());
        assert!(world.move_character(body, collider, Vec2::X).is_none());
    }

    fn spawn_character(world: &mut PhysicsWorld, position: Vec2) -> (RigidBodyHandle, ColliderHandle) {
        let body = world.add_rigid_body(presets::character_body(position));
        let collider = world.add_collider(presets::character_collider(0.4), body);
        (body, collider)
    }

    #[test]
    fn test_move_character_in_open_space() {
        let mut world = PhysicsWorld::default();
        let (body, collider) = spawn_character(&mut world, Vec2::ZERO);

        let target = world.move_character(body, collider, Vec2::new(0.5, 0.25)).unwrap();
        assert_relative_eq!(target.x, 0.5, epsilon = 1e-4);
        assert_relative_eq!(target.y, 0.25, epsilon = 1e-4);

        world.step();
        assert_relative_eq!(world.translation(body).unwrap().x, 0.5, epsilon = 1e-4);
    }

    #[test]
    fn test_move_character_stops_at_wall() {
        let mut world = PhysicsWorld::default();
        let wall = world.add_rigid_body(presets::wall_body(Vec2::new(3.0, 0.0)));
        world.add_collider(presets::wall_collider(Vec2::new(1.0, 20.0)), wall);
        let (body, collider) = spawn_character(&mut world, Vec2::ZERO);

        // Wall face at x = 2.5, character radius 0.4
        let target = world.move_character(body, collider, Vec2::new(10.0, 0.0)).unwrap();
        assert!(target.x < 2.1 + 1e-3, "went through the wall: {}", target.x);
        assert!(target.x > 1.9, "stopped short: {}", target.x);
    }

    #[test]
    fn test_move_character_slides_along_wall() {
        let mut world = PhysicsWorld::default();
        let wall = world.add_rigid_body(presets::wall_body(Vec2::new(3.0, 0.0)));
        world.add_collider(presets::wall_collider(Vec2::new(1.0, 20.0)), wall);
        let (body, collider) = spawn_character(&mut world, Vec2::new(2.0, 0.0));

        let target = world.move_character(body, collider, Vec2::new(1.0, 1.0)).unwrap();
        assert!(target.x < 2.1 + 1e-3);
        assert!(target.y > 0.5);
    }

    #[test]
    fn test_characters_do_not_block_each_other() {
        let mut world = PhysicsWorld::default();
        spawn_character(&mut world, Vec2::new(1.0, 0.0));
        let (body, collider) = spawn_character(&mut world, Vec2::ZERO);

        let target = world.move_character(body, collider, Vec2::new(2.0, 0.0)).unwrap();
        assert_relative_eq!(target.x, 2.0, epsilon = 1e-4);
    }

    #[test]
    fn test_move_character_rejects_dynamic() {
        let mut world = PhysicsWorld::default();
        let bullet = world.add_rigid_body(presets::bullet_body(Vec2::ZERO, Vec2::X, 0.0));
        let collider = world.add_collider(presets::bullet_collider(0.1), bullet);
        assert!(world.move_character(bullet, collider, Vec2::ONE).is_none());
    }
}
