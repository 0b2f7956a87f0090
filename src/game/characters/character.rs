// Character entity and management

use glam::Vec2;
use log::{debug, info, warn};

use crate::engine::input::{Action, InputSource, NoInput};
use crate::engine::physics::{presets, ColliderHandle, PhysicsWorld, RigidBodyHandle};
use crate::engine::visual::QuadRig;

use super::animation::FacingAnimator;
use super::movement::Movement;
use super::profile::{CharacterProfile, CharacterStats};
use super::state::MotionState;
use super::weapon::{BulletSpawner, WeaponAim};
use super::VisualError;

/// Unique identifier for a character
pub type CharacterId = u32;

/// A top-down character: physics body, sprite rig, facing, movement and weapon
#[derive(Debug)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,

    // Physics
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,

    pub stats: CharacterStats,
    animator: FacingAnimator,
    rig: QuadRig,
    movement: Movement,
    weapon: WeaponAim,
}

impl Character {
    /// Validate the profile, create the physics body and build the sprite rig
    pub fn new(
        id: CharacterId,
        name: &str,
        profile: &CharacterProfile,
        physics: &mut PhysicsWorld,
        spawn: Vec2,
    ) -> Result<Self, VisualError> {
        profile.validate()?;

        let body_handle = physics.add_rigid_body(presets::character_body(spawn));
        let collider_handle =
            physics.add_collider(presets::character_collider(profile.stats.radius), body_handle);

        let mut animator = FacingAnimator::new(
            profile.animation,
            profile.cells.clone(),
            profile.head_offsets,
        );
        let mut rig = QuadRig::built(profile.rig.clone());
        animator.sync(&mut rig);

        info!("Spawned {} at ({:.1}, {:.1})", name, spawn.x, spawn.y);

        Ok(Self {
            id,
            name: name.to_string(),
            body_handle,
            collider_handle,
            stats: profile.stats,
            animator,
            rig,
            movement: Movement::new(profile.movement).with_threshold(profile.animation.walk_threshold),
            weapon: WeaponAim::new(profile.weapon, profile.weapon_offsets),
        })
    }

    /// Run one fixed tick: look-mode hotkeys, facing, movement, teleport and weapon
    pub fn update(&mut self, input: &mut dyn InputSource, physics: &mut PhysicsWorld, dt: f32) {
        self.handle_mode_hotkeys(input);

        let Some(position) = physics.translation(self.body_handle) else {
            warn!("{} has no physics body", self.name);
            return;
        };

        let axis = input.move_axis();
        let cursor = input.cursor_world();
        self.movement.set_input(axis);

        // Facing
        let look = self.movement.update_look(position, cursor, dt);
        let moving = self.movement.is_moving();
        let transition = if !moving && self.movement.should_face(false) {
            self.animator.face(look, &mut self.rig)
        } else {
            let facing = if self.movement.should_face(moving) {
                look
            } else {
                Vec2::ZERO
            };
            self.animator.drive(facing, moving, &mut self.rig)
        };
        if let Some(state) = transition {
            debug!("{} is now {} {}", self.name, state.name(), state.direction());
            self.weapon.set_direction(state.direction());
        }
        self.animator.update(dt, &mut self.rig);

        // Movement and teleport, both stopped by walls
        self.movement.tick_cooldown(dt);
        let mut desired = self.movement.step(self.stats.move_speed, dt);
        if input.consume_trigger(Action::Teleport) {
            if let Some(offset) = self
                .movement
                .try_teleport(self.stats.teleport_distance, self.stats.teleport_cooldown)
            {
                desired += offset;
            }
        }
        physics.move_character(self.body_handle, self.collider_handle, desired);

        // Weapon, relative to the bobbing visual container
        let origin = position + Vec2::new(0.0, self.rig.bob());
        self.weapon.aim(origin, cursor, dt);
        if input.consume_trigger(Action::Shoot) {
            self.weapon.shoot(origin, cursor);
        }
    }

    fn handle_mode_hotkeys(&mut self, input: &mut dyn InputSource) {
        if input.consume_trigger(Action::DirectionalMode) {
            self.movement.use_directional_movement();
        }
        if input.consume_trigger(Action::MouseLookMode) {
            self.movement.use_mouse_look_movement();
        }
        if input.consume_trigger(Action::FixedDirectionMode) {
            self.movement.use_locked_direction_movement();
        }
    }

    /// Rebuild the sprite rig and push the full facing state to it
    pub fn rebuild_visual(&mut self) {
        self.rig.build();
        self.animator.sync(&mut self.rig);
    }

    /// Drop the rig's meshes; facing updates are skipped until rebuilt
    pub fn teardown_visual(&mut self) {
        self.rig.teardown();
    }

    pub fn position(&self, physics: &PhysicsWorld) -> Option<Vec2> {
        physics.translation(self.body_handle)
    }

    pub fn motion(&self) -> MotionState {
        self.animator.motion()
    }

    pub fn rig(&self) -> &QuadRig {
        &self.rig
    }

    pub fn movement(&self) -> &Movement {
        &self.movement
    }

    pub fn weapon(&self) -> &WeaponAim {
        &self.weapon
    }
}

/// Owns all characters and the bullets they fire
#[derive(Debug)]
pub struct CharacterManager {
    characters: Vec<Character>,
    bullets: BulletSpawner,
    next_id: CharacterId,
}

impl CharacterManager {
    pub fn new(bullets: BulletSpawner) -> Self {
        Self {
            characters: Vec::new(),
            bullets,
            next_id: 0,
        }
    }

    pub fn spawn_character(
        &mut self,
        name: &str,
        profile: &CharacterProfile,
        physics: &mut PhysicsWorld,
        position: Vec2,
    ) -> Result<CharacterId, VisualError> {
        let id = self.next_id;
        let character = Character::new(id, name, profile, physics, position)?;
        self.next_id += 1;
        self.characters.push(character);
        Ok(id)
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Update every character, then spawn the bullets they fired.
    ///
    /// `controlled` receives `input`; everyone else stands still. Shots are
    /// spawned in registration order.
    pub fn update(
        &mut self,
        controlled: Option<CharacterId>,
        input: &mut dyn InputSource,
        physics: &mut PhysicsWorld,
        dt: f32,
    ) {
        for character in &mut self.characters {
            if controlled == Some(character.id) {
                character.update(input, physics, dt);
            } else {
                character.update(&mut NoInput, physics, dt);
            }
        }

        for character in &mut self.characters {
            let owner = Some(character.collider_handle);
            self.bullets
                .spawn_all(physics, character.weapon.drain_shots(), owner);
        }
    }

    /// Retire bullets after the physics step
    pub fn after_step(&mut self, physics: &mut PhysicsWorld, dt: f32) {
        self.bullets.update(physics, dt);
    }

    pub fn bullets(&self) -> &BulletSpawner {
        &self.bullets
    }

    /// Tear down or rebuild every character's rig, e.g. when the window is hidden
    pub fn set_visuals_available(&mut self, available: bool) {
        for character in &mut self.characters {
            if available {
                character.rebuild_visual();
            } else {
                character.teardown_visual();
            }
        }
    }
}
