// Weapon aiming, shot events and bullets

use std::collections::VecDeque;

use glam::{Vec2, Vec3};
use log::{debug, warn};

use crate::core::math::{angle_degrees, lerp_angle_degrees};
use crate::engine::physics::{presets, ColliderHandle, PhysicsWorld, RigidBodyHandle};

use super::direction::Direction;
use super::offsets::OffsetTable;

/// Weapon and bullet settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponSettings {
    pub smooth_aiming: bool,
    /// Angle interpolation speed (per second)
    pub aim_smoothing: f32,
    /// Mirror the weapon vertically when it points left so it is never upside down
    pub flip_when_aiming_left: bool,
    /// Distance from the pivot to the muzzle
    pub gun_length: f32,
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    /// Seconds before an unobstructed bullet is removed
    pub bullet_lifetime: f32,
}

impl Default for WeaponSettings {
    fn default() -> Self {
        Self {
            smooth_aiming: true,
            aim_smoothing: 10.0,
            flip_when_aiming_left: true,
            gun_length: 1.0,
            bullet_speed: 20.0,
            bullet_radius: 0.1,
            bullet_lifetime: 2.0,
        }
    }
}

/// A shot fired this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotEvent {
    /// Muzzle position in world space
    pub origin: Vec2,
    /// Point the shot was aimed at
    pub target: Vec2,
}

impl ShotEvent {
    /// Unit travel direction, if origin and target differ
    pub fn direction(&self) -> Option<Vec2> {
        let offset = self.target - self.origin;
        (offset != Vec2::ZERO).then(|| offset.normalize())
    }
}

/// Weapon pivot placement and aim rotation for one character
#[derive(Debug, Clone)]
pub struct WeaponAim {
    settings: WeaponSettings,
    offsets: OffsetTable,
    direction: Direction,
    /// Current barrel angle in degrees
    angle: f32,
    target_angle: f32,
    flipped: bool,
    shots: VecDeque<ShotEvent>,
}

impl WeaponAim {
    pub fn new(settings: WeaponSettings, offsets: OffsetTable) -> Self {
        Self {
            settings,
            offsets,
            direction: Direction::South,
            angle: 0.0,
            target_angle: 0.0,
            flipped: false,
            shots: VecDeque::new(),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Local pivot offset for the current aim direction
    pub fn pivot_offset(&self) -> Vec3 {
        self.offsets.get(self.direction)
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[allow(dead_code)]
    pub fn target_angle(&self) -> f32 {
        self.target_angle
    }

    /// Whether the weapon is mirrored vertically
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    #[allow(dead_code)]
    pub fn settings(&self) -> &WeaponSettings {
        &self.settings
    }

    /// Pivot position in world space for a container at `origin`
    pub fn pivot(&self, origin: Vec2) -> Vec2 {
        origin + self.pivot_offset().truncate()
    }

    /// Unit vector along the barrel
    pub fn barrel(&self) -> Vec2 {
        Vec2::from_angle(self.angle.to_radians())
    }

    /// Muzzle position in world space
    pub fn gun_end(&self, origin: Vec2) -> Vec2 {
        self.pivot(origin) + self.barrel() * self.settings.gun_length
    }

    /// Snap the pivot to a direction's offset without aiming
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Aim from a container at `origin` toward `cursor`
    pub fn aim(&mut self, origin: Vec2, cursor: Option<Vec2>, dt: f32) {
        let Some(cursor) = cursor else {
            return;
        };

        let aim = cursor - self.pivot(origin);
        if aim.length() <= 0.01 {
            return;
        }

        let angle = angle_degrees(aim);
        self.target_angle = angle;
        self.direction = Direction::classify(aim, self.direction);

        if self.settings.flip_when_aiming_left {
            self.flipped = !(-90.0..=90.0).contains(&angle);
        }

        self.angle = if self.settings.smooth_aiming {
            lerp_angle_degrees(self.angle, angle, dt * self.settings.aim_smoothing)
        } else {
            angle
        };
    }

    /// Fire toward `cursor`, or straight along the barrel without one
    pub fn shoot(&mut self, origin: Vec2, cursor: Option<Vec2>) -> ShotEvent {
        let muzzle = self.gun_end(origin);
        let target = cursor.unwrap_or(muzzle + self.barrel());
        let shot = ShotEvent {
            origin: muzzle,
            target,
        };

        debug!(
            "Shot fired from ({:.2}, {:.2}) towards ({:.2}, {:.2})",
            muzzle.x, muzzle.y, target.x, target.y
        );
        self.shots.push_back(shot);
        shot
    }

    /// Take every shot fired since the last drain, oldest first
    pub fn drain_shots(&mut self) -> impl Iterator<Item = ShotEvent> + '_ {
        self.shots.drain(..)
    }
}

#[derive(Debug, Clone, Copy)]
struct Bullet {
    body: RigidBodyHandle,
    collider: ColliderHandle,
    /// Collider of the character that fired it
    owner: Option<ColliderHandle>,
    age: f32,
}

/// Turns shot events into physics bullets and retires them
#[derive(Debug)]
pub struct BulletSpawner {
    speed: f32,
    radius: f32,
    lifetime: f32,
    bullets: Vec<Bullet>,
}

impl BulletSpawner {
    pub fn new(settings: &WeaponSettings) -> Self {
        Self {
            speed: settings.bullet_speed,
            radius: settings.bullet_radius,
            lifetime: settings.bullet_lifetime,
            bullets: Vec::new(),
        }
    }

    /// Spawn one bullet for a shot. Returns its body handle.
    pub fn spawn(
        &mut self,
        physics: &mut PhysicsWorld,
        shot: ShotEvent,
        owner: Option<ColliderHandle>,
    ) -> Option<RigidBodyHandle> {
        let Some(direction) = shot.direction() else {
            warn!("Shot has no direction, bullet not spawned");
            return None;
        };

        let velocity = direction * self.speed;
        let angle = direction.y.atan2(direction.x);
        let body = physics.add_rigid_body(presets::bullet_body(shot.origin, velocity, angle));
        let collider = physics.add_collider(presets::bullet_collider(self.radius), body);

        self.bullets.push(Bullet {
            body,
            collider,
            owner,
            age: 0.0,
        });
        debug!(
            "Bullet spawned at ({:.2}, {:.2}) angle {:.1}",
            shot.origin.x,
            shot.origin.y,
            angle.to_degrees()
        );
        Some(body)
    }

    /// Spawn bullets for a batch of shots, in order
    pub fn spawn_all(
        &mut self,
        physics: &mut PhysicsWorld,
        shots: impl IntoIterator<Item = ShotEvent>,
        owner: Option<ColliderHandle>,
    ) -> usize {
        shots
            .into_iter()
            .filter_map(|shot| self.spawn(physics, shot, owner))
            .count()
    }

    /// Age bullets and remove those that hit something or expired.
    /// Call after the physics step.
    pub fn update(&mut self, physics: &mut PhysicsWorld, dt: f32) {
        let events = physics.collision_events();
        let lifetime = self.lifetime;

        self.bullets.retain_mut(|bullet| {
            bullet.age += dt;

            let hit = events.iter().any(|event| {
                event
                    .started_with(bullet.collider)
                    .is_some_and(|other| Some(other) != bullet.owner)
            });

            if hit || bullet.age >= lifetime {
                physics.remove_rigid_body(bullet.body);
                false
            } else {
                true
            }
        });
    }

    pub fn count(&self) -> usize {
        self.bullets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn instant_aim() -> WeaponAim {
        WeaponAim::new(
            WeaponSettings {
                smooth_aiming: false,
                ..Default::default()
            },
            OffsetTable::standard_weapon(),
        )
    }

    #[test]
    fn test_pivot_follows_aim_direction() {
        let mut weapon = instant_aim();
        let offsets = OffsetTable::standard_weapon();

        weapon.aim(Vec2::ZERO, Some(Vec2::new(10.0, 0.0)), 0.016);
        assert_eq!(weapon.direction(), Direction::East);
        assert_eq!(weapon.pivot_offset(), offsets.east);

        weapon.aim(Vec2::ZERO, Some(Vec2::new(0.0, 10.0)), 0.016);
        assert_eq!(weapon.direction(), Direction::North);
        assert_eq!(weapon.pivot_offset(), offsets.north);

        weapon.aim(Vec2::ZERO, Some(Vec2::new(-10.0, 1.0)), 0.016);
        assert_eq!(weapon.pivot_offset(), offsets.west);
    }

    #[test]
    fn test_flip_beyond_ninety_degrees() {
        let mut weapon = instant_aim();

        weapon.aim(Vec2::ZERO, Some(Vec2::new(-10.0, 5.0)), 0.016);
        assert!(weapon.is_flipped());
        assert!(weapon.angle() > 90.0);

        weapon.aim(Vec2::ZERO, Some(Vec2::new(10.0, 5.0)), 0.016);
        assert!(!weapon.is_flipped());
    }

    #[test]
    fn test_flip_can_be_disabled() {
        let mut weapon = WeaponAim::new(
            WeaponSettings {
                flip_when_aiming_left: false,
                ..Default::default()
            },
            OffsetTable::standard_weapon(),
        );
        weapon.aim(Vec2::ZERO, Some(Vec2::new(-10.0, 0.0)), 0.016);
        assert!(!weapon.is_flipped());
    }

    #[test]
    fn test_no_cursor_keeps_aim() {
        let mut weapon = instant_aim();
        weapon.aim(Vec2::ZERO, Some(Vec2::new(0.3, 5.0)), 0.016);
        weapon.aim(Vec2::ZERO, None, 0.016);
        assert_relative_eq!(weapon.angle(), 90.0);
    }

    #[test]
    fn test_smoothing_takes_shortest_arc() {
        let mut weapon = WeaponAim::new(WeaponSettings::default(), OffsetTable::new(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO, Vec3::ZERO));
        // From 0 toward 180 - 20 = 160 degrees: half of the way at t = 0.5
        weapon.aim(Vec2::ZERO, Some(Vec2::from_angle(160f32.to_radians())), 0.05);
        assert_relative_eq!(weapon.angle(), 80.0, epsilon = 1e-3);
        assert_relative_eq!(weapon.target_angle(), 160.0, epsilon = 1e-3);
    }

    #[test]
    fn test_gun_end_one_unit_along_barrel() {
        let mut weapon = instant_aim();
        weapon.aim(Vec2::ZERO, Some(Vec2::new(0.3, 10.0)), 0.016);

        let end = weapon.gun_end(Vec2::new(1.0, 1.0));
        // North pivot (0.3, -0.2) plus one unit up
        assert_relative_eq!(end.x, 1.3, epsilon = 1e-5);
        assert_relative_eq!(end.y, 1.8, epsilon = 1e-5);
    }

    #[test]
    fn test_shoot_queues_one_event() {
        let mut weapon = instant_aim();
        weapon.aim(Vec2::ZERO, Some(Vec2::new(10.0, -0.2)), 0.016);

        let shot = weapon.shoot(Vec2::ZERO, Some(Vec2::new(10.0, -0.2)));
        assert_relative_eq!(shot.origin.x, 1.3, epsilon = 1e-5);

        let drained: Vec<_> = weapon.drain_shots().collect();
        assert_eq!(drained, vec![shot]);
        assert_eq!(weapon.drain_shots().count(), 0);
    }

    #[test]
    fn test_shot_without_cursor_fires_along_barrel() {
        let mut weapon = instant_aim();
        let shot = weapon.shoot(Vec2::ZERO, None);
        let direction = shot.direction().unwrap();
        assert_relative_eq!(direction.x, 1.0);
    }

    #[test]
    fn test_spawner_creates_bullet_with_velocity() {
        let mut physics = PhysicsWorld::default();
        let mut spawner = BulletSpawner::new(&WeaponSettings::default());

        let shot = ShotEvent {
            origin: Vec2::ZERO,
            target: Vec2::new(0.0, 5.0),
        };
        let body = spawner.spawn(&mut physics, shot, None).unwrap();

        let rigid_body = physics.get_rigid_body(body).unwrap();
        assert_relative_eq!(rigid_body.linvel().y, 20.0);
        assert_relative_eq!(rigid_body.rotation().angle(), std::f32::consts::FRAC_PI_2, epsilon = 1e-5);
        assert_eq!(spawner.count(), 1);
    }

    #[test]
    fn test_degenerate_shot_skipped() {
        let mut physics = PhysicsWorld::default();
        let mut spawner = BulletSpawner::new(&WeaponSettings::default());
        let shot = ShotEvent {
            origin: Vec2::ONE,
            target: Vec2::ONE,
        };
        assert!(spawner.spawn(&mut physics, shot, None).is_none());
        assert_eq!(physics.body_count(), 0);
    }

    #[test]
    fn test_bullets_expire() {
        let mut physics = PhysicsWorld::default();
        let mut spawner = BulletSpawner::new(&WeaponSettings::default());
        let shots = [
            ShotEvent {
                origin: Vec2::ZERO,
                target: Vec2::X,
            },
            ShotEvent {
                origin: Vec2::ZERO,
                target: Vec2::NEG_X,
            },
        ];
        assert_eq!(spawner.spawn_all(&mut physics, shots, None), 2);

        for _ in 0..10 {
            physics.step();
            spawner.update(&mut physics, 0.15);
        }
        assert_eq!(spawner.count(), 2);

        for _ in 0..5 {
            physics.step();
            spawner.update(&mut physics, 0.15);
        }
        assert_eq!(spawner.count(), 0);
        assert_eq!(physics.body_count(), 0);
    }

    #[test]
    fn test_bullet_removed_on_wall_hit() {
        let mut physics = PhysicsWorld::default();
        let wall = physics.add_rigid_body(presets::wall_body(Vec2::new(3.0, 0.0)));
        physics.add_collider(presets::wall_collider(Vec2::new(1.0, 4.0)), wall);

        let mut spawner = BulletSpawner::new(&WeaponSettings::default());
        spawner.spawn(
            &mut physics,
            ShotEvent {
                origin: Vec2::ZERO,
                target: Vec2::new(5.0, 0.0),
            },
            None,
        );

        for _ in 0..30 {
            physics.step();
            spawner.update(&mut physics, 1.0 / 60.0);
        }
        assert_eq!(spawner.count(), 0);
        assert_eq!(physics.body_count(), 1);
    }
}
