use rapier2d::prelude::*;
use std::sync::Mutex;

/// Collision layers for the top-down arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Characters
    Player = 0b0001,

    /// Bullets
    Projectile = 0b0010,

    /// Static walls and obstacles
    Wall = 0b0100,

    /// Trigger zones; detect but never block
    Sensor = 0b1000,
}

impl CollisionGroups {
    pub fn bits(self) -> Group {
        Group::from_bits_truncate(self as u32)
    }

    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        use CollisionGroups::*;

        let filter = match self {
            // Characters pass through each other
            Player => Wall.bits() | Projectile.bits() | Sensor.bits(),
            // Bullets never hit bullets
            Projectile => Player.bits() | Wall.bits(),
            Wall => Player.bits() | Projectile.bits(),
            Sensor => Player.bits(),
        };

        InteractionGroups::new(self.bits(), filter)
    }
}

/// Collision notification recorded during a physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
}

impl CollisionEvent {
    /// The other collider if `handle` took part in a started contact
    pub fn started_with(&self, handle: ColliderHandle) -> Option<ColliderHandle> {
        match *self {
            CollisionEvent::Started {
                collider1,
                collider2,
            } if collider1 == handle => Some(collider2),
            CollisionEvent::Started {
                collider1,
                collider2,
            } if collider2 == handle => Some(collider1),
            _ => None,
        }
    }
}

/// Collects rapier's collision callbacks.
/// rapier hands the handler out by shared reference, hence the mutex.
#[derive(Debug, Default)]
pub struct CollisionEventQueue {
    events: Mutex<Vec<CollisionEvent>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::with_capacity(32)),
        }
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Events recorded since the last `clear`
    pub fn events(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        let event = match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, _) => CollisionEvent::Started {
                collider1: h1,
                collider2: h2,
            },
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, _) => CollisionEvent::Stopped {
                collider1: h1,
                collider2: h2,
            },
        };
        self.push(event);
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}
