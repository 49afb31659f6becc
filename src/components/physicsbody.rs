use bevy_ecs::prelude::Component;
use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};

/// Links an entity to its body in the [`PhysicsWorld`](crate::resources::physicsworld::PhysicsWorld).
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicsBody {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
}

impl PhysicsBody {
    pub fn new(body: RigidBodyHandle, collider: ColliderHandle) -> Self {
        Self { body, collider }
    }
}
