//! Physics stepping.
//!
//! The world advances once per frame by the scaled frame delta, capped at
//! [`MAX_STEP`] so a long stall (window drag, breakpoint) does not launch
//! bodies through the floor.

use bevy_ecs::prelude::*;

use crate::resources::physicsworld::PhysicsWorld;
use crate::resources::worldtime::WorldTime;

/// Longest step taken in one frame, in seconds.
pub const MAX_STEP: f32 = 3.0 / 60.0;

pub fn physics_step(time: Res<WorldTime>, mut physics: ResMut<PhysicsWorld>) {
    let dt = time.delta.min(MAX_STEP);
    if dt <= 0.0 {
        return;
    }
    physics.step(dt);
}
