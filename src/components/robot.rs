//! The playable robot marker.
//!
//! An entity is a robot when it carries [`Robot`] together with
//! [`VisualTransform`](super::transform::VisualTransform),
//! [`PhysicsBody`](super::physicsbody::PhysicsBody),
//! [`AnimationMixer`](super::animation::AnimationMixer) and
//! [`RobotSounds`](super::sound::RobotSounds). See
//! [`crate::game::spawn_robot`].

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Robot {
    /// Score collected during the session.
    pub points: u32,
}

impl Robot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to the score, saturating at `u32::MAX`.
    pub fn add_points(&mut self, amount: u32) -> u32 {
        self.points = self.points.saturating_add(amount);
        self.points
    }
}
