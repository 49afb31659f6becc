//! Animation completion events.
//!
//! [`advance_animations`](crate::systems::animation::advance_animations)
//! triggers an [`AnimationFinishedEvent`] when a one-shot action reaches its
//! last frame. The robot reacts through
//! [`animation_finished_observer`](crate::systems::robot::animation_finished_observer).

use bevy_ecs::prelude::*;

use crate::components::animation::AnimationName;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationFinishedEvent {
    pub entity: Entity,
    pub action: AnimationName,
}
