//! Animation playback system.
//!
//! [`advance_animations`] moves every [`AnimationMixer`] forward by the frame
//! delta and triggers an [`AnimationFinishedEvent`] for each one-shot action
//! that reached its end. Observers decide what plays next.

use bevy_ecs::prelude::*;

use crate::components::animation::AnimationMixer;
use crate::events::animation::AnimationFinishedEvent;
use crate::resources::worldtime::WorldTime;

pub fn advance_animations(
    time: Res<WorldTime>,
    mut mixers: Query<(Entity, &mut AnimationMixer)>,
    mut commands: Commands,
) {
    for (entity, mut mixer) in mixers.iter_mut() {
        for action in mixer.update(time.delta) {
            commands.trigger(AnimationFinishedEvent { entity, action });
        }
    }
}
