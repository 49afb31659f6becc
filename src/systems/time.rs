//! Time update systems.
//!
//! - [`update_world_time`] writes the frame delta into
//!   [`WorldTime`](crate::resources::worldtime::WorldTime), applying
//!   `time_scale`.
//! - [`update_timers`] advances [`Timer`](crate::components::timer::Timer)
//!   components and triggers a [`TimerEvent`] when one expires.
use bevy_ecs::prelude::*;

use crate::components::timer::Timer;
use crate::events::timer::TimerEvent;
use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is expected to be the unscaled frame delta in seconds. The system
/// applies the current `time_scale` and writes both `elapsed` and `delta`.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.frame_count += 1;
}

/// Advance every one-shot [`Timer`] and fire its signal once when it expires.
///
/// Expired timers stay on the entity with `fired` set; observers usually
/// remove them while handling the event.
pub fn update_timers(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Timer)>,
    mut commands: Commands,
) {
    for (entity, mut timer) in query.iter_mut() {
        if timer.fired {
            continue;
        }
        timer.elapsed += world_time.delta;
        if timer.elapsed >= timer.duration {
            timer.fired = true;
            commands.trigger(TimerEvent {
                entity,
                signal: timer.signal.clone(),
            });
        }
    }
}
