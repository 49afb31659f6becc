//! Sound bookkeeping systems.
//!
//! - [`sync_sound_status`] feeds audio thread notifications to every robot's
//!   sounds so their cached playing/loaded state stays current.
//! - [`tick_sound_retries`] advances pending play retries.

use bevy_ecs::prelude::*;

use crate::components::sound::RobotSounds;
use crate::events::audio::AudioMessage;
use crate::resources::worldtime::WorldTime;

pub fn sync_sound_status(
    mut reader: MessageReader<AudioMessage>,
    mut sounds: Query<&mut RobotSounds>,
) {
    let messages: Vec<&AudioMessage> = reader.read().collect();
    if messages.is_empty() {
        return;
    }
    for mut robot_sounds in sounds.iter_mut() {
        for msg in &messages {
            robot_sounds.walk.on_audio_message(msg);
            robot_sounds.jump.on_audio_message(msg);
        }
    }
}

pub fn tick_sound_retries(time: Res<WorldTime>, mut sounds: Query<&mut RobotSounds>) {
    for mut robot_sounds in sounds.iter_mut() {
        robot_sounds.tick(time.delta);
    }
}
