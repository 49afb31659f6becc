//! Input systems.
//!
//! - [`update_input_state`] reads the keyboard from Raylib each frame and
//!   writes the results into [`crate::resources::input::InputState`].
//! - Pressing the debug key triggers
//!   [`SwitchDebugEvent`](crate::events::switchdebug::SwitchDebugEvent).
use bevy_ecs::prelude::*;
use raylib::ffi::KeyboardKey;

use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::{BoolState, DirectionalInput, InputState};

/// Poll Raylib for keyboard input and update the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSend<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    let is_down = |state: &BoolState| {
        rl.is_key_down(state.key_binding)
            || (state.alt_binding != KeyboardKey::KEY_NULL && rl.is_key_down(state.alt_binding))
    };

    let keys = DirectionalInput {
        up: is_down(&input.forward),
        down: is_down(&input.backward),
        left: is_down(&input.turn_left),
        right: is_down(&input.turn_right),
        space: is_down(&input.jump),
    };
    let debug_down = is_down(&input.mode_debug);

    input.apply(keys);
    input.mode_debug.set(debug_down);

    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }
}
