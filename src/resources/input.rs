//! Per-frame keyboard input resource.
//!
//! Captures the subset of keyboard state the robot cares about and exposes it
//! to systems via the [`InputState`] resource. Defaults use the arrow keys for
//! movement with WASD as alternates, space to jump and F11 for debug.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with its keyboard bindings.
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
    /// Optional second key for the same action.
    pub alt_binding: KeyboardKey,
}

impl Default for BoolState {
    fn default() -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: KeyboardKey::KEY_NULL,
            alt_binding: KeyboardKey::KEY_NULL,
        }
    }
}

impl BoolState {
    fn bound(key_binding: KeyboardKey, alt_binding: KeyboardKey) -> Self {
        Self {
            key_binding,
            alt_binding,
            ..Self::default()
        }
    }

    /// Record this frame's state, deriving the edge flags from the last one.
    pub fn set(&mut self, active: bool) {
        self.just_pressed = active && !self.active;
        self.just_released = !active && self.active;
        self.active = active;
    }
}

/// Digital state of the five robot controls for one frame.
///
/// This is what the robot controller reads; hosts that do not use raylib
/// keyboard polling can build it directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionalInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub space: bool,
}

/// Resource capturing the per-frame keyboard state relevant to gameplay.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub forward: BoolState,
    pub backward: BoolState,
    pub turn_left: BoolState,
    pub turn_right: BoolState,
    pub jump: BoolState,
    pub mode_debug: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            forward: BoolState::bound(KeyboardKey::KEY_UP, KeyboardKey::KEY_W),
            backward: BoolState::bound(KeyboardKey::KEY_DOWN, KeyboardKey::KEY_S),
            turn_left: BoolState::bound(KeyboardKey::KEY_LEFT, KeyboardKey::KEY_A),
            turn_right: BoolState::bound(KeyboardKey::KEY_RIGHT, KeyboardKey::KEY_D),
            jump: BoolState::bound(KeyboardKey::KEY_SPACE, KeyboardKey::KEY_NULL),
            mode_debug: BoolState::bound(KeyboardKey::KEY_F11, KeyboardKey::KEY_NULL),
        }
    }
}

impl InputState {
    /// Snapshot of the movement keys, in the shape the robot controller reads.
    pub fn directional(&self) -> DirectionalInput {
        DirectionalInput {
            up: self.forward.active,
            down: self.backward.active,
            left: self.turn_left.active,
            right: self.turn_right.active,
            space: self.jump.active,
        }
    }

    /// Overwrite the active state of the movement keys from a snapshot.
    ///
    /// Handy for scripted input and tests.
    pub fn apply(&mut self, keys: DirectionalInput) {
        self.forward.set(keys.up);
        self.backward.set(keys.down);
        self.turn_left.set(keys.left);
        self.turn_right.set(keys.right);
        self.jump.set(keys.space);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolstate_default() {
        let bs = BoolState::default();
        assert!(!bs.active);
        assert!(!bs.just_pressed);
        assert!(!bs.just_released);
        assert_eq!(bs.key_binding, KeyboardKey::KEY_NULL);
        assert_eq!(bs.alt_binding, KeyboardKey::KEY_NULL);
    }

    #[test]
    fn test_inputstate_default_all_inactive() {
        let input = InputState::default();
        assert_eq!(input.directional(), DirectionalInput::default());
        assert!(!input.mode_debug.active);
    }

    #[test]
    fn test_inputstate_default_key_bindings() {
        let input = InputState::default();
        assert_eq!(input.forward.key_binding, KeyboardKey::KEY_UP);
        assert_eq!(input.forward.alt_binding, KeyboardKey::KEY_W);
        assert_eq!(input.backward.key_binding, KeyboardKey::KEY_DOWN);
        assert_eq!(input.backward.alt_binding, KeyboardKey::KEY_S);
        assert_eq!(input.turn_left.key_binding, KeyboardKey::KEY_LEFT);
        assert_eq!(input.turn_left.alt_binding, KeyboardKey::KEY_A);
        assert_eq!(input.turn_right.key_binding, KeyboardKey::KEY_RIGHT);
        assert_eq!(input.turn_right.alt_binding, KeyboardKey::KEY_D);
        assert_eq!(input.jump.key_binding, KeyboardKey::KEY_SPACE);
        assert_eq!(input.mode_debug.key_binding, KeyboardKey::KEY_F11);
    }

    #[test]
    fn test_boolstate_edges() {
        let mut bs = BoolState::default();
        bs.set(true);
        assert!(bs.active && bs.just_pressed && !bs.just_released);
        bs.set(true);
        assert!(bs.active && !bs.just_pressed);
        bs.set(false);
        assert!(!bs.active && bs.just_released);
    }

    #[test]
    fn test_apply_roundtrips_through_directional() {
        let mut input = InputState::default();
        let keys = DirectionalInput {
            up: true,
            left: true,
            ..Default::default()
        };
        input.apply(keys);
        assert_eq!(input.directional(), keys);
    }
}
