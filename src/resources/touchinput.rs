//! Touch joystick state.
//!
//! Mobile hosts write the virtual joystick into [`TouchInput`] each frame.
//! The robot controller reads it alongside the keyboard; nothing reaches for
//! global state.

use bevy_ecs::prelude::Resource;
use nalgebra::Vector2;

/// Virtual joystick reading.
///
/// `direction` is in screen space: `x` maps to world X and `y` to world Z.
/// `intensity` is the stick deflection in `0.0..=1.0`. Input is ignored until
/// `enabled` is set (the host flips it once the player has interacted and the
/// immersive session is presenting).
#[derive(Resource, Debug, Clone, Copy)]
pub struct TouchInput {
    pub enabled: bool,
    pub direction: Vector2<f32>,
    pub intensity: f32,
}

impl Default for TouchInput {
    fn default() -> Self {
        Self {
            enabled: false,
            direction: Vector2::zeros(),
            intensity: 0.0,
        }
    }
}

impl TouchInput {
    /// True when the joystick should drive the robot this frame.
    pub fn is_active(&self) -> bool {
        self.enabled && self.intensity > 0.0 && self.direction.norm_squared() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_inactive() {
        assert!(!TouchInput::default().is_active());
    }

    #[test]
    fn needs_enabled_intensity_and_direction() {
        let mut touch = TouchInput {
            enabled: false,
            direction: Vector2::new(1.0, 0.0),
            intensity: 0.5,
        };
        assert!(!touch.is_active());
        touch.enabled = true;
        assert!(touch.is_active());
        touch.intensity = 0.0;
        assert!(!touch.is_active());
        touch.intensity = 1.0;
        touch.direction = Vector2::zeros();
        assert!(!touch.is_active());
    }
}
