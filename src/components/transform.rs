//! Visual placement of an entity in the 3D scene.
//!
//! [`VisualTransform`] is the "group" the renderer draws: a world position and
//! a yaw. The physics body leads and the transform follows, copied once per
//! frame by the robot controller. [`ModelPlacement`] positions the model
//! inside that group.

use bevy_ecs::prelude::Component;
use nalgebra::{UnitQuaternion, Vector3};

/// World position and yaw of a rendered entity.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct VisualTransform {
    pub position: Vector3<f32>,
    /// Rotation around the Y axis in radians.
    pub rotation_y: f32,
}

impl Default for VisualTransform {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation_y: 0.0,
        }
    }
}

impl VisualTransform {
    pub fn new(position: Vector3<f32>, rotation_y: f32) -> Self {
        Self {
            position,
            rotation_y,
        }
    }

    /// Orientation as a quaternion (yaw only).
    pub fn quaternion(&self) -> UnitQuaternion<f32> {
        UnitQuaternion::from_euler_angles(0.0, self.rotation_y, 0.0)
    }

    /// Unit vector the entity faces: local +Z rotated by the yaw.
    pub fn forward(&self) -> Vector3<f32> {
        self.quaternion() * Vector3::z()
    }
}

/// Scale and offset of the model relative to its [`VisualTransform`].
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct ModelPlacement {
    pub scale: f32,
    pub offset: Vector3<f32>,
}

impl ModelPlacement {
    pub fn new(scale: f32, offset: Vector3<f32>) -> Self {
        Self { scale, offset }
    }

    /// Where the model origin lands for a given group transform.
    pub fn world_position(&self, transform: &VisualTransform) -> Vector3<f32> {
        transform.position + transform.quaternion() * self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-5;

    fn vec_approx_eq(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).norm() < EPSILON
    }

    #[test]
    fn forward_without_yaw_is_positive_z() {
        let t = VisualTransform::default();
        assert!(vec_approx_eq(t.forward(), Vector3::z()));
    }

    #[test]
    fn quarter_turn_left_faces_positive_x() {
        let t = VisualTransform::new(Vector3::zeros(), FRAC_PI_2);
        assert!(vec_approx_eq(t.forward(), Vector3::x()));
    }

    #[test]
    fn model_offset_follows_group() {
        let placement = ModelPlacement::new(0.3, Vector3::new(0.0, -0.3, 0.0));
        let t = VisualTransform::new(Vector3::new(1.0, 2.0, 3.0), 1.0);
        assert!(vec_approx_eq(
            placement.world_position(&t),
            Vector3::new(1.0, 1.7, 3.0)
        ));
    }
}
