//! 3D rendering with Raylib.
//!
//! [`render_system`] poses the robot model from its dominant animation
//! action, draws the ground, the robot and a follow camera view, then the
//! HUD. While [`DebugMode`] is present it adds the physics overlay.

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::animation::AnimationMixer;
use crate::components::physicsbody::PhysicsBody;
use crate::components::robot::Robot;
use crate::components::transform::{ModelPlacement, VisualTransform};
use crate::resources::animationstore::ANIMATION_FPS;
use crate::resources::debugmode::DebugMode;
use crate::resources::modelstore::ModelStore;
use crate::resources::physicsworld::PhysicsWorld;
use crate::resources::robotconfig::RobotConfig;

/// Camera distance behind the robot.
const CAMERA_DISTANCE: f32 = 6.0;
const CAMERA_HEIGHT: f32 = 3.0;
const GROUND_SIZE: f32 = 40.0;

fn to_rl(v: &nalgebra::Vector3<f32>) -> Vector3 {
    Vector3::new(v.x, v.y, v.z)
}

fn follow_camera(transform: Option<&VisualTransform>) -> Camera3D {
    let (target, forward) = match transform {
        Some(t) => (t.position, t.forward()),
        None => (nalgebra::Vector3::zeros(), nalgebra::Vector3::z()),
    };
    let eye = target - forward * CAMERA_DISTANCE + nalgebra::Vector3::y() * CAMERA_HEIGHT;
    Camera3D::perspective(
        to_rl(&eye),
        to_rl(&target),
        Vector3::new(0.0, 1.0, 0.0),
        45.0,
    )
}

pub fn render_system(
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    mut models: NonSendMut<ModelStore>,
    physics: Res<PhysicsWorld>,
    config: Res<RobotConfig>,
    debug: Option<Res<DebugMode>>,
    robots: Query<(
        &Robot,
        &VisualTransform,
        &ModelPlacement,
        &AnimationMixer,
        &PhysicsBody,
    )>,
) {
    let robot = robots.iter().next();

    // Pose the model before drawing.
    if let Some((_, _, _, mixer, _)) = robot {
        let (name, action) = mixer.dominant();
        let store = &mut *models;
        if let (Some(model), Some(anim)) = (
            store.robot.as_mut(),
            store.animations.get(name.clip_index()),
        ) && anim.frameCount > 0
        {
            let frame = (action.time * ANIMATION_FPS) as i32 % anim.frameCount;
            rl.update_model_animation(&th, &mut *model, anim, frame);
        }
    }

    let camera = follow_camera(robot.map(|(_, transform, _, _, _)| transform));

    let mut d = rl.begin_drawing(&th);
    d.clear_background(Color::SKYBLUE);

    {
        let mut d3 = d.begin_mode3D(camera);
        d3.draw_plane(
            Vector3::zero(),
            Vector2::new(GROUND_SIZE, GROUND_SIZE),
            Color::DARKGREEN,
        );
        d3.draw_grid(GROUND_SIZE as i32, 1.0);

        if let Some((_, transform, placement, _, physics_body)) = robot {
            let position = to_rl(&placement.world_position(transform));
            match models.robot.as_ref() {
                Some(model) => d3.draw_model_ex(
                    model,
                    position,
                    Vector3::new(0.0, 1.0, 0.0),
                    transform.rotation_y.to_degrees(),
                    Vector3::one() * placement.scale,
                    Color::WHITE,
                ),
                None => d3.draw_sphere(to_rl(&transform.position), config.body_radius, Color::GRAY),
            }

            if debug.is_some()
                && let Some(body) = physics.body(physics_body.body)
            {
                let center = to_rl(body.translation());
                let color = if body.is_sleeping() {
                    Color::BLUE
                } else {
                    Color::RED
                };
                d3.draw_sphere_wires(center, config.body_radius, 8, 8, color);
                let heading = body.translation() + transform.forward();
                d3.draw_line_3D(center, to_rl(&heading), Color::YELLOW);
            }
        }
    }

    if let Some((robot, _, _, mixer, physics_body)) = robot {
        d.draw_text(&format!("Points: {}", robot.points), 10, 10, 20, Color::BLACK);

        if debug.is_some() {
            d.draw_fps(10, 40);
            d.draw_text(
                &format!("Animation: {}", mixer.current()),
                10,
                65,
                10,
                Color::BLACK,
            );
            if let Some(body) = physics.body(physics_body.body) {
                let p = body.translation();
                let v = body.linvel();
                d.draw_text(
                    &format!("Position: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z),
                    10,
                    80,
                    10,
                    Color::BLACK,
                );
                d.draw_text(
                    &format!(
                        "Velocity: ({:.2}, {:.2}, {:.2}) sleeping: {}",
                        v.x,
                        v.y,
                        v.z,
                        body.is_sleeping()
                    ),
                    10,
                    95,
                    10,
                    Color::BLACK,
                );
            }
            d.draw_text("DEBUG MODE (press F11 to toggle)", 10, 110, 10, Color::BLACK);
        }
    }
}
