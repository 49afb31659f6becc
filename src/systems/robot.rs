//! Robot locomotion and animation state machine.
//!
//! The per-frame logic lives in [`update_robot`], a plain function over the
//! robot's parts so it can be driven without a world. [`robot_controller`]
//! is the system that feeds it from ECS resources.
//!
//! Order of operations each frame:
//! 1. Clamp horizontal velocity per axis.
//! 2. Jump when grounded and space is held, then skip the rest of the frame.
//! 3. Respawn when the body flew above the reset height.
//! 4. Keyboard forces and turning, then touch input.
//! 5. Pick walking or idle.
//! 6. Copy the body position into the visual transform.
//!
//! Any frame that does not jump picks walking or idle from the input, so a
//! jump clip only stays current until the next frame. If it finishes while
//! still current, [`animation_finished_observer`] returns to idle.
//! The body starts asleep and is woken by [`wake_body_observer`].

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, warn};
use nalgebra::Vector3;
use rapier3d::prelude::RigidBody;

use crate::components::animation::{AnimationMixer, AnimationName};
use crate::components::physicsbody::PhysicsBody;
use crate::components::robot::Robot;
use crate::components::sound::RobotSounds;
use crate::components::timer::Timer;
use crate::components::transform::VisualTransform;
use crate::events::animation::AnimationFinishedEvent;
use crate::events::timer::TimerEvent;
use crate::resources::input::{DirectionalInput, InputState};
use crate::resources::physicsworld::PhysicsWorld;
use crate::resources::robotconfig::RobotConfig;
use crate::resources::touchinput::TouchInput;
use crate::resources::worldtime::WorldTime;

/// Timer signal that wakes the robot's body.
pub const WAKE_SIGNAL: &str = "wake_body";

/// Control input for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct RobotInput {
    pub keys: DirectionalInput,
    pub touch: Option<TouchInput>,
}

/// Switch the robot to `name` and start or stop its sounds to match.
///
/// Walking plays the walk loop; anything else stops it. Jump also plays the
/// jump cue.
pub fn play_animation(mixer: &mut AnimationMixer, sounds: &mut RobotSounds, name: AnimationName) {
    let previous = mixer.play(name);
    debug!("robot animation {} -> {}", previous, name);

    if name == AnimationName::Walking {
        sounds.walk.play();
    } else {
        sounds.walk.stop();
    }
    if name == AnimationName::Jump {
        sounds.jump.play();
    }
}

/// Advance one robot by `delta` seconds.
pub fn update_robot(
    input: &RobotInput,
    delta: f32,
    config: &RobotConfig,
    body: &mut RigidBody,
    transform: &mut VisualTransform,
    mixer: &mut AnimationMixer,
    sounds: &mut RobotSounds,
) {
    let max = config.max_speed;
    let linvel = *body.linvel();
    if linvel.x.abs() > max || linvel.z.abs() > max {
        let clamped = Vector3::new(linvel.x.clamp(-max, max), linvel.y, linvel.z.clamp(-max, max));
        body.set_linvel(clamped, false);
    }

    let forward = transform.forward();
    let keys = input.keys;

    if keys.space && body.translation().y <= config.ground_height {
        let impulse = Vector3::new(
            forward.x * config.jump_forward,
            config.jump_impulse,
            forward.z * config.jump_forward,
        );
        body.apply_impulse(impulse, true);
        play_animation(mixer, sounds, AnimationName::Jump);
        return;
    }

    if body.translation().y > config.reset_height {
        debug!("robot fell out of bounds, respawning");
        body.set_translation(Vector3::new(0.0, config.spawn_height, 0.0), true);
        body.set_linvel(Vector3::zeros(), true);
    }

    let mut moving = false;
    if keys.up {
        body.add_force(forward * config.move_force, true);
        moving = true;
    }
    if keys.down {
        body.add_force(-forward * config.move_force, true);
        moving = true;
    }

    if keys.left {
        transform.rotation_y += config.turn_speed * delta;
        body.set_rotation(transform.quaternion(), true);
    }
    if keys.right {
        transform.rotation_y -= config.turn_speed * delta;
        body.set_rotation(transform.quaternion(), true);
    }

    if let Some(touch) = input.touch.filter(TouchInput::is_active) {
        let direction = Vector3::new(touch.direction.x, 0.0, touch.direction.y).normalize();
        body.add_force(direction * config.touch_force * touch.intensity, true);
        transform.rotation_y = direction.x.atan2(direction.z);
        body.set_rotation(transform.quaternion(), true);
        moving = true;
    }

    if moving && !mixer.is_current(AnimationName::Walking) {
        play_animation(mixer, sounds, AnimationName::Walking);
    } else if !moving && !mixer.is_current(AnimationName::Idle) {
        play_animation(mixer, sounds, AnimationName::Idle);
    }

    transform.position = *body.translation();
}

/// Drive every robot from keyboard and touch state.
pub fn robot_controller(
    time: Res<WorldTime>,
    input: Res<InputState>,
    touch: Option<Res<TouchInput>>,
    config: Res<RobotConfig>,
    mut physics: ResMut<PhysicsWorld>,
    mut robots: Query<
        (
            Entity,
            &PhysicsBody,
            &mut VisualTransform,
            &mut AnimationMixer,
            &mut RobotSounds,
        ),
        With<Robot>,
    >,
) {
    let frame_input = RobotInput {
        keys: input.directional(),
        touch: touch.as_deref().copied(),
    };

    for (entity, physics_body, mut transform, mut mixer, mut sounds) in robots.iter_mut() {
        let Some(body) = physics.body_mut(physics_body.body) else {
            warn!("robot {:?} has no physics body", entity);
            continue;
        };
        update_robot(
            &frame_input,
            time.delta,
            &config,
            body,
            &mut transform,
            &mut mixer,
            &mut sounds,
        );
    }
}

/// Return to idle once the jump one-shot completes.
pub fn animation_finished_observer(
    trigger: On<AnimationFinishedEvent>,
    mut robots: Query<(&mut AnimationMixer, &mut RobotSounds)>,
) {
    let event = trigger.event();
    if event.action != AnimationName::Jump {
        return;
    }
    let Ok((mut mixer, mut sounds)) = robots.get_mut(event.entity) else {
        return;
    };
    if mixer.is_current(AnimationName::Jump) {
        play_animation(&mut mixer, &mut sounds, AnimationName::Idle);
    }
}

/// Wake the robot's body when its spawn timer fires, then drop the timer.
pub fn wake_body_observer(
    trigger: On<TimerEvent>,
    mut commands: Commands,
    mut physics: ResMut<PhysicsWorld>,
    bodies: Query<&PhysicsBody>,
) {
    let event = trigger.event();
    if event.signal != WAKE_SIGNAL {
        return;
    }
    if let Ok(physics_body) = bodies.get(event.entity)
        && let Some(body) = physics.body_mut(physics_body.body)
    {
        body.wake_up(true);
        debug!("robot {:?} body awake", event.entity);
    }
    commands.entity(event.entity).remove::<Timer>();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::animationstore::AnimationStore;

    fn setup() -> (PhysicsWorld, rapier3d::prelude::RigidBodyHandle, RobotConfig) {
        let config = RobotConfig::default();
        let mut physics = PhysicsWorld::from_config(&config);
        let (handle, _) = physics.spawn_robot_body(&config);
        (physics, handle, config)
    }

    fn parts(config: &RobotConfig) -> (VisualTransform, AnimationMixer, RobotSounds) {
        (
            VisualTransform::default(),
            AnimationMixer::from_store(&AnimationStore::default(), config.crossfade),
            RobotSounds::silent(),
        )
    }

    fn keys(keys: DirectionalInput) -> RobotInput {
        RobotInput { keys, touch: None }
    }

    #[test]
    fn clamps_each_horizontal_axis() {
        let (mut physics, handle, config) = setup();
        let (mut transform, mut mixer, mut sounds) = parts(&config);
        let body = physics.body_mut(handle).unwrap();
        body.set_linvel(Vector3::new(40.0, -3.0, -22.0), true);

        update_robot(
            &RobotInput::default(),
            0.016,
            &config,
            body,
            &mut transform,
            &mut mixer,
            &mut sounds,
        );

        let v = body.linvel();
        assert_eq!(v.x, 15.0);
        assert_eq!(v.z, -15.0);
        assert_eq!(v.y, -3.0);
    }

    #[test]
    fn velocity_inside_limits_is_untouched() {
        let (mut physics, handle, config) = setup();
        let (mut transform, mut mixer, mut sounds) = parts(&config);
        let body = physics.body_mut(handle).unwrap();
        body.set_linvel(Vector3::new(4.0, 1.0, -7.5), true);

        update_robot(
            &RobotInput::default(),
            0.016,
            &config,
            body,
            &mut transform,
            &mut mixer,
            &mut sounds,
        );

        assert_eq!(*body.linvel(), Vector3::new(4.0, 1.0, -7.5));
    }

    #[test]
    fn left_and_right_turn_in_opposite_directions() {
        let (mut physics, handle, config) = setup();
        let (mut transform, mut mixer, mut sounds) = parts(&config);
        let body = physics.body_mut(handle).unwrap();

        let left = keys(DirectionalInput {
            left: true,
            ..Default::default()
        });
        update_robot(&left, 0.1, &config, body, &mut transform, &mut mixer, &mut sounds);
        assert!((transform.rotation_y - 0.25).abs() < 1e-6);

        let right = keys(DirectionalInput {
            right: true,
            ..Default::default()
        });
        update_robot(&right, 0.2, &config, body, &mut transform, &mut mixer, &mut sounds);
        assert!((transform.rotation_y + 0.25).abs() < 1e-6);

        let body_yaw = body.rotation().euler_angles().1;
        assert!((body_yaw + 0.25).abs() < 1e-4);
    }

    #[test]
    fn turning_alone_does_not_walk() {
        let (mut physics, handle, config) = setup();
        let (mut transform, mut mixer, mut sounds) = parts(&config);
        let body = physics.body_mut(handle).unwrap();
        let left = keys(DirectionalInput {
            left: true,
            ..Default::default()
        });
        update_robot(&left, 0.1, &config, body, &mut transform, &mut mixer, &mut sounds);
        assert_eq!(mixer.current(), AnimationName::Idle);
    }

    #[test]
    fn touch_sets_heading_and_walks() {
        let (mut physics, handle, config) = setup();
        let (mut transform, mut mixer, mut sounds) = parts(&config);
        let body = physics.body_mut(handle).unwrap();
        let input = RobotInput {
            keys: DirectionalInput::default(),
            touch: Some(TouchInput {
                enabled: true,
                direction: nalgebra::Vector2::new(1.0, 0.0),
                intensity: 0.5,
            }),
        };

        update_robot(&input, 0.016, &config, body, &mut transform, &mut mixer, &mut sounds);

        assert!((transform.rotation_y - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert_eq!(mixer.current(), AnimationName::Walking);
        assert!(sounds.walk.is_playing());
        let force = body.user_force();
        assert!((force.x - 125.0).abs() < 1e-3);
        assert!(force.z.abs() < 1e-3);
    }

    #[test]
    fn disabled_touch_is_ignored() {
        let (mut physics, handle, config) = setup();
        let (mut transform, mut mixer, mut sounds) = parts(&config);
        let body = physics.body_mut(handle).unwrap();
        let input = RobotInput {
            keys: DirectionalInput::default(),
            touch: Some(TouchInput {
                enabled: false,
                direction: nalgebra::Vector2::new(0.0, 1.0),
                intensity: 1.0,
            }),
        };
        update_robot(&input, 0.016, &config, body, &mut transform, &mut mixer, &mut sounds);
        assert_eq!(mixer.current(), AnimationName::Idle);
        assert_eq!(body.user_force(), Vector3::zeros());
    }

    #[test]
    fn walking_to_idle_stops_walk_sound() {
        let config = RobotConfig::default();
        let (_, mut mixer, mut sounds) = parts(&config);
        play_animation(&mut mixer, &mut sounds, AnimationName::Walking);
        assert!(sounds.walk.is_playing());
        play_animation(&mut mixer, &mut sounds, AnimationName::Idle);
        assert!(!sounds.walk.is_playing());
        play_animation(&mut mixer, &mut sounds, AnimationName::Jump);
        assert!(sounds.jump.is_playing());
    }
}
