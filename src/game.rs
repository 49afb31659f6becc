//! Scene setup and robot lifecycle.
//!
//! [`spawn_robot`] assembles the robot entity from the current resources:
//! physics body, animation mixer, sounds and the wake timer. Missing
//! resources fall back to defaults so the robot can be spawned into a bare
//! `World` (tests, tools).

use bevy_ecs::prelude::*;
use log::{debug, info};
use nalgebra::Vector3;

use crate::components::animation::AnimationMixer;
use crate::components::physicsbody::PhysicsBody;
use crate::components::robot::Robot;
use crate::components::sound::RobotSounds;
use crate::components::timer::Timer;
use crate::components::transform::{ModelPlacement, VisualTransform};
use crate::resources::animationstore::AnimationStore;
use crate::resources::physicsworld::PhysicsWorld;
use crate::resources::robotconfig::RobotConfig;
use crate::systems::robot::WAKE_SIGNAL;

/// Half the side of the square floor.
pub const GROUND_HALF_EXTENT: f32 = 20.0;

/// Add the static floor to the physics world, creating the world if needed.
pub fn setup_scene(world: &mut World) {
    ensure_physics(world);
    world
        .resource_mut::<PhysicsWorld>()
        .add_ground(GROUND_HALF_EXTENT);
}

fn ensure_physics(world: &mut World) {
    if !world.contains_resource::<PhysicsWorld>() {
        let physics = match world.get_resource::<RobotConfig>() {
            Some(config) => PhysicsWorld::from_config(config),
            None => PhysicsWorld::new(),
        };
        world.insert_resource(physics);
    }
}

/// Create the robot entity and its physics body.
///
/// The body starts asleep at the spawn point; a one-shot timer wakes it
/// after `wake_delay` seconds.
pub fn spawn_robot(world: &mut World, sounds: RobotSounds) -> Entity {
    let config = world
        .get_resource::<RobotConfig>()
        .cloned()
        .unwrap_or_default();
    let mixer = match world.get_resource::<AnimationStore>() {
        Some(store) => AnimationMixer::from_store(store, config.crossfade),
        None => AnimationMixer::from_store(&AnimationStore::default(), config.crossfade),
    };

    ensure_physics(world);
    let (body, collider) = world
        .resource_mut::<PhysicsWorld>()
        .spawn_robot_body(&config);

    let entity = world
        .spawn((
            Robot::new(),
            VisualTransform::new(Vector3::new(0.0, config.spawn_height, 0.0), 0.0),
            ModelPlacement::new(
                config.model_scale,
                Vector3::new(0.0, config.model_offset_y, 0.0),
            ),
            PhysicsBody::new(body, collider),
            mixer,
            sounds,
            Timer::new(config.wake_delay, WAKE_SIGNAL),
        ))
        .id();

    info!("robot spawned as {:?}", entity);
    entity
}

/// Remove the robot entity and its physics body, stopping its sounds.
pub fn despawn_robot(world: &mut World, entity: Entity) {
    if let Some(mut sounds) = world.get_mut::<RobotSounds>(entity) {
        sounds.stop_all();
    }
    if let Some(physics_body) = world.get::<PhysicsBody>(entity).copied()
        && let Some(mut physics) = world.get_resource_mut::<PhysicsWorld>()
    {
        physics.remove_body(physics_body.body);
    }
    if world.despawn(entity) {
        debug!("robot {:?} despawned", entity);
    }
}
