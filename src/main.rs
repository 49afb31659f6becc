//! robotwalker main entry point.
//!
//! A single playable robot in a 3D scene, built on:
//! - **raylib** for windowing, 3D drawing, model animation and audio
//! - **bevy_ecs** for the entity-component-system architecture
//! - **rapier3d** for the robot's rigid body
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (window, robot, physics and sound settings)
//! 2. Initialize the raylib window, the robot model and the audio thread
//! 3. Spawn the floor and the robot, register observers and systems
//! 4. Each frame: input, audio messages, animation, robot control, sound
//!    retries, timers, physics, rendering
//! 5. Shut the audio thread down on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config ./config.ini
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;

use robotwalker::components::sound::RobotSounds;
use robotwalker::events::switchdebug::switch_debug_observer;
use robotwalker::game::{setup_scene, spawn_robot};
use robotwalker::resources::audio::{AudioBridge, setup_audio, shutdown_audio};
use robotwalker::resources::debugmode::DebugMode;
use robotwalker::resources::gameconfig::GameConfig;
use robotwalker::resources::input::InputState;
use robotwalker::resources::modelstore::ModelStore;
use robotwalker::resources::physicsworld::PhysicsWorld;
use robotwalker::resources::robotconfig::RobotConfig;
use robotwalker::resources::touchinput::TouchInput;
use robotwalker::resources::worldtime::WorldTime;
use robotwalker::systems::animation::advance_animations;
use robotwalker::systems::audio::{poll_audio_messages, update_bevy_audio_messages};
use robotwalker::systems::input::update_input_state;
use robotwalker::systems::physics::physics_step;
use robotwalker::systems::render::render_system;
use robotwalker::systems::robot::{
    animation_finished_observer, robot_controller, wake_body_observer,
};
use robotwalker::systems::sound::{sync_sound_status, tick_sound_retries};
use robotwalker::systems::time::{update_timers, update_world_time};

/// Robot Walker
#[derive(Parser)]
#[command(version, about = "Walk a robot around a 3D floor.")]
struct Cli {
    /// Configuration file to read.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Start with the debug overlay visible.
    #[arg(long)]
    debug: bool,

    /// Write a configuration file with default values and exit.
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Early-exit: write defaults and quit (no window/audio needed)
    if let Some(path) = cli.write_config {
        let config = GameConfig::with_path(path);
        if let Err(e) = config.save_to_file(&RobotConfig::default()) {
            error!("{}", e);
            std::process::exit(1);
        }
        return;
    }

    let mut config = GameConfig::with_path(cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    let mut robot_config = RobotConfig::default();
    if let Err(e) = robot_config.load_from_file(&config.config_path) {
        warn!("{}; using default robot tuning", e);
    }

    // --------------- Raylib window & assets ---------------
    let (window_width, window_height) = config.window_size();
    let mut builder = raylib::init();
    builder
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("Robot Walker");
    if config.vsync {
        builder.vsync();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);

    let models = ModelStore::load(&mut rl, &thread, &config.robot_model_path);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(InputState::default());
    world.insert_resource(TouchInput::default());
    world.insert_resource(models.animation_store());
    world.insert_resource(PhysicsWorld::from_config(&robot_config));
    world.insert_resource(robot_config.clone());
    world.insert_resource(config);
    if cli.debug {
        world.insert_resource(DebugMode {});
    }

    // Init audio; the robot's sounds need the bridge
    setup_audio(&mut world);
    let sounds = RobotSounds::from_bridge(world.resource::<AudioBridge>(), &robot_config);

    setup_scene(&mut world);
    spawn_robot(&mut world, sounds);

    world.insert_non_send_resource(models);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    world.add_observer(switch_debug_observer);
    world.add_observer(animation_finished_observer);
    world.add_observer(wake_body_observer);
    // Ensure the observers are registered before we run any systems that may trigger events.
    world.flush();

    let mut update = Schedule::default();
    update.add_systems(
        (
            update_input_state,
            // audio systems must be together
            (poll_audio_messages, update_bevy_audio_messages).chain(),
            sync_sound_status,
            advance_animations,
            robot_controller,
            tick_sound_retries,
            update_timers,
            physics_step,
            render_system,
        )
            .chain(),
    );

    info!("entering main loop");
    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();
    }
    // GPU resources must go before the window does.
    drop(world.remove_non_send_resource::<ModelStore>());
    shutdown_audio(&mut world);
}
