//! Robot tuning resource.
//!
//! Every constant the robot controller, physics body and sound cues depend
//! on lives here so it can be tweaked from the INI file without rebuilding.
//!
//! # Configuration File Format
//!
//! ```ini
//! [robot]
//! move_force = 80
//! turn_speed = 2.5
//! max_speed = 15
//! crossfade = 0.3
//!
//! [physics]
//! gravity = -9.82
//! friction = 0.6
//!
//! [sound]
//! walk_path = assets/sounds/robot/walking.mp3
//! max_retries = 5
//! retry_delay = 0.5
//! ```
//!
//! `crossfade` defaults to the robot's 0.3 s blend; the key overrides it for
//! tuning. Values the physics and animation code cannot take (a negative
//! `max_speed`, a zero `body_mass`, NaN) are rejected with a warning and the
//! previous value is kept.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::Path;

/// Tunables for the playable robot.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RobotConfig {
    // [robot]
    /// Force applied along the facing direction while up/down is held.
    pub move_force: f32,
    /// Yaw change in radians per second while left/right is held.
    pub turn_speed: f32,
    /// Per-axis clamp for horizontal velocity.
    pub max_speed: f32,
    /// Vertical impulse of a jump.
    pub jump_impulse: f32,
    /// Share of the facing direction added to the jump impulse.
    pub jump_forward: f32,
    /// Highest body Y at which a jump may start.
    pub ground_height: f32,
    /// Above this Y the body is teleported back to the spawn point.
    pub reset_height: f32,
    /// Spawn point Y (X and Z are the origin).
    pub spawn_height: f32,
    /// Crossfade between animation actions, in seconds.
    pub crossfade: f32,
    /// Uniform scale applied to the model inside the group.
    pub model_scale: f32,
    /// Vertical offset of the model inside the group.
    pub model_offset_y: f32,
    /// Force scale for the touch joystick at full deflection.
    pub touch_force: f32,
    /// Delay before the freshly spawned body is woken up.
    pub wake_delay: f32,

    // [physics]
    pub gravity: f32,
    pub body_radius: f32,
    pub body_mass: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub friction: f32,
    pub restitution: f32,

    // [sound]
    pub walk_sound_path: String,
    pub walk_volume: f32,
    pub jump_sound_path: String,
    pub jump_volume: f32,
    pub sound_max_retries: u32,
    pub sound_retry_delay: f32,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            move_force: 80.0,
            turn_speed: 2.5,
            max_speed: 15.0,
            jump_impulse: 3.0,
            jump_forward: 0.5,
            ground_height: 0.51,
            reset_height: 10.0,
            spawn_height: 1.0,
            crossfade: 0.3,
            model_scale: 0.3,
            model_offset_y: -0.3,
            touch_force: 250.0,
            wake_delay: 0.1,

            gravity: -9.82,
            body_radius: 0.4,
            body_mass: 2.0,
            linear_damping: 0.05,
            angular_damping: 0.9,
            friction: 0.6,
            restitution: 0.0,

            walk_sound_path: "assets/sounds/robot/walking.mp3".to_string(),
            walk_volume: 0.5,
            jump_sound_path: "assets/sounds/robot/jump.mp3".to_string(),
            jump_volume: 0.8,
            sound_max_retries: 5,
            sound_retry_delay: 0.5,
        }
    }
}

fn read_f32(config: &Ini, section: &str, key: &str, target: &mut f32) {
    if let Some(value) = config.getfloat(section, key).ok().flatten() {
        *target = value as f32;
    }
}

fn read_checked(
    config: &Ini,
    section: &str,
    key: &str,
    target: &mut f32,
    valid: impl Fn(f32) -> bool,
) {
    if let Some(value) = config.getfloat(section, key).ok().flatten() {
        let value = value as f32;
        if value.is_finite() && valid(value) {
            *target = value;
        } else {
            warn!("[{}] {} = {} is out of range, keeping {}", section, key, value, target);
        }
    }
}

fn read_non_negative(config: &Ini, section: &str, key: &str, target: &mut f32) {
    read_checked(config, section, key, target, |v| v >= 0.0);
}

fn read_positive(config: &Ini, section: &str, key: &str, target: &mut f32) {
    read_checked(config, section, key, target, |v| v > 0.0);
}

fn read_string(config: &Ini, section: &str, key: &str, target: &mut String) {
    if let Some(value) = config.get(section, key) {
        *target = value;
    }
}

impl RobotConfig {
    /// Load values from the INI file at `path`.
    ///
    /// Missing values retain their current values.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(path.as_ref())
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);

        info!(
            "Loaded robot config: force={}, turn={}, max_speed={}, crossfade={}",
            self.move_force, self.turn_speed, self.max_speed, self.crossfade
        );
        Ok(())
    }

    /// Copy every key present in `config` over the current values.
    pub fn apply_ini(&mut self, config: &Ini) {
        read_f32(config, "robot", "move_force", &mut self.move_force);
        read_f32(config, "robot", "turn_speed", &mut self.turn_speed);
        read_non_negative(config, "robot", "max_speed", &mut self.max_speed);
        read_f32(config, "robot", "jump_impulse", &mut self.jump_impulse);
        read_f32(config, "robot", "jump_forward", &mut self.jump_forward);
        read_f32(config, "robot", "ground_height", &mut self.ground_height);
        read_f32(config, "robot", "reset_height", &mut self.reset_height);
        read_f32(config, "robot", "spawn_height", &mut self.spawn_height);
        read_non_negative(config, "robot", "crossfade", &mut self.crossfade);
        read_f32(config, "robot", "model_scale", &mut self.model_scale);
        read_f32(config, "robot", "model_offset_y", &mut self.model_offset_y);
        read_f32(config, "robot", "touch_force", &mut self.touch_force);
        read_f32(config, "robot", "wake_delay", &mut self.wake_delay);

        read_f32(config, "physics", "gravity", &mut self.gravity);
        read_positive(config, "physics", "body_radius", &mut self.body_radius);
        read_positive(config, "physics", "body_mass", &mut self.body_mass);
        read_f32(config, "physics", "linear_damping", &mut self.linear_damping);
        read_f32(config, "physics", "angular_damping", &mut self.angular_damping);
        read_f32(config, "physics", "friction", &mut self.friction);
        read_f32(config, "physics", "restitution", &mut self.restitution);

        read_string(config, "sound", "walk_path", &mut self.walk_sound_path);
        read_f32(config, "sound", "walk_volume", &mut self.walk_volume);
        read_string(config, "sound", "jump_path", &mut self.jump_sound_path);
        read_f32(config, "sound", "jump_volume", &mut self.jump_volume);
        if let Some(retries) = config.getuint("sound", "max_retries").ok().flatten() {
            match u32::try_from(retries) {
                Ok(retries) => self.sound_max_retries = retries,
                Err(_) => warn!(
                    "[sound] max_retries = {} is too large, keeping {}",
                    retries, self.sound_max_retries
                ),
            }
        }
        read_non_negative(config, "sound", "retry_delay", &mut self.sound_retry_delay);
    }

    /// Write every value into `config` under its section.
    pub fn write_ini(&self, config: &mut Ini) {
        let robot = [
            ("move_force", self.move_force),
            ("turn_speed", self.turn_speed),
            ("max_speed", self.max_speed),
            ("jump_impulse", self.jump_impulse),
            ("jump_forward", self.jump_forward),
            ("ground_height", self.ground_height),
            ("reset_height", self.reset_height),
            ("spawn_height", self.spawn_height),
            ("crossfade", self.crossfade),
            ("model_scale", self.model_scale),
            ("model_offset_y", self.model_offset_y),
            ("touch_force", self.touch_force),
            ("wake_delay", self.wake_delay),
        ];
        for (key, value) in robot {
            config.set("robot", key, Some(value.to_string()));
        }

        let physics = [
            ("gravity", self.gravity),
            ("body_radius", self.body_radius),
            ("body_mass", self.body_mass),
            ("linear_damping", self.linear_damping),
            ("angular_damping", self.angular_damping),
            ("friction", self.friction),
            ("restitution", self.restitution),
        ];
        for (key, value) in physics {
            config.set("physics", key, Some(value.to_string()));
        }

        config.set("sound", "walk_path", Some(self.walk_sound_path.clone()));
        config.set("sound", "walk_volume", Some(self.walk_volume.to_string()));
        config.set("sound", "jump_path", Some(self.jump_sound_path.clone()));
        config.set("sound", "jump_volume", Some(self.jump_volume.to_string()));
        config.set(
            "sound",
            "max_retries",
            Some(self.sound_max_retries.to_string()),
        );
        config.set(
            "sound",
            "retry_delay",
            Some(self.sound_retry_delay.to_string()),
        );
    }
}
