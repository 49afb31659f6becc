//! ECS resources made available to systems.
//!
//! Overview
//! - `animationstore` – clip metadata for the robot's animations
//! - `audio` – bridge and channels for the background audio thread
//! - `debugmode` – presence toggles the debug overlay
//! - `gameconfig` – window and asset settings from the INI file
//! - `input` – per-frame keyboard state of keys relevant to the game
//! - `modelstore` – loaded robot model and animations (non-send)
//! - `physicsworld` – rapier world, stepped once per frame
//! - `robotconfig` – robot, physics and sound tuning
//! - `touchinput` – virtual joystick state
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod audio;
pub mod debugmode;
pub mod gameconfig;
pub mod input;
pub mod modelstore;
pub mod physicsworld;
pub mod robotconfig;
pub mod touchinput;
pub mod worldtime;
