//! Game systems.
//!
//! Submodules overview
//! - [`animation`] – advance animation mixers and report finished one-shots
//! - [`audio`] – audio thread and its bridge systems
//! - [`input`] – read the keyboard into [`crate::resources::input::InputState`]
//! - [`physics`] – step the rapier world
//! - [`render`] – draw the scene, HUD and debug overlay using Raylib
//! - [`robot`] – robot locomotion and animation state machine
//! - [`sound`] – sound state sync and retry ticking
//! - [`time`] – update simulation time and delta, process timers

pub mod animation;
pub mod audio;
pub mod input;
pub mod physics;
pub mod render;
pub mod robot;
pub mod sound;
pub mod time;
