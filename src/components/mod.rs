//! ECS components for entities.
//!
//! Submodules overview:
//! - [`animation`] – clip playback state and the robot's action mixer
//! - [`physicsbody`] – handles linking an entity to its rapier body
//! - [`robot`] – the playable robot marker and its score
//! - [`sound`] – sound playback with bounded retry, and the robot's sounds
//! - [`timer`] – countdown timer that emits events when finished
//! - [`transform`] – visual position/yaw and model placement

pub mod animation;
pub mod physicsbody;
pub mod robot;
pub mod sound;
pub mod timer;
pub mod transform;
