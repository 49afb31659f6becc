//! robotwalker library.
//!
//! Exposes the robot's ECS components, resources, systems and events for use
//! in integration tests and by the `robotwalker` binary.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
