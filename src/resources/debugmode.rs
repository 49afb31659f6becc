//! Debug toggle resource.
//!
//! The presence of this resource turns on the physics overlay (body sphere,
//! velocity, sleep state, current animation). Remove it to hide the overlay.

use bevy_ecs::prelude::Resource;

/// Marker resource toggled by
/// [`SwitchDebugEvent`](crate::events::switchdebug::SwitchDebugEvent).
#[derive(Resource, Clone, Copy, Debug)]
pub struct DebugMode {}
