// Counts a number of seconds and then sends a TimerEvent, once.
use bevy_ecs::prelude::Component;

#[derive(Component, Debug, Clone)]
pub struct Timer {
    pub duration: f32,
    pub elapsed: f32,
    pub signal: String,
    pub fired: bool,
}
impl Timer {
    pub fn new(duration: f32, signal: impl Into<String>) -> Self {
        Timer {
            duration,
            elapsed: 0.0,
            signal: signal.into(),
            fired: false,
        }
    }
}
