//! Loaded robot model and its skeletal animations.
//!
//! Raylib GPU handles are not `Send`, so this is stored as a non-send
//! resource. A missing model is not fatal: the renderer draws a placeholder
//! sphere and the mixer falls back to placeholder clips.

use log::{info, warn};
use raylib::prelude::*;

use crate::resources::animationstore::AnimationStore;

#[derive(Default)]
pub struct ModelStore {
    pub robot: Option<Model>,
    pub animations: Vec<ModelAnimation>,
}

impl ModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the robot model and its animations from `path`.
    pub fn load(rl: &mut RaylibHandle, thread: &RaylibThread, path: &str) -> Self {
        let robot = match rl.load_model(thread, path) {
            Ok(model) => {
                info!("loaded robot model '{}'", path);
                Some(model)
            }
            Err(e) => {
                warn!("robot model '{}' unavailable: {}", path, e);
                None
            }
        };
        let animations = match rl.load_model_animations(thread, path) {
            Ok(animations) => {
                info!("loaded {} robot animations", animations.len());
                animations
            }
            Err(e) => {
                warn!("robot animations '{}' unavailable: {}", path, e);
                Vec::new()
            }
        };
        Self { robot, animations }
    }

    /// Clip metadata for the animation mixer.
    pub fn animation_store(&self) -> AnimationStore {
        AnimationStore::from_frame_counts(
            self.animations
                .iter()
                .map(|anim| (animation_name(anim), anim.frameCount.max(0) as u32)),
        )
    }
}

fn animation_name(anim: &ModelAnimation) -> String {
    anim.name
        .iter()
        .take_while(|c| **c != 0)
        .map(|c| *c as u8 as char)
        .collect()
}
