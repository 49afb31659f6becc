//! Animation clip registry.
//!
//! Clips are listed in the order the robot model provides them; actions pick
//! their clip by position (see
//! [`AnimationName::clip_index`](crate::components::animation::AnimationName::clip_index)).
//! Clip metadata lives here so the mixer can run without a loaded model.

use bevy_ecs::prelude::Resource;

use crate::components::animation::AnimationClip;

/// Frames per second the model's animations are sampled at.
pub const ANIMATION_FPS: f32 = 60.0;

#[derive(Resource, Debug, Clone, Default)]
pub struct AnimationStore {
    pub clips: Vec<AnimationClip>,
}

impl AnimationStore {
    pub fn new(clips: Vec<AnimationClip>) -> Self {
        Self { clips }
    }

    /// Build clips from `(name, frame_count)` pairs sampled at [`ANIMATION_FPS`].
    pub fn from_frame_counts<S: Into<String>>(frames: impl IntoIterator<Item = (S, u32)>) -> Self {
        let clips = frames
            .into_iter()
            .map(|(name, count)| AnimationClip::new(name, count as f32 / ANIMATION_FPS))
            .collect();
        Self { clips }
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Clip at `index`, or an empty placeholder named `clip{index}`.
    pub fn clip_or_placeholder(&self, index: usize) -> AnimationClip {
        self.clips
            .get(index)
            .cloned()
            .unwrap_or_else(|| AnimationClip::placeholder(index))
    }
}
