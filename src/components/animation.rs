//! Skeletal animation playback state.
//!
//! The mixer tracks *which* clips play and how strongly; sampling the actual
//! bone poses is left to the renderer, which reads each action's `time` and
//! `weight`.
//!
//! - [`AnimationName`] – the five actions a robot owns
//! - [`AnimationClip`] – clip metadata from the resource table
//! - [`AnimationAction`] – per-clip playback state (time, weight, fade, loop)
//! - [`AnimationMixer`] – the action set plus the current action
//!
//! Systems in [`crate::systems::animation`] advance mixers each frame and
//! trigger [`AnimationFinishedEvent`](crate::events::animation::AnimationFinishedEvent)
//! when a one-shot action reaches its end.

use bevy_ecs::prelude::Component;

use crate::resources::animationstore::AnimationStore;

/// Actions available on a robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationName {
    Dance,
    Death,
    Idle,
    Jump,
    Walking,
}

impl AnimationName {
    pub const ALL: [AnimationName; 5] = [
        AnimationName::Dance,
        AnimationName::Death,
        AnimationName::Idle,
        AnimationName::Jump,
        AnimationName::Walking,
    ];

    /// Position of the clip for this action in the model's animation list.
    pub fn clip_index(self) -> usize {
        match self {
            AnimationName::Dance => 0,
            AnimationName::Death => 1,
            AnimationName::Idle => 2,
            AnimationName::Jump => 3,
            AnimationName::Walking => 10,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnimationName::Dance => "dance",
            AnimationName::Death => "death",
            AnimationName::Idle => "idle",
            AnimationName::Jump => "jump",
            AnimationName::Walking => "walking",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for AnimationName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named clip with its length in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration: duration.max(0.0),
        }
    }

    /// Empty stand-in used when the model does not provide a clip.
    pub fn placeholder(index: usize) -> Self {
        Self::new(format!("clip{}", index), 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// Wrap around at the end of the clip.
    Repeat,
    /// Stop at the end of the clip.
    Once,
}

/// Linear weight ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
struct WeightFade {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

/// Playback state for one clip.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationAction {
    pub clip: AnimationClip,
    pub time: f32,
    pub weight: f32,
    pub loop_mode: LoopMode,
    /// Hold the last pose when a [`LoopMode::Once`] clip ends.
    pub clamp_when_finished: bool,
    pub running: bool,
    pub finished: bool,
    fade: Option<WeightFade>,
}

impl AnimationAction {
    pub fn new(clip: AnimationClip) -> Self {
        Self {
            clip,
            time: 0.0,
            weight: 0.0,
            loop_mode: LoopMode::Repeat,
            clamp_when_finished: false,
            running: false,
            finished: false,
            fade: None,
        }
    }

    /// Rewind to the first frame and drop any fade in progress.
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.finished = false;
        self.fade = None;
    }

    pub fn play(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.weight = 0.0;
        self.fade = None;
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    fn fade_to(&mut self, from: f32, to: f32, duration: f32) {
        if duration <= 0.0 {
            self.weight = to;
            self.fade = None;
            return;
        }
        self.weight = from;
        self.fade = Some(WeightFade {
            from,
            to,
            elapsed: 0.0,
            duration,
        });
    }

    /// Advance the fade and clip time. Returns true when a one-shot clip
    /// reaches its end during this update.
    fn advance(&mut self, delta: f32) -> bool {
        if !self.running {
            return false;
        }

        if let Some(mut fade) = self.fade {
            fade.elapsed += delta;
            let t = (fade.elapsed / fade.duration).min(1.0);
            self.weight = fade.from + (fade.to - fade.from) * t;
            if t >= 1.0 {
                self.fade = None;
                if fade.to <= 0.0 {
                    self.stop();
                    return false;
                }
            } else {
                self.fade = Some(fade);
            }
        }

        if self.finished {
            return false;
        }

        self.time += delta;
        let duration = self.clip.duration;
        match self.loop_mode {
            LoopMode::Repeat => {
                if duration > 0.0 {
                    self.time %= duration;
                } else {
                    self.time = 0.0;
                }
                false
            }
            LoopMode::Once => {
                if self.time >= duration {
                    self.time = duration;
                    self.finished = true;
                    if !self.clamp_when_finished {
                        self.stop();
                    }
                    true
                } else {
                    false
                }
            }
        }
    }
}

/// The robot's action set with exactly one current action.
#[derive(Component, Debug, Clone)]
pub struct AnimationMixer {
    actions: [AnimationAction; 5],
    current: AnimationName,
    /// Crossfade between actions, in seconds.
    pub crossfade: f32,
}

impl AnimationMixer {
    /// Build the action set from the resource table.
    ///
    /// Missing clips become placeholders. `idle` starts playing at full
    /// weight; `jump` plays once and holds its last pose.
    pub fn from_store(store: &AnimationStore, crossfade: f32) -> Self {
        let actions = AnimationName::ALL.map(|name| {
            AnimationAction::new(store.clip_or_placeholder(name.clip_index()))
        });
        let mut mixer = Self {
            actions,
            current: AnimationName::Idle,
            crossfade,
        };

        let jump = mixer.action_mut(AnimationName::Jump);
        jump.loop_mode = LoopMode::Once;
        jump.clamp_when_finished = true;

        let idle = mixer.action_mut(AnimationName::Idle);
        idle.weight = 1.0;
        idle.play();

        mixer
    }

    pub fn current(&self) -> AnimationName {
        self.current
    }

    pub fn is_current(&self, name: AnimationName) -> bool {
        self.current == name
    }

    pub fn action(&self, name: AnimationName) -> &AnimationAction {
        &self.actions[name.slot()]
    }

    pub fn action_mut(&mut self, name: AnimationName) -> &mut AnimationAction {
        &mut self.actions[name.slot()]
    }

    /// Iterate `(name, action)` pairs in declaration order.
    pub fn actions(&self) -> impl Iterator<Item = (AnimationName, &AnimationAction)> {
        AnimationName::ALL
            .into_iter()
            .map(move |name| (name, &self.actions[name.slot()]))
    }

    /// Running action with the highest weight, the one a renderer without
    /// blending should show.
    pub fn dominant(&self) -> (AnimationName, &AnimationAction) {
        let mut best = (self.current, self.action(self.current));
        for (name, action) in self.actions() {
            if action.running && action.weight > best.1.weight {
                best = (name, action);
            }
        }
        best
    }

    /// Crossfade from the current action to `name` and make it current.
    ///
    /// Playing the current action again restarts it without a fade.
    /// Returns the previously current action.
    pub fn play(&mut self, name: AnimationName) -> AnimationName {
        let previous = self.current;
        let duration = self.crossfade;

        if previous == name {
            let action = self.action_mut(name);
            action.reset();
            action.weight = 1.0;
            action.play();
            return previous;
        }

        let old = self.action_mut(previous);
        let old_weight = old.weight;
        old.fade_to(old_weight, 0.0, duration);
        if duration <= 0.0 {
            old.stop();
        }

        let new = self.action_mut(name);
        new.reset();
        new.play();
        new.fade_to(0.0, 1.0, duration);

        self.current = name;
        previous
    }

    /// Advance every running action by `delta` seconds.
    ///
    /// Returns the one-shot actions that reached their end in this update.
    pub fn update(&mut self, delta: f32) -> Vec<AnimationName> {
        let mut finished = Vec::new();
        for name in AnimationName::ALL {
            if self.actions[name.slot()].advance(delta) {
                finished.push(name);
            }
        }
        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn store_with_durations() -> AnimationStore {
        let mut clips: Vec<AnimationClip> = (0..11)
            .map(|i| AnimationClip::new(format!("extra{}", i), 1.0))
            .collect();
        clips[0] = AnimationClip::new("dance", 2.0);
        clips[1] = AnimationClip::new("death", 1.5);
        clips[2] = AnimationClip::new("idle", 2.0);
        clips[3] = AnimationClip::new("jump", 0.8);
        clips[10] = AnimationClip::new("walking", 1.0);
        AnimationStore::new(clips)
    }

    #[test]
    fn test_starts_idle_at_full_weight() {
        let mixer = AnimationMixer::from_store(&store_with_durations(), 0.3);
        assert_eq!(mixer.current(), AnimationName::Idle);
        let idle = mixer.action(AnimationName::Idle);
        assert!(idle.running);
        assert!(approx_eq(idle.weight, 1.0));
        assert!(!mixer.action(AnimationName::Walking).running);
    }

    #[test]
    fn test_actions_pick_clips_by_index() {
        let mixer = AnimationMixer::from_store(&store_with_durations(), 0.3);
        assert_eq!(mixer.action(AnimationName::Dance).clip.name, "dance");
        assert_eq!(mixer.action(AnimationName::Death).clip.name, "death");
        assert_eq!(mixer.action(AnimationName::Idle).clip.name, "idle");
        assert_eq!(mixer.action(AnimationName::Jump).clip.name, "jump");
        assert_eq!(mixer.action(AnimationName::Walking).clip.name, "walking");
    }

    #[test]
    fn test_missing_clips_become_placeholders() {
        let mixer = AnimationMixer::from_store(&AnimationStore::default(), 0.3);
        assert_eq!(mixer.action(AnimationName::Walking).clip.name, "clip10");
        assert_eq!(mixer.action(AnimationName::Idle).clip.name, "clip2");
        assert!(approx_eq(mixer.action(AnimationName::Jump).clip.duration, 0.0));
    }

    #[test]
    fn test_jump_plays_once_and_clamps() {
        let mixer = AnimationMixer::from_store(&store_with_durations(), 0.3);
        let jump = mixer.action(AnimationName::Jump);
        assert_eq!(jump.loop_mode, LoopMode::Once);
        assert!(jump.clamp_when_finished);
        assert_eq!(
            mixer.action(AnimationName::Walking).loop_mode,
            LoopMode::Repeat
        );
    }

    #[test]
    fn test_crossfade_blends_weights() {
        let mut mixer = AnimationMixer::from_store(&store_with_durations(), 0.3);
        let previous = mixer.play(AnimationName::Walking);
        assert_eq!(previous, AnimationName::Idle);
        assert_eq!(mixer.current(), AnimationName::Walking);

        mixer.update(0.15);
        let idle = mixer.action(AnimationName::Idle);
        let walking = mixer.action(AnimationName::Walking);
        assert!(approx_eq(idle.weight, 0.5));
        assert!(approx_eq(walking.weight, 0.5));
        assert!(idle.is_fading() && walking.is_fading());

        mixer.update(0.15);
        let idle = mixer.action(AnimationName::Idle);
        let walking = mixer.action(AnimationName::Walking);
        assert!(!idle.running);
        assert!(approx_eq(idle.weight, 0.0));
        assert!(approx_eq(walking.weight, 1.0));
        assert!(!walking.is_fading());
    }

    #[test]
    fn test_play_resets_target_time() {
        let mut mixer = AnimationMixer::from_store(&store_with_durations(), 0.3);
        mixer.play(AnimationName::Walking);
        mixer.update(0.5);
        mixer.play(AnimationName::Idle);
        mixer.play(AnimationName::Walking);
        assert!(approx_eq(mixer.action(AnimationName::Walking).time, 0.0));
    }

    #[test]
    fn test_replaying_current_restarts_without_fade() {
        let mut mixer = AnimationMixer::from_store(&store_with_durations(), 0.3);
        mixer.update(0.7);
        mixer.play(AnimationName::Idle);
        let idle = mixer.action(AnimationName::Idle);
        assert!(approx_eq(idle.time, 0.0));
        assert!(approx_eq(idle.weight, 1.0));
        assert!(!idle.is_fading());
    }

    #[test]
    fn test_repeat_wraps_time() {
        let mut mixer = AnimationMixer::from_store(&store_with_durations(), 0.3);
        let finished = mixer.update(2.5);
        assert!(finished.is_empty());
        assert!(approx_eq(mixer.action(AnimationName::Idle).time, 0.5));
    }

    #[test]
    fn test_once_reports_finish_exactly_once() {
        let mut mixer = AnimationMixer::from_store(&store_with_durations(), 0.3);
        mixer.play(AnimationName::Jump);

        assert!(mixer.update(0.5).is_empty());
        assert_eq!(mixer.update(0.5), vec![AnimationName::Jump]);
        let jump = mixer.action(AnimationName::Jump);
        assert!(jump.finished);
        assert!(jump.running, "clamped clip keeps its last pose");
        assert!(approx_eq(jump.time, 0.8));

        assert!(mixer.update(0.5).is_empty());
    }

    #[test]
    fn test_placeholder_one_shot_finishes_on_first_update() {
        let mut mixer = AnimationMixer::from_store(&AnimationStore::default(), 0.3);
        mixer.play(AnimationName::Jump);
        assert_eq!(mixer.update(0.016), vec![AnimationName::Jump]);
    }

    #[test]
    fn test_zero_crossfade_switches_immediately() {
        let mut mixer = AnimationMixer::from_store(&store_with_durations(), 0.0);
        mixer.play(AnimationName::Dance);
        assert!(!mixer.action(AnimationName::Idle).running);
        assert!(approx_eq(mixer.action(AnimationName::Dance).weight, 1.0));
        assert_eq!(mixer.dominant().0, AnimationName::Dance);
    }

    #[test]
    fn test_dominant_follows_crossfade() {
        let mut mixer = AnimationMixer::from_store(&store_with_durations(), 0.3);
        mixer.play(AnimationName::Walking);
        mixer.update(0.05);
        assert_eq!(mixer.dominant().0, AnimationName::Idle);
        mixer.update(0.2);
        assert_eq!(mixer.dominant().0, AnimationName::Walking);
    }
}
