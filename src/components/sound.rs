//! Sound playback with bounded retry.
//!
//! A [`Sound`] wraps a [`SoundHandle`] (the backend that actually makes noise)
//! and adds retry on failure: when `play()` fails it schedules another
//! attempt after `retry_delay` seconds, up to `max_retries` times. The retry
//! timer is owned by the `Sound`, advanced by [`Sound::tick`] and cancelled by
//! [`Sound::stop`], [`Sound::pause`] or dropping the sound.
//!
//! [`RobotSounds`] holds the two sounds a robot uses.

use bevy_ecs::prelude::Component;
use log::{debug, warn};

use crate::events::audio::AudioMessage;
use crate::resources::audio::{AudioBridge, BridgeSound};
use crate::resources::robotconfig::RobotConfig;

/// Why a playback request did not go through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundError {
    /// The track has not finished loading (or failed to load).
    NotLoaded,
    /// The audio device is not open.
    DeviceUnavailable,
    /// The audio backend is gone.
    Disconnected,
}

impl std::fmt::Display for SoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SoundError::NotLoaded => write!(f, "sound not loaded"),
            SoundError::DeviceUnavailable => write!(f, "audio device unavailable"),
            SoundError::Disconnected => write!(f, "audio backend disconnected"),
        }
    }
}

impl std::error::Error for SoundError {}

/// Backend for a single sound.
///
/// `stop` halts and rewinds, `pause` halts and keeps the position so the next
/// `play` continues from there.
pub trait SoundHandle: Send + Sync {
    fn is_playing(&self) -> bool;
    /// True when the audio context is suspended and needs [`resume`](Self::resume).
    fn is_suspended(&self) -> bool;
    fn resume(&mut self) -> Result<(), SoundError>;
    fn play(&mut self) -> Result<(), SoundError>;
    fn stop(&mut self);
    fn pause(&mut self);
    /// Update cached state from an audio thread notification.
    fn on_audio_message(&mut self, _msg: &AudioMessage) {}
}

/// Silent handle used when no audio backend exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSound {
    playing: bool,
}

impl SoundHandle for NullSound {
    fn is_playing(&self) -> bool {
        self.playing
    }
    fn is_suspended(&self) -> bool {
        false
    }
    fn resume(&mut self) -> Result<(), SoundError> {
        Ok(())
    }
    fn play(&mut self) -> Result<(), SoundError> {
        self.playing = true;
        Ok(())
    }
    fn stop(&mut self) {
        self.playing = false;
    }
    fn pause(&mut self) {
        self.playing = false;
    }
}

pub struct Sound {
    name: String,
    handle: Box<dyn SoundHandle>,
    retry_count: u32,
    pub max_retries: u32,
    /// Seconds between retries.
    pub retry_delay: f32,
    /// Seconds left until the next retry.
    pending_retry: Option<f32>,
}

impl Sound {
    pub fn new(name: impl Into<String>, handle: Box<dyn SoundHandle>) -> Self {
        Self {
            name: name.into(),
            handle,
            retry_count: 0,
            max_retries: 5,
            retry_delay: 0.5,
            pending_retry: None,
        }
    }

    pub fn with_retry(mut self, max_retries: u32, retry_delay: f32) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_playing(&self) -> bool {
        self.handle.is_playing()
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn has_pending_retry(&self) -> bool {
        self.pending_retry.is_some()
    }

    /// Start playback unless already playing.
    ///
    /// Resumes a suspended audio context first. On failure a retry is
    /// scheduled while attempts remain.
    pub fn play(&mut self) {
        match self.try_play() {
            Ok(()) => {}
            Err(err) => self.schedule_retry(err),
        }
    }

    fn try_play(&mut self) -> Result<(), SoundError> {
        if self.handle.is_suspended() {
            self.handle.resume()?;
        }
        if !self.handle.is_playing() {
            self.handle.play()?;
            self.retry_count = 0;
        }
        Ok(())
    }

    fn schedule_retry(&mut self, err: SoundError) {
        if self.retry_count < self.max_retries {
            self.retry_count += 1;
            warn!(
                "sound '{}' failed to play ({}), retry {}/{} in {}s",
                self.name, err, self.retry_count, self.max_retries, self.retry_delay
            );
            self.pending_retry = Some(self.retry_delay);
        } else {
            warn!(
                "sound '{}' failed to play ({}), giving up after {} retries",
                self.name, err, self.max_retries
            );
            self.pending_retry = None;
        }
    }

    pub fn stop(&mut self) {
        if self.handle.is_playing() {
            self.handle.stop();
        }
        self.retry_count = 0;
        self.cancel_retry();
    }

    pub fn pause(&mut self) {
        if self.handle.is_playing() {
            self.handle.pause();
        }
        self.cancel_retry();
    }

    fn cancel_retry(&mut self) {
        if self.pending_retry.take().is_some() {
            debug!("sound '{}' retry cancelled", self.name);
        }
    }

    /// Advance the retry timer by `delta` seconds, replaying when it expires.
    pub fn tick(&mut self, delta: f32) {
        let Some(remaining) = self.pending_retry.as_mut() else {
            return;
        };
        *remaining -= delta;
        if *remaining <= 0.0 {
            self.pending_retry = None;
            self.play();
        }
    }

    pub fn on_audio_message(&mut self, msg: &AudioMessage) {
        self.handle.on_audio_message(msg);
    }
}

/// The robot's walk loop and jump cue.
#[derive(Component)]
pub struct RobotSounds {
    pub walk: Sound,
    pub jump: Sound,
}

impl RobotSounds {
    pub fn new(walk: Sound, jump: Sound) -> Self {
        Self { walk, jump }
    }

    /// Sounds backed by the audio thread. Load commands are sent immediately.
    pub fn from_bridge(bridge: &AudioBridge, config: &RobotConfig) -> Self {
        let walk = BridgeSound::music(
            bridge.tx_cmd.clone(),
            "robot_walk",
            &config.walk_sound_path,
            config.walk_volume,
        );
        let jump = BridgeSound::effect(
            bridge.tx_cmd.clone(),
            "robot_jump",
            &config.jump_sound_path,
            config.jump_volume,
        );
        Self::from_handles(Box::new(walk), Box::new(jump), config)
    }

    pub fn from_handles(
        walk: Box<dyn SoundHandle>,
        jump: Box<dyn SoundHandle>,
        config: &RobotConfig,
    ) -> Self {
        Self {
            walk: Sound::new("walk", walk)
                .with_retry(config.sound_max_retries, config.sound_retry_delay),
            jump: Sound::new("jump", jump)
                .with_retry(config.sound_max_retries, config.sound_retry_delay),
        }
    }

    pub fn silent() -> Self {
        Self::new(
            Sound::new("walk", Box::new(NullSound::default())),
            Sound::new("jump", Box::new(NullSound::default())),
        )
    }

    pub fn tick(&mut self, delta: f32) {
        self.walk.tick(delta);
        self.jump.tick(delta);
    }

    pub fn stop_all(&mut self) {
        self.walk.stop();
        self.jump.stop();
    }
}
