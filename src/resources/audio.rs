//! ECS resources that bridge the main thread with the background audio thread.
//!
//! Use [`setup_audio`] once during initialization to spawn the audio thread
//! and insert the [`AudioBridge`] and `Messages<AudioMessage>` resources. Call
//! [`shutdown_audio`] during teardown to gracefully stop the thread and free
//! audio resources.
//!
//! [`BridgeSound`] is the [`SoundHandle`] that drives one track on that
//! thread.

use crate::components::sound::{SoundError, SoundHandle};
use crate::events::audio::{AudioCmd, AudioMessage};
use crate::systems::audio::audio_thread;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};

/// Shared bridge between the ECS world and the audio thread.
///
/// This resource is created by [`setup_audio`]. Sounds send commands via
/// [`AudioBridge::tx_cmd`] and the audio systems poll for events via
/// [`AudioBridge::rx_msg`].
#[derive(Resource)]
pub struct AudioBridge {
    /// Sender for [`AudioCmd`] messages (ECS -> audio thread).
    pub tx_cmd: Sender<AudioCmd>,
    /// Receiver for [`AudioMessage`] messages (audio thread -> ECS).
    pub rx_msg: Receiver<AudioMessage>,
    /// Join handle for the background audio thread.
    pub handle: std::thread::JoinHandle<()>,
}

/// Spawn the audio thread and register bridge resources.
pub fn setup_audio(world: &mut World) {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let (tx_msg, rx_msg) = unbounded::<AudioMessage>();

    let handle = std::thread::spawn(move || audio_thread(rx_cmd, tx_msg));

    world.insert_resource(AudioBridge {
        tx_cmd,
        rx_msg,
        handle,
    });
    world.insert_resource(Messages::<AudioMessage>::default());
}

/// Gracefully request shutdown of the audio thread and join it.
///
/// If the bridge resource exists, sends [`AudioCmd::Shutdown`], waits for the
/// thread to exit, and removes the resource from the world.
pub fn shutdown_audio(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<AudioBridge>() {
        let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
        let _ = bridge.handle.join();
    }
}

/// Streamed music or an in-memory effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Music { looped: bool },
    Effect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeviceState {
    Pending,
    Ready,
    Unavailable,
}

/// A track on the audio thread, addressed by id.
///
/// State is cached from [`AudioMessage`]s fed through
/// [`SoundHandle::on_audio_message`]. A play request marks the track as
/// playing right away so repeated requests in the same frame are ignored.
#[derive(Debug)]
pub struct BridgeSound {
    tx_cmd: Sender<AudioCmd>,
    id: String,
    kind: TrackKind,
    device: DeviceState,
    loaded: bool,
    playing: bool,
    paused: bool,
}

impl BridgeSound {
    /// Looping music stream. Sends the load command immediately.
    pub fn music(tx_cmd: Sender<AudioCmd>, id: &str, path: &str, volume: f32) -> Self {
        let _ = tx_cmd.send(AudioCmd::LoadMusic {
            id: id.to_string(),
            path: path.to_string(),
            volume,
        });
        Self::new(tx_cmd, id, TrackKind::Music { looped: true })
    }

    /// One-shot effect. Sends the load command immediately.
    pub fn effect(tx_cmd: Sender<AudioCmd>, id: &str, path: &str, volume: f32) -> Self {
        let _ = tx_cmd.send(AudioCmd::LoadFx {
            id: id.to_string(),
            path: path.to_string(),
            volume,
        });
        Self::new(tx_cmd, id, TrackKind::Effect)
    }

    fn new(tx_cmd: Sender<AudioCmd>, id: &str, kind: TrackKind) -> Self {
        Self {
            tx_cmd,
            id: id.to_string(),
            kind,
            device: DeviceState::Pending,
            loaded: false,
            playing: false,
            paused: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn send(&self, cmd: AudioCmd) -> Result<(), SoundError> {
        self.tx_cmd.send(cmd).map_err(|_| SoundError::Disconnected)
    }
}

impl SoundHandle for BridgeSound {
    fn is_playing(&self) -> bool {
        self.playing
    }

    fn is_suspended(&self) -> bool {
        self.device == DeviceState::Unavailable
    }

    fn resume(&mut self) -> Result<(), SoundError> {
        self.send(AudioCmd::ResumeDevice)?;
        // The device reports back asynchronously.
        self.device = DeviceState::Pending;
        Ok(())
    }

    fn play(&mut self) -> Result<(), SoundError> {
        if self.device == DeviceState::Unavailable {
            return Err(SoundError::DeviceUnavailable);
        }
        if !self.loaded {
            return Err(SoundError::NotLoaded);
        }
        let id = self.id.clone();
        let cmd = match (self.kind, self.paused) {
            (TrackKind::Music { .. }, true) => AudioCmd::ResumeMusic { id },
            (TrackKind::Music { looped }, false) => AudioCmd::PlayMusic { id, looped },
            (TrackKind::Effect, true) => AudioCmd::ResumeFx { id },
            (TrackKind::Effect, false) => AudioCmd::PlayFx { id },
        };
        self.send(cmd)?;
        self.playing = true;
        self.paused = false;
        Ok(())
    }

    fn stop(&mut self) {
        let id = self.id.clone();
        let cmd = match self.kind {
            TrackKind::Music { .. } => AudioCmd::StopMusic { id },
            TrackKind::Effect => AudioCmd::StopFx { id },
        };
        let _ = self.send(cmd);
        self.playing = false;
        self.paused = false;
    }

    fn pause(&mut self) {
        let id = self.id.clone();
        let cmd = match self.kind {
            TrackKind::Music { .. } => AudioCmd::PauseMusic { id },
            TrackKind::Effect => AudioCmd::PauseFx { id },
        };
        let _ = self.send(cmd);
        self.playing = false;
        self.paused = true;
    }

    fn on_audio_message(&mut self, msg: &AudioMessage) {
        match msg {
            AudioMessage::DeviceReady => self.device = DeviceState::Ready,
            AudioMessage::DeviceUnavailable { .. } => {
                self.device = DeviceState::Unavailable;
                self.playing = false;
            }
            _ => {}
        }
        if msg.id() != Some(self.id.as_str()) {
            return;
        }
        match msg {
            AudioMessage::MusicLoaded { .. } | AudioMessage::FxLoaded { .. } => {
                self.loaded = true;
            }
            AudioMessage::MusicLoadFailed { .. } | AudioMessage::FxLoadFailed { .. } => {
                self.loaded = false;
                self.playing = false;
            }
            AudioMessage::MusicPlayStarted { .. } | AudioMessage::FxPlayStarted { .. } => {
                self.playing = true;
                self.paused = false;
            }
            AudioMessage::MusicPaused { .. } | AudioMessage::FxPaused { .. } => {
                self.playing = false;
                self.paused = true;
            }
            AudioMessage::MusicStopped { .. }
            | AudioMessage::MusicFinished { .. }
            | AudioMessage::FxStopped { .. }
            | AudioMessage::FxFinished { .. } => {
                self.playing = false;
                self.paused = false;
            }
            AudioMessage::DeviceReady | AudioMessage::DeviceUnavailable { .. } => {}
        }
    }
}
