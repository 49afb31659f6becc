//! Audio system implementation backed by a dedicated thread and Raylib.
//!
//! This module hosts the background audio thread and the systems that bridge
//! it with the ECS world:
//! - [`audio_thread`] runs on its own OS thread, owns the Raylib audio device,
//!   and processes [`AudioCmd`] messages, emitting [`AudioMessage`] responses.
//! - [`poll_audio_messages`] non-blockingly drains the audio thread's event
//!   receiver into Bevy ECS' message queue each frame.
//! - [`update_bevy_audio_messages`] advances the ECS message queue so newly
//!   written messages become readable by message subscribers.
//!
//! Raylib audio calls stay on a single thread; the game thread only talks to
//! it over channels.
//!
//! When the device cannot be opened the thread reports
//! [`AudioMessage::DeviceUnavailable`], queues load commands and waits for
//! [`AudioCmd::ResumeDevice`] before trying again.

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::AudioBridge;
use bevy_ecs::prelude::{MessageWriter, Messages, Res, ResMut};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::{debug, info, warn};
use raylib::core::audio::{Music, RaylibAudio, Sound};
use rustc_hash::{FxHashMap, FxHashSet};

/// Drain any pending events from the audio thread into the ECS
/// [`Messages<AudioMessage>`] mailbox.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut writer: MessageWriter<AudioMessage>) {
    writer.write_batch(bridge.rx_msg.try_iter());
}

/// Advance the ECS message queue for [`AudioMessage`].
///
/// Run this after [`poll_audio_messages`] in the schedule.
pub fn update_bevy_audio_messages(mut messages: ResMut<Messages<AudioMessage>>) {
    messages.update();
}

/// Entry point of the dedicated audio thread.
///
/// Blocks until it receives [`AudioCmd::Shutdown`] or every sender is gone.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_evt: Sender<AudioMessage>) {
    info!(
        "[audio] thread starting (id={:?})",
        std::thread::current().id()
    );

    let mut queued: Vec<AudioCmd> = Vec::new();
    loop {
        match RaylibAudio::init_audio_device() {
            Ok(audio) => {
                info!("[audio] device ready");
                let _ = tx_evt.send(AudioMessage::DeviceReady);
                run_device(&audio, std::mem::take(&mut queued), &rx_cmd, &tx_evt);
                break;
            }
            Err(e) => {
                warn!("[audio] device unavailable: {}", e);
                let _ = tx_evt.send(AudioMessage::DeviceUnavailable {
                    error: e.to_string(),
                });
                if !wait_for_resume(&rx_cmd, &mut queued) {
                    break;
                }
                info!("[audio] retrying device");
            }
        }
    }

    info!(
        "[audio] thread exiting (id={:?})",
        std::thread::current().id()
    );
}

/// Block until the device should be retried. Returns false on shutdown.
fn wait_for_resume(rx_cmd: &Receiver<AudioCmd>, queued: &mut Vec<AudioCmd>) -> bool {
    for cmd in rx_cmd.iter() {
        match cmd {
            AudioCmd::ResumeDevice => return true,
            AudioCmd::Shutdown => return false,
            cmd @ (AudioCmd::LoadMusic { .. } | AudioCmd::LoadFx { .. }) => {
                debug!("[audio] queued {:?}", cmd);
                queued.push(cmd);
            }
            other => debug!("[audio] dropped {:?} (no device)", other),
        }
    }
    false
}

/// Loaded tracks and their playback flags.
#[derive(Default)]
struct Tracks<'aud> {
    musics: FxHashMap<String, Music<'aud>>,
    playing: FxHashSet<String>,
    looped: FxHashSet<String>,
    sounds: FxHashMap<String, Sound<'aud>>,
    fx_playing: FxHashSet<String>,
}

impl<'aud> Tracks<'aud> {
    /// Apply one command. Returns false when the thread should exit.
    fn handle(
        &mut self,
        audio: &'aud RaylibAudio,
        cmd: AudioCmd,
        tx_evt: &Sender<AudioMessage>,
    ) -> bool {
        match cmd {
            AudioCmd::LoadMusic { id, path, volume } => match audio.new_music(&path) {
                Ok(music) => {
                    info!("[audio] loaded id='{}' path='{}'", id, path);
                    music.set_volume(volume);
                    self.musics.insert(id.clone(), music);
                    let _ = tx_evt.send(AudioMessage::MusicLoaded { id });
                }
                Err(e) => {
                    warn!(
                        "[audio] load failed id='{}' path='{}' error='{}'",
                        id, path, e
                    );
                    let _ = tx_evt.send(AudioMessage::MusicLoadFailed {
                        id,
                        error: e.to_string(),
                    });
                }
            },
            AudioCmd::PlayMusic {
                id,
                looped: want_loop,
            } => {
                if let Some(music) = self.musics.get(&id) {
                    debug!("[audio] play start id='{}' looped={}", id, want_loop);
                    music.seek_stream(0.0);
                    music.play_stream();
                    self.playing.insert(id.clone());
                    if want_loop {
                        self.looped.insert(id.clone());
                    } else {
                        self.looped.remove(&id);
                    }
                    let _ = tx_evt.send(AudioMessage::MusicPlayStarted { id });
                }
            }
            AudioCmd::StopMusic { id } => {
                if let Some(music) = self.musics.get(&id) {
                    debug!("[audio] stop id='{}'", id);
                    music.stop_stream();
                    self.playing.remove(&id);
                    self.looped.remove(&id);
                    let _ = tx_evt.send(AudioMessage::MusicStopped { id });
                }
            }
            AudioCmd::PauseMusic { id } => {
                if let Some(music) = self.musics.get(&id) {
                    debug!("[audio] pause id='{}'", id);
                    music.pause_stream();
                    self.playing.remove(&id);
                    let _ = tx_evt.send(AudioMessage::MusicPaused { id });
                }
            }
            AudioCmd::ResumeMusic { id } => {
                if let Some(music) = self.musics.get(&id) {
                    debug!("[audio] resume id='{}'", id);
                    music.resume_stream();
                    self.playing.insert(id.clone());
                    let _ = tx_evt.send(AudioMessage::MusicPlayStarted { id });
                }
            }
            AudioCmd::LoadFx { id, path, volume } => match audio.new_sound(&path) {
                Ok(sound) => {
                    info!("[audio] fx loaded id='{}' path='{}'", id, path);
                    sound.set_volume(volume);
                    self.sounds.insert(id.clone(), sound);
                    let _ = tx_evt.send(AudioMessage::FxLoaded { id });
                }
                Err(e) => {
                    warn!(
                        "[audio] fx load failed id='{}' path='{}' error='{}'",
                        id, path, e
                    );
                    let _ = tx_evt.send(AudioMessage::FxLoadFailed {
                        id,
                        error: e.to_string(),
                    });
                }
            },
            AudioCmd::PlayFx { id } => {
                if let Some(sound) = self.sounds.get(&id) {
                    debug!("[audio] fx play id='{}'", id);
                    sound.play();
                    self.fx_playing.insert(id.clone());
                    let _ = tx_evt.send(AudioMessage::FxPlayStarted { id });
                } else {
                    warn!("[audio] fx play failed id='{}' reason='not loaded'", id);
                }
            }
            AudioCmd::StopFx { id } => {
                if let Some(sound) = self.sounds.get(&id) {
                    debug!("[audio] fx stop id='{}'", id);
                    sound.stop();
                    self.fx_playing.remove(&id);
                    let _ = tx_evt.send(AudioMessage::FxStopped { id });
                }
            }
            AudioCmd::PauseFx { id } => {
                if let Some(sound) = self.sounds.get(&id) {
                    debug!("[audio] fx pause id='{}'", id);
                    sound.pause();
                    self.fx_playing.remove(&id);
                    let _ = tx_evt.send(AudioMessage::FxPaused { id });
                }
            }
            AudioCmd::ResumeFx { id } => {
                if let Some(sound) = self.sounds.get(&id) {
                    debug!("[audio] fx resume id='{}'", id);
                    sound.resume();
                    self.fx_playing.insert(id.clone());
                    let _ = tx_evt.send(AudioMessage::FxPlayStarted { id });
                }
            }
            AudioCmd::ResumeDevice => {
                let _ = tx_evt.send(AudioMessage::DeviceReady);
            }
            AudioCmd::Shutdown => {
                info!("[audio] shutdown requested");
                self.musics.clear();
                self.playing.clear();
                self.looped.clear();
                self.sounds.clear();
                self.fx_playing.clear();
                return false;
            }
        }
        true
    }

    /// Pump music streams and report tracks that ended on their own.
    fn pump(&mut self, tx_evt: &Sender<AudioMessage>) {
        let mut ended: Vec<String> = Vec::new();
        for id in self.playing.iter() {
            if let Some(music) = self.musics.get(id) {
                if music.is_stream_playing() {
                    music.update_stream();
                } else {
                    let len = music.get_time_length();
                    let played = music.get_time_played();
                    if played >= len - 0.01 {
                        ended.push(id.clone());
                    }
                }
            }
        }
        for id in ended {
            if self.looped.contains(&id) {
                if let Some(music) = self.musics.get(&id) {
                    debug!("[audio] restarting looped id='{}'", id);
                    music.seek_stream(0.0);
                    music.play_stream();
                }
            } else {
                debug!("[audio] finished id='{}'", id);
                self.playing.remove(&id);
                let _ = tx_evt.send(AudioMessage::MusicFinished { id });
            }
        }

        let fx_ended: Vec<String> = self
            .fx_playing
            .iter()
            .filter(|id| {
                !self
                    .sounds
                    .get(id.as_str())
                    .map(|sound| sound.is_playing())
                    .unwrap_or(false)
            })
            .cloned()
            .collect();
        for id in fx_ended {
            debug!("[audio] fx finished id='{}'", id);
            self.fx_playing.remove(&id);
            let _ = tx_evt.send(AudioMessage::FxFinished { id });
        }
    }
}

fn run_device(
    audio: &RaylibAudio,
    queued: Vec<AudioCmd>,
    rx_cmd: &Receiver<AudioCmd>,
    tx_evt: &Sender<AudioMessage>,
) {
    let mut tracks = Tracks::default();
    for cmd in queued {
        tracks.handle(audio, cmd, tx_evt);
    }

    'run: loop {
        loop {
            match rx_cmd.try_recv() {
                Ok(cmd) => {
                    if !tracks.handle(audio, cmd, tx_evt) {
                        break 'run;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!("[audio] all senders dropped");
                    break 'run;
                }
            }
        }
        tracks.pump(tx_evt);
        std::thread::sleep(std::time::Duration::from_millis(10));
    }
    // Tracks drop here, before `audio`.
}
