use bevy_ecs::message::Message;

/// Commands sent *to* the audio thread.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    LoadMusic { id: String, path: String, volume: f32 },
    PlayMusic { id: String, looped: bool },
    StopMusic { id: String },
    PauseMusic { id: String },
    ResumeMusic { id: String },
    LoadFx { id: String, path: String, volume: f32 },
    PlayFx { id: String },
    StopFx { id: String },
    PauseFx { id: String },
    ResumeFx { id: String },
    /// Retry opening the audio device after [`AudioMessage::DeviceUnavailable`].
    ResumeDevice,
    Shutdown,
}

/// Events sent *back* from the audio thread.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioMessage {
    DeviceReady,
    DeviceUnavailable { error: String },
    MusicLoaded { id: String },
    MusicLoadFailed { id: String, error: String },
    MusicPlayStarted { id: String },
    MusicPaused { id: String },
    MusicStopped { id: String },
    MusicFinished { id: String }, // reached end for non looping
    FxLoaded { id: String },
    FxLoadFailed { id: String, error: String },
    FxPlayStarted { id: String },
    FxPaused { id: String },
    FxStopped { id: String },
    FxFinished { id: String },
}

impl AudioMessage {
    /// Id of the track the message refers to, if any.
    pub fn id(&self) -> Option<&str> {
        match self {
            AudioMessage::DeviceReady | AudioMessage::DeviceUnavailable { .. } => None,
            AudioMessage::MusicLoaded { id }
            | AudioMessage::MusicLoadFailed { id, .. }
            | AudioMessage::MusicPlayStarted { id }
            | AudioMessage::MusicPaused { id }
            | AudioMessage::MusicStopped { id }
            | AudioMessage::MusicFinished { id }
            | AudioMessage::FxLoaded { id }
            | AudioMessage::FxLoadFailed { id, .. }
            | AudioMessage::FxPlayStarted { id }
            | AudioMessage::FxPaused { id }
            | AudioMessage::FxStopped { id }
            | AudioMessage::FxFinished { id } => Some(id),
        }
    }
}
