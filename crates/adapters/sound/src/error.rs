//! Sound adapter error types.

use alarmgroups_domain::error::AlarmGroupsError;

/// Errors specific to alarm tone playback.
#[derive(Debug, thiserror::Error)]
pub enum SoundError {
    /// The sound file could not be opened.
    #[error("failed to open sound file: {0}")]
    Io(#[from] std::io::Error),

    /// The audio output device could not be opened.
    #[cfg(feature = "rodio")]
    #[error("audio output unavailable: {0}")]
    Stream(#[from] rodio::StreamError),

    /// The sound file is not a supported audio format.
    #[cfg(feature = "rodio")]
    #[error("failed to decode sound file: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),

    /// The playback thread has exited.
    #[error("playback thread stopped")]
    Disconnected,
}

impl From<SoundError> for AlarmGroupsError {
    fn from(err: SoundError) -> Self {
        Self::Sound(Box::new(err))
    }
}
