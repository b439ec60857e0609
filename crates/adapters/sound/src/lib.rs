//! # alarmgroups-adapter-sound
//!
//! Implementations of the [`AlarmPlayer`] port.
//!
//! ## Responsibilities
//! - Loop the alarm tone through the default audio output (`rodio` feature)
//! - Fall back to a player that only logs when audio is unavailable
//!
//! ## Dependency rule
//! Depends on `alarmgroups-domain` (for errors) and `alarmgroups-app` (for the
//! port trait). Audio device handles never leave this crate.

mod config;
mod error;
mod logging;
#[cfg(feature = "rodio")]
mod rodio_player;

pub use config::SoundConfig;
pub use error::SoundError;
pub use logging::LoggingPlayer;
#[cfg(feature = "rodio")]
pub use rodio_player::RodioPlayer;

use alarmgroups_app::ports::AlarmPlayer;

/// Build the best player available for `config`.
///
/// With the `rodio` feature this opens the default output device, falling
/// back to [`LoggingPlayer`] when that fails.
#[cfg(feature = "rodio")]
#[must_use]
pub fn build_player(config: &SoundConfig) -> Box<dyn AlarmPlayer + Send + Sync> {
    match RodioPlayer::open(config) {
        Ok(player) => Box::new(player),
        Err(err) => {
            tracing::warn!(%err, "audio output unavailable, alarms will only be logged");
            Box::new(LoggingPlayer::new())
        }
    }
}

/// Build the best player available for `config`.
///
/// Built without the `rodio` feature, this is always a [`LoggingPlayer`].
#[cfg(not(feature = "rodio"))]
#[must_use]
pub fn build_player(config: &SoundConfig) -> Box<dyn AlarmPlayer + Send + Sync> {
    tracing::info!(path = %config.path.display(), "built without audio output, alarms will only be logged");
    Box::new(LoggingPlayer::new())
}

#[cfg(all(test, not(feature = "rodio")))]
mod tests {
    use super::*;

    #[test]
    fn should_fall_back_to_logging_player() {
        let player = build_player(&SoundConfig::default());
        player.play_looping().unwrap();
        player.stop().unwrap();
    }
}
