//! A player that only logs. Used when no audio output is compiled in or
//! available.

use std::sync::atomic::{AtomicBool, Ordering};

use alarmgroups_app::ports::AlarmPlayer;
use alarmgroups_domain::error::AlarmGroupsError;

#[derive(Debug, Default)]
pub struct LoggingPlayer {
    playing: AtomicBool,
}

impl LoggingPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }
}

impl AlarmPlayer for LoggingPlayer {
    fn play_looping(&self) -> Result<(), AlarmGroupsError> {
        if !self.playing.swap(true, Ordering::SeqCst) {
            tracing::info!("alarm ringing");
        }
        Ok(())
    }

    fn stop(&self) -> Result<(), AlarmGroupsError> {
        if self.playing.swap(false, Ordering::SeqCst) {
            tracing::info!("alarm silenced");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_track_playing_state() {
        let player = LoggingPlayer::new();
        assert!(!player.is_playing());

        player.play_looping().unwrap();
        assert!(player.is_playing());

        player.stop().unwrap();
        assert!(!player.is_playing());
    }

    #[test]
    fn should_allow_stop_when_silent() {
        let player = LoggingPlayer::new();
        player.stop().unwrap();
        player.stop().unwrap();
        assert!(!player.is_playing());
    }
}
