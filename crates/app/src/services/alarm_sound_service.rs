//! Alarm sound service — starts and stops the looping alarm tone.
//!
//! One instance is created by the composition root and handed to whoever
//! reacts to notification deliveries. It remembers whether the tone is
//! playing so that a second delivery does not start a second loop.

use alarmgroups_domain::error::AlarmGroupsError;

use crate::ports::AlarmPlayer;

/// Application service wrapping an [`AlarmPlayer`].
pub struct AlarmSoundService<P> {
    player: P,
    playing: bool,
}

impl<P: AlarmPlayer> AlarmSoundService<P> {
    pub fn new(player: P) -> Self {
        Self {
            player,
            playing: false,
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Start the alarm tone unless it is already playing.
    ///
    /// # Errors
    ///
    /// Returns [`AlarmGroupsError::Sound`] when the player fails; the service
    /// then stays silent.
    #[tracing::instrument(skip(self))]
    pub fn start(&mut self) -> Result<(), AlarmGroupsError> {
        if self.playing {
            tracing::debug!("alarm sound already playing");
            return Ok(());
        }
        self.player
            .play_looping()
            .inspect_err(|err| tracing::error!(error = %err, "failed to start alarm sound"))?;
        self.playing = true;
        tracing::info!("alarm sound started");
        Ok(())
    }

    /// Stop the alarm tone. Stopping when silent is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AlarmGroupsError::Sound`] when the player fails. The service
    /// is considered silent afterwards either way.
    #[tracing::instrument(skip(self))]
    pub fn stop(&mut self) -> Result<(), AlarmGroupsError> {
        if !self.playing {
            return Ok(());
        }
        self.playing = false;
        self.player
            .stop()
            .inspect_err(|err| tracing::error!(error = %err, "failed to stop alarm sound"))?;
        tracing::info!("alarm sound stopped");
        Ok(())
    }

    pub fn player(&self) -> &P {
        &self.player
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub(crate) struct CountingPlayer {
        pub(crate) starts: Mutex<usize>,
        pub(crate) stops: Mutex<usize>,
        pub(crate) broken: bool,
    }

    impl AlarmPlayer for CountingPlayer {
        fn play_looping(&self) -> Result<(), AlarmGroupsError> {
            if self.broken {
                return Err(AlarmGroupsError::Sound(Box::new(std::io::Error::other(
                    "no output device",
                ))));
            }
            *self.starts.lock().unwrap() += 1;
            Ok(())
        }

        fn stop(&self) -> Result<(), AlarmGroupsError> {
            *self.stops.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[test]
    fn should_start_only_once_when_already_playing() {
        let mut svc = AlarmSoundService::new(CountingPlayer::default());
        svc.start().unwrap();
        svc.start().unwrap();

        assert!(svc.is_playing());
        assert_eq!(*svc.player().starts.lock().unwrap(), 1);
    }

    #[test]
    fn should_ignore_stop_when_silent() {
        let mut svc = AlarmSoundService::new(CountingPlayer::default());
        svc.stop().unwrap();

        assert!(!svc.is_playing());
        assert_eq!(*svc.player().stops.lock().unwrap(), 0);
    }

    #[test]
    fn should_restart_after_stop() {
        let mut svc = AlarmSoundService::new(CountingPlayer::default());
        svc.start().unwrap();
        svc.stop().unwrap();
        svc.start().unwrap();

        assert!(svc.is_playing());
        assert_eq!(*svc.player().starts.lock().unwrap(), 2);
        assert_eq!(*svc.player().stops.lock().unwrap(), 1);
    }

    #[test]
    fn should_stay_silent_when_player_fails() {
        let mut svc = AlarmSoundService::new(CountingPlayer {
            broken: true,
            ..CountingPlayer::default()
        });

        let result = svc.start();

        assert!(matches!(result, Err(AlarmGroupsError::Sound(_))));
        assert!(!svc.is_playing());
    }
}
