//! Sound port — looping alarm playback.

use alarmgroups_domain::error::AlarmGroupsError;

/// Plays the alarm tone.
///
/// Calls are synchronous: starting and stopping an audio sink does not wait
/// on anything worth yielding for.
pub trait AlarmPlayer {
    /// Start playing the alarm tone on an endless loop.
    ///
    /// # Errors
    ///
    /// Returns [`AlarmGroupsError::Sound`] when the output device or the
    /// sound file is unavailable.
    fn play_looping(&self) -> Result<(), AlarmGroupsError>;

    /// Stop playback. Stopping a silent player is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AlarmGroupsError::Sound`] when the output device fails.
    fn stop(&self) -> Result<(), AlarmGroupsError>;
}

impl<T: AlarmPlayer + ?Sized> AlarmPlayer for Box<T> {
    fn play_looping(&self) -> Result<(), AlarmGroupsError> {
        (**self).play_looping()
    }

    fn stop(&self) -> Result<(), AlarmGroupsError> {
        (**self).stop()
    }
}
