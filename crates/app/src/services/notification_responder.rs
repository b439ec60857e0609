//! Notification responder — reacts to delivered notifications and to the
//! action the user picks on them.

use alarmgroups_domain::error::AlarmGroupsError;
use alarmgroups_domain::notification::{
    DeliveredNotification, NotificationResponse, ResponseAction,
};

use crate::ports::AlarmPlayer;
use crate::services::alarm_sound_service::AlarmSoundService;

/// Starts the alarm tone when a notification is presented and stops it on
/// the stop action.
pub struct NotificationResponder<P> {
    sound: AlarmSoundService<P>,
}

impl<P: AlarmPlayer> NotificationResponder<P> {
    pub fn new(sound: AlarmSoundService<P>) -> Self {
        Self { sound }
    }

    #[must_use]
    pub fn sound(&self) -> &AlarmSoundService<P> {
        &self.sound
    }

    /// A notification is being presented while the application runs.
    ///
    /// # Errors
    ///
    /// Returns [`AlarmGroupsError::Sound`] when the tone cannot start.
    #[tracing::instrument(skip_all, fields(notification_id = %notification.request.id))]
    pub fn will_present(
        &mut self,
        notification: &DeliveredNotification,
    ) -> Result<(), AlarmGroupsError> {
        tracing::info!(title = %notification.request.content.title, "alarm notification delivered");
        self.sound.start()
    }

    /// The user picked an action on a delivered notification.
    ///
    /// Only the stop action is handled; snooze and the default action just
    /// complete.
    ///
    /// # Errors
    ///
    /// Returns [`AlarmGroupsError::Sound`] when the tone cannot stop.
    #[tracing::instrument(skip_all, fields(notification_id = %response.notification_id, action = ?response.action))]
    pub fn did_receive(&mut self, response: &NotificationResponse) -> Result<(), AlarmGroupsError> {
        match response.action {
            ResponseAction::Stop => self.sound.stop(),
            ResponseAction::Snooze | ResponseAction::Default => Ok(()),
        }
    }

    /// Silence the tone regardless of any notification, e.g. on shutdown.
    ///
    /// # Errors
    ///
    /// Returns [`AlarmGroupsError::Sound`] when the tone cannot stop.
    pub fn silence(&mut self) -> Result<(), AlarmGroupsError> {
        self.sound.stop()
    }
}
