//! Local notification center error types.

use alarmgroups_domain::error::AlarmGroupsError;

/// Errors specific to the local notification center.
#[derive(Debug, thiserror::Error)]
pub enum LocalNotificationError {
    /// The receiving side of the delivery or response channel was dropped.
    #[error("notification channel closed")]
    ChannelClosed,
}

impl From<LocalNotificationError> for AlarmGroupsError {
    fn from(err: LocalNotificationError) -> Self {
        Self::Notification(Box::new(err))
    }
}
