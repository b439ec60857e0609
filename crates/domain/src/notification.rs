//! Notification requests, categories and user responses.
//!
//! Every alarm is turned into exactly one [`NotificationRequest`] through
//! [`NotificationRequest::for_alarm`], keyed by the alarm id. Registering a
//! request with an id that is already pending replaces the earlier one.

use std::fmt;
use std::time::Duration;

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::alarm::Alarm;
use crate::id::AlarmId;
use crate::time::{Timestamp, format_short};

/// Category attached to alarm notifications.
pub const ALARM_CATEGORY_ID: &str = "ALARM_CATEGORY";
/// Action that stops the ringing alarm.
pub const STOP_ACTION_ID: &str = "STOP_ALARM";
/// Action offered alongside stop. No special handling.
pub const SNOOZE_ACTION_ID: &str = "SNOOZE_ALARM";
/// Sound file played by alarm notifications.
pub const ALARM_SOUND_NAME: &str = "digital-alarm-clock-151920.mp3";
/// Identifier of the one-shot test notification.
pub const TEST_ALARM_ID: &str = "testAlarm";
/// Delay before the test notification fires.
pub const TEST_ALARM_DELAY: Duration = Duration::from_secs(30);

/// Identifier under which a notification is registered and cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<AlarmId> for NotificationId {
    fn from(id: AlarmId) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationSound {
    Default,
    Named(String),
}

/// How aggressively the notification may break through focus settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterruptionLevel {
    Active,
    TimeSensitive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub sound: NotificationSound,
    pub interruption_level: InterruptionLevel,
    pub category_id: Option<String>,
}

/// When a notification fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    /// Fires when the local wall clock reaches `hour:minute`.
    Calendar { hour: u32, minute: u32, repeats: bool },
    /// Fires once `after` has elapsed since registration.
    Interval { after: Duration, repeats: bool },
}

impl Trigger {
    #[must_use]
    pub fn repeats(&self) -> bool {
        match self {
            Self::Calendar { repeats, .. } | Self::Interval { repeats, .. } => *repeats,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub id: NotificationId,
    pub content: NotificationContent,
    pub trigger: Trigger,
}

impl NotificationRequest {
    /// The daily, repeating notification for one alarm.
    #[must_use]
    pub fn for_alarm(alarm: &Alarm) -> Self {
        Self {
            id: alarm.id.into(),
            content: NotificationContent {
                title: alarm.title().to_string(),
                body: format_short(alarm.time),
                sound: NotificationSound::Named(ALARM_SOUND_NAME.to_string()),
                interruption_level: InterruptionLevel::TimeSensitive,
                category_id: Some(ALARM_CATEGORY_ID.to_string()),
            },
            trigger: Trigger::Calendar {
                hour: alarm.time.hour(),
                minute: alarm.time.minute(),
                repeats: true,
            },
        }
    }

    /// A one-shot notification firing [`TEST_ALARM_DELAY`] after registration.
    #[must_use]
    pub fn test_alarm() -> Self {
        Self {
            id: NotificationId::new(TEST_ALARM_ID),
            content: NotificationContent {
                title: "Test Alarm".to_string(),
                body: "Testing alarm sound".to_string(),
                sound: NotificationSound::Named(ALARM_SOUND_NAME.to_string()),
                interruption_level: InterruptionLevel::TimeSensitive,
                category_id: Some(ALARM_CATEGORY_ID.to_string()),
            },
            trigger: Trigger::Interval {
                after: TEST_ALARM_DELAY,
                repeats: false,
            },
        }
    }
}

/// A button shown on a delivered notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub id: String,
    pub title: String,
    /// Bring the application to the foreground when chosen.
    pub foreground: bool,
}

/// A named set of actions attached to notifications by `category_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationCategory {
    pub id: String,
    pub actions: Vec<NotificationAction>,
}

impl NotificationCategory {
    /// The alarm category with its stop and snooze actions.
    #[must_use]
    pub fn alarm() -> Self {
        Self {
            id: ALARM_CATEGORY_ID.to_string(),
            actions: vec![
                NotificationAction {
                    id: STOP_ACTION_ID.to_string(),
                    title: "Stop".to_string(),
                    foreground: true,
                },
                NotificationAction {
                    id: SNOOZE_ACTION_ID.to_string(),
                    title: "Snooze".to_string(),
                    foreground: true,
                },
            ],
        }
    }
}

/// A notification that has fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredNotification {
    pub request: NotificationRequest,
    pub delivered_at: Timestamp,
}

/// What the user did with a delivered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseAction {
    Stop,
    Snooze,
    /// Tapped the notification itself, or an action this app does not know.
    Default,
}

impl ResponseAction {
    #[must_use]
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier {
            STOP_ACTION_ID => Self::Stop,
            SNOOZE_ACTION_ID => Self::Snooze,
            _ => Self::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationResponse {
    pub notification_id: NotificationId,
    pub action: ResponseAction,
}
