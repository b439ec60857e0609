//! Alarm — a single time of day with an enabled flag and a label.

use serde::{Deserialize, Serialize};

use crate::id::AlarmId;
use crate::time::{ClockTime, truncate_to_minute};

/// Title used for notifications of alarms without a label.
pub const DEFAULT_ALARM_TITLE: &str = "Alarm";

/// One scheduled time inside an [`AlarmGroup`](crate::group::AlarmGroup).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alarm {
    pub id: AlarmId,
    pub time: ClockTime,
    pub is_enabled: bool,
    #[serde(default)]
    pub label: String,
}

impl Alarm {
    /// Create an enabled, unlabelled alarm with a fresh id.
    #[must_use]
    pub fn new(time: ClockTime) -> Self {
        Self {
            id: AlarmId::new(),
            time: truncate_to_minute(time),
            is_enabled: true,
            label: String::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn toggle(&mut self) {
        self.is_enabled = !self.is_enabled;
    }

    pub fn update_time(&mut self, time: ClockTime) {
        self.time = truncate_to_minute(time);
    }

    pub fn update_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// The label, or [`DEFAULT_ALARM_TITLE`] when it is empty.
    #[must_use]
    pub fn title(&self) -> &str {
        if self.label.is_empty() {
            DEFAULT_ALARM_TITLE
        } else {
            &self.label
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::clock_time;

    #[test]
    fn should_create_enabled_alarm_without_label() {
        let alarm = Alarm::new(clock_time(7, 0).unwrap());
        assert!(alarm.is_enabled);
        assert!(alarm.label.is_empty());
        assert_eq!(alarm.title(), "Alarm");
    }

    #[test]
    fn should_use_label_as_title_when_present() {
        let alarm = Alarm::new(clock_time(7, 0).unwrap()).with_label("Get up");
        assert_eq!(alarm.title(), "Get up");
    }

    #[test]
    fn should_keep_id_when_editing() {
        let mut alarm = Alarm::new(clock_time(7, 0).unwrap());
        let id = alarm.id;
        alarm.toggle();
        alarm.update_time(clock_time(8, 15).unwrap());
        alarm.update_label("Later");

        assert_eq!(alarm.id, id);
        assert!(!alarm.is_enabled);
        assert_eq!(alarm.time, clock_time(8, 15).unwrap());
        assert_eq!(alarm.label, "Later");
    }

    #[test]
    fn should_default_label_when_missing_from_json() {
        let id = AlarmId::new();
        let json = format!(r#"{{"id":"{id}","time":"07:10:00","isEnabled":false}}"#);
        let alarm: Alarm = serde_json::from_str(&json).unwrap();
        assert_eq!(alarm.id, id);
        assert!(!alarm.is_enabled);
        assert!(alarm.label.is_empty());
    }
}
