//! Console answers to the ringing alarm.
//!
//! The daemon has no notification UI, so lines typed on stdin stand in for
//! the actions shown on a delivered notification.

use alarmgroups_domain::notification::{NotificationId, SNOOZE_ACTION_ID, STOP_ACTION_ID};

/// Map one typed line to a notification action identifier.
#[must_use]
pub fn action_for(line: &str) -> Option<&'static str> {
    match line.trim().to_ascii_lowercase().as_str() {
        "s" | "stop" => Some(STOP_ACTION_ID),
        "z" | "snooze" => Some(SNOOZE_ACTION_ID),
        _ => None,
    }
}

/// Remembers the last delivered notification so typed actions can answer it.
#[derive(Debug, Default)]
pub struct Console {
    ringing: Option<NotificationId>,
}

impl Console {
    pub fn delivered(&mut self, id: NotificationId) {
        self.ringing = Some(id);
    }

    #[must_use]
    pub fn ringing(&self) -> Option<&NotificationId> {
        self.ringing.as_ref()
    }

    /// The response to publish for `line`, if it names an action and an
    /// alarm is ringing. Stopping forgets the ringing notification.
    pub fn answer(&mut self, line: &str) -> Option<(NotificationId, &'static str)> {
        let action = action_for(line)?;
        let id = if action == STOP_ACTION_ID {
            self.ringing.take()?
        } else {
            self.ringing.clone()?
        };
        Some((id, action))
    }
}
