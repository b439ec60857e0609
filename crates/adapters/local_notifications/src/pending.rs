//! A registered request and the bookkeeping needed to decide when it fires.

use chrono::{NaiveDateTime, TimeDelta, Timelike};

use alarmgroups_domain::notification::{NotificationRequest, Trigger};

/// Outcome of polling a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Firing {
    NotYet,
    /// Deliver now; keep the request pending when `repeats` is set.
    Fire { repeats: bool },
}

#[derive(Debug, Clone)]
pub(crate) struct Pending {
    pub(crate) request: NotificationRequest,
    registered_at: NaiveDateTime,
    last_fired: Option<NaiveDateTime>,
}

impl Pending {
    pub(crate) fn new(request: NotificationRequest, registered_at: NaiveDateTime) -> Self {
        Self {
            request,
            registered_at,
            last_fired: None,
        }
    }

    /// Decide whether the request fires at local time `now`, recording the
    /// firing so that it is not repeated within the same period.
    pub(crate) fn poll(&mut self, now: NaiveDateTime) -> Firing {
        match self.request.trigger {
            Trigger::Calendar {
                hour,
                minute,
                repeats,
            } => {
                let Some(minute_start) = now.date().and_hms_opt(now.hour(), now.minute(), 0)
                else {
                    return Firing::NotYet;
                };
                if now.hour() != hour
                    || now.minute() != minute
                    || self.last_fired == Some(minute_start)
                {
                    return Firing::NotYet;
                }
                self.last_fired = Some(minute_start);
                Firing::Fire { repeats }
            }
            Trigger::Interval { after, repeats } => {
                let base = self.last_fired.unwrap_or(self.registered_at);
                let deadline = TimeDelta::from_std(after)
                    .ok()
                    .and_then(|delta| base.checked_add_signed(delta));
                match deadline {
                    Some(deadline) if now >= deadline => {
                        self.last_fired = Some(now);
                        Firing::Fire { repeats }
                    }
                    _ => Firing::NotYet,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alarmgroups_domain::alarm::Alarm;
    use alarmgroups_domain::time::clock_time;
    use chrono::NaiveDate;
    use std::time::Duration;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 11, 11)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    fn alarm_at(hour: u32, minute: u32) -> Pending {
        let alarm = Alarm::new(clock_time(hour, minute).unwrap());
        Pending::new(NotificationRequest::for_alarm(&alarm), at(0, 0, 0))
    }

    #[test]
    fn should_fire_calendar_trigger_in_its_minute() {
        let mut pending = alarm_at(7, 10);
        assert_eq!(pending.poll(at(7, 9, 59)), Firing::NotYet);
        assert_eq!(pending.poll(at(7, 10, 3)), Firing::Fire { repeats: true });
    }

    #[test]
    fn should_fire_calendar_trigger_once_per_minute() {
        let mut pending = alarm_at(7, 10);
        assert_eq!(pending.poll(at(7, 10, 0)), Firing::Fire { repeats: true });
        assert_eq!(pending.poll(at(7, 10, 30)), Firing::NotYet);
        assert_eq!(pending.poll(at(7, 11, 0)), Firing::NotYet);
    }

    #[test]
    fn should_fire_calendar_trigger_again_next_day() {
        let mut pending = alarm_at(7, 10);
        assert_eq!(pending.poll(at(7, 10, 0)), Firing::Fire { repeats: true });
        let tomorrow = at(7, 10, 0) + TimeDelta::days(1);
        assert_eq!(pending.poll(tomorrow), Firing::Fire { repeats: true });
    }

    #[test]
    fn should_fire_interval_trigger_after_delay() {
        let mut request = NotificationRequest::test_alarm();
        request.trigger = Trigger::Interval {
            after: Duration::from_secs(30),
            repeats: false,
        };
        let mut pending = Pending::new(request, at(8, 0, 0));

        assert_eq!(pending.poll(at(8, 0, 29)), Firing::NotYet);
        assert_eq!(pending.poll(at(8, 0, 30)), Firing::Fire { repeats: false });
    }

    #[test]
    fn should_measure_repeating_interval_from_last_firing() {
        let mut request = NotificationRequest::test_alarm();
        request.trigger = Trigger::Interval {
            after: Duration::from_secs(60),
            repeats: true,
        };
        let mut pending = Pending::new(request, at(8, 0, 0));

        assert_eq!(pending.poll(at(8, 1, 5)), Firing::Fire { repeats: true });
        assert_eq!(pending.poll(at(8, 2, 0)), Firing::NotYet);
        assert_eq!(pending.poll(at(8, 2, 5)), Firing::Fire { repeats: true });
    }
}
