//! Time and timestamp helpers.
//!
//! Alarms only carry hour/minute semantics. Arithmetic on them is done in
//! minutes since midnight so that stepping never wraps past 23:59.

use chrono::{DateTime, NaiveTime, Timelike, Utc};

use crate::error::ValidationError;

/// Hour/minute time of day. Seconds are always zero once normalized.
pub type ClockTime = NaiveTime;

/// UTC timestamp used for delivery times and deadlines.
pub type Timestamp = DateTime<Utc>;

/// Number of minutes in a day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Build a [`ClockTime`] from an hour and a minute.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidClockTime`] when `hour > 23` or
/// `minute > 59`.
pub fn clock_time(hour: u32, minute: u32) -> Result<ClockTime, ValidationError> {
    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or(ValidationError::InvalidClockTime { hour, minute })
}

/// Minutes elapsed since midnight, ignoring seconds.
#[must_use]
pub fn minute_of_day(time: ClockTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Inverse of [`minute_of_day`]. `None` when `minutes` is past the end of the day.
#[must_use]
pub fn from_minute_of_day(minutes: u32) -> Option<ClockTime> {
    if minutes >= MINUTES_PER_DAY {
        return None;
    }
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

/// Drop seconds and sub-second precision.
#[must_use]
pub fn truncate_to_minute(time: ClockTime) -> ClockTime {
    from_minute_of_day(minute_of_day(time)).unwrap_or(time)
}

/// Short, human-readable rendering such as `7:05 AM`.
#[must_use]
pub fn format_short(time: ClockTime) -> String {
    time.format("%-I:%M %p").to_string()
}
