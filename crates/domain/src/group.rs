//! Alarm group — a named set of evenly spaced alarms generated once from a
//! start time, an end time and an interval.

use serde::{Deserialize, Serialize};

use crate::alarm::Alarm;
use crate::error::{AlarmGroupsError, NotFoundError, ValidationError};
use crate::id::{AlarmId, GroupId};
use crate::interval::Interval;
use crate::time::{ClockTime, from_minute_of_day, minute_of_day, truncate_to_minute};

/// Name given to a group when the caller does not provide one.
pub const DEFAULT_GROUP_NAME: &str = "New Alarm Group";

/// Produce the alarms of a group: one at `start`, then every `interval`
/// minutes, up to and including `end`.
///
/// Seconds of `start` and `end` are dropped first, so the first alarm is at
/// `start` truncated to the minute. Returns an empty list when `start` is
/// after `end`. Times never wrap past midnight, so the result holds at most
/// one alarm per minute of the day.
#[must_use]
pub fn generate_alarms(start: ClockTime, end: ClockTime, interval: Interval) -> Vec<Alarm> {
    let step = interval.minutes() as usize;
    (minute_of_day(start)..=minute_of_day(end))
        .step_by(step)
        .filter_map(from_minute_of_day)
        .map(Alarm::new)
        .collect()
}

/// A named collection of alarms with an overall enabled flag.
///
/// `alarms` is filled by [`generate_alarms`] at construction and is never
/// regenerated afterwards; individual alarms are edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmGroup {
    pub id: GroupId,
    pub name: String,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub interval: Interval,
    pub is_enabled: bool,
    pub alarms: Vec<Alarm>,
}

impl AlarmGroup {
    /// Create a builder for constructing an [`AlarmGroup`].
    #[must_use]
    pub fn builder() -> AlarmGroupBuilder {
        AlarmGroupBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AlarmGroupsError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), AlarmGroupsError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    pub fn toggle(&mut self) {
        self.is_enabled = !self.is_enabled;
    }

    /// Borrow the alarm at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when `index` is out of range.
    pub fn alarm(&self, index: usize) -> Result<&Alarm, NotFoundError> {
        self.alarms.get(index).ok_or_else(|| self.missing_alarm(index))
    }

    /// Mutably borrow the alarm at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when `index` is out of range.
    pub fn alarm_mut(&mut self, index: usize) -> Result<&mut Alarm, NotFoundError> {
        if index >= self.alarms.len() {
            return Err(self.missing_alarm(index));
        }
        Ok(&mut self.alarms[index])
    }

    /// Ids of every alarm in the group, in order.
    pub fn alarm_ids(&self) -> impl Iterator<Item = AlarmId> + '_ {
        self.alarms.iter().map(|alarm| alarm.id)
    }

    /// Alarms that should currently have a pending notification: none when
    /// the group is disabled, otherwise the individually enabled ones.
    pub fn active_alarms(&self) -> impl Iterator<Item = &Alarm> {
        self.alarms
            .iter()
            .filter(move |alarm| self.is_enabled && alarm.is_enabled)
    }

    /// Whether the alarm at `index` should currently be scheduled.
    #[must_use]
    pub fn is_alarm_active(&self, index: usize) -> bool {
        self.is_enabled && self.alarms.get(index).is_some_and(|a| a.is_enabled)
    }

    fn missing_alarm(&self, index: usize) -> NotFoundError {
        NotFoundError {
            entity: "Alarm",
            id: format!("{}[{index}]", self.id),
        }
    }
}

/// Step-by-step builder for [`AlarmGroup`].
#[derive(Debug, Default)]
pub struct AlarmGroupBuilder {
    id: Option<GroupId>,
    name: Option<String>,
    start_time: Option<ClockTime>,
    end_time: Option<ClockTime>,
    interval: Option<Interval>,
    is_enabled: Option<bool>,
}

impl AlarmGroupBuilder {
    #[must_use]
    pub fn id(mut self, id: GroupId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn start_time(mut self, start_time: ClockTime) -> Self {
        self.start_time = Some(start_time);
        self
    }

    #[must_use]
    pub fn end_time(mut self, end_time: ClockTime) -> Self {
        self.end_time = Some(end_time);
        self
    }

    #[must_use]
    pub fn interval(mut self, interval: Interval) -> Self {
        self.interval = Some(interval);
        self
    }

    #[must_use]
    pub fn enabled(mut self, is_enabled: bool) -> Self {
        self.is_enabled = Some(is_enabled);
        self
    }

    /// Consume the builder, generate the alarms, validate, and return an
    /// [`AlarmGroup`].
    ///
    /// # Errors
    ///
    /// Returns [`AlarmGroupsError::Validation`] if a time or the interval is
    /// missing, or if an explicitly provided name is empty.
    pub fn build(self) -> Result<AlarmGroup, AlarmGroupsError> {
        let start_time = truncate_to_minute(
            self.start_time
                .ok_or(ValidationError::MissingField("start_time"))?,
        );
        let end_time =
            truncate_to_minute(self.end_time.ok_or(ValidationError::MissingField("end_time"))?);
        let interval = self
            .interval
            .ok_or(ValidationError::MissingField("interval"))?;

        let group = AlarmGroup {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_else(|| DEFAULT_GROUP_NAME.to_string()),
            start_time,
            end_time,
            interval,
            is_enabled: self.is_enabled.unwrap_or(true),
            alarms: generate_alarms(start_time, end_time, interval),
        };
        group.validate()?;
        Ok(group)
    }
}
