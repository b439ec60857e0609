//! Interval — spacing, in minutes, between consecutive alarms of a group.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Smallest accepted interval. Anything below would never advance the generator.
pub const MIN_INTERVAL_MINUTES: u32 = 1;

/// Interval choices offered when creating a group.
pub const PRESET_MINUTES: [u32; 3] = [5, 10, 15];

/// A validated, strictly positive number of minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Interval(u32);

impl Interval {
    /// # Errors
    ///
    /// Returns [`ValidationError::IntervalTooShort`] when `minutes` is below
    /// [`MIN_INTERVAL_MINUTES`].
    pub fn from_minutes(minutes: u32) -> Result<Self, ValidationError> {
        if minutes < MIN_INTERVAL_MINUTES {
            return Err(ValidationError::IntervalTooShort {
                min: MIN_INTERVAL_MINUTES,
                actual: minutes,
            });
        }
        Ok(Self(minutes))
    }

    #[must_use]
    pub fn minutes(self) -> u32 {
        self.0
    }

    /// The preset intervals, in display order.
    #[must_use]
    pub fn presets() -> Vec<Self> {
        PRESET_MINUTES.iter().map(|&m| Self(m)).collect()
    }
}

impl TryFrom<u32> for Interval {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_minutes(value)
    }
}

impl From<Interval> for u32 {
    fn from(value: Interval) -> Self {
        value.0
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}
