//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`AlarmGroupsError`] via `From`. Adapter failures are boxed into the
//! variant matching the port they came through.

use crate::id::AlarmId;

/// Boxed error produced by an adapter behind a port.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error returned by domain constructors and application services.
#[derive(Debug, thiserror::Error)]
pub enum AlarmGroupsError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// Persisting or restoring the group list failed.
    #[error("storage error")]
    Storage(#[source] BoxedError),

    /// Registering or cancelling a notification failed.
    #[error("notification error")]
    Notification(#[source] BoxedError),

    /// Starting or stopping alarm playback failed.
    #[error("sound error")]
    Sound(#[source] BoxedError),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("interval must be at least {min} minute(s), got {actual}")]
    IntervalTooShort { min: u32, actual: u32 },

    #[error("{hour:02}:{minute:02} is not a valid time of day")]
    InvalidClockTime { hour: u32, minute: u32 },

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// An alarm id is already used by another alarm. Alarm ids double as
    /// notification ids and must be unique across all groups.
    #[error("alarm id {0} is already in use")]
    DuplicateAlarmId(AlarmId),
}

/// A lookup by id or position found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
