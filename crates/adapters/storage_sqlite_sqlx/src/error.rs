//! Storage-specific error type wrapping sqlx and serde errors.

use alarmgroups_domain::error::AlarmGroupsError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// The stored blob is not a valid alarm group list, or the list could
    /// not be encoded.
    #[error("JSON (de)serialization error")]
    Json(#[from] serde_json::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for AlarmGroupsError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
