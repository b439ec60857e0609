//! Storage port — persistence of the whole alarm group list.

use std::future::Future;

use alarmgroups_domain::error::AlarmGroupsError;
use alarmgroups_domain::group::AlarmGroup;

/// Saves and restores the full, ordered list of [`AlarmGroup`]s.
///
/// There is no incremental persistence: every save replaces the previous
/// list entirely. Implementations keep no copy of the list.
pub trait GroupStore {
    /// Restore the stored list. An empty list when nothing was saved yet.
    fn load(&self) -> impl Future<Output = Result<Vec<AlarmGroup>, AlarmGroupsError>> + Send;

    /// Replace the stored list with `groups`.
    fn save(&self, groups: &[AlarmGroup])
    -> impl Future<Output = Result<(), AlarmGroupsError>> + Send;
}

impl<T: GroupStore + Send + Sync> GroupStore for std::sync::Arc<T> {
    fn load(&self) -> impl Future<Output = Result<Vec<AlarmGroup>, AlarmGroupsError>> + Send {
        (**self).load()
    }

    fn save(
        &self,
        groups: &[AlarmGroup],
    ) -> impl Future<Output = Result<(), AlarmGroupsError>> + Send {
        (**self).save(groups)
    }
}
