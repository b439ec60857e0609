//! Alarm group service — the single owner of the in-memory group list.
//!
//! Every mutation updates the list, persists the whole list through the
//! [`GroupStore`], and brings pending notifications in line through the
//! [`NotificationScheduler`]. All steps run even when an earlier one fails;
//! the first failure is returned and the in-memory change is kept.

use std::collections::HashSet;

use alarmgroups_domain::alarm::Alarm;
use alarmgroups_domain::error::{AlarmGroupsError, NotFoundError, ValidationError};
use alarmgroups_domain::group::AlarmGroup;
use alarmgroups_domain::id::{AlarmId, GroupId};
use alarmgroups_domain::interval::Interval;
use alarmgroups_domain::notification::{NotificationCategory, NotificationRequest};
use alarmgroups_domain::time::ClockTime;

use crate::ports::{GroupStore, NotificationScheduler};

/// Application service for alarm group CRUD and notification bookkeeping.
pub struct AlarmGroupService<S, N> {
    store: S,
    scheduler: N,
    groups: Vec<AlarmGroup>,
}

impl<S, N> AlarmGroupService<S, N>
where
    S: GroupStore,
    N: NotificationScheduler,
{
    /// Create a service with an empty list. Call [`load`](Self::load) to
    /// restore persisted groups.
    pub fn new(store: S, scheduler: N) -> Self {
        Self {
            store,
            scheduler,
            groups: Vec::new(),
        }
    }

    /// All groups, in creation order.
    #[must_use]
    pub fn groups(&self) -> &[AlarmGroup] {
        &self.groups
    }

    /// Look up a group by id.
    ///
    /// # Errors
    ///
    /// Returns [`AlarmGroupsError::NotFound`] when no group has `id`.
    pub fn group(&self, id: GroupId) -> Result<&AlarmGroup, AlarmGroupsError> {
        Ok(&self.groups[self.position(id)?])
    }

    /// The injected store, for diagnostics and tests.
    #[doc(hidden)]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The injected scheduler, for diagnostics and tests.
    #[doc(hidden)]
    #[must_use]
    pub fn scheduler(&self) -> &N {
        &self.scheduler
    }

    /// Replace the in-memory list with the stored one and schedule every
    /// enabled group.
    ///
    /// Notifications of the list being replaced are cancelled first, so
    /// reloading never leaves requests for alarms that are gone.
    /// A list that cannot be restored is logged and replaced by an empty one,
    /// so a corrupt blob never prevents startup. Returns the number of
    /// groups restored.
    ///
    /// # Errors
    ///
    /// Returns the first notification error hit while cancelling or
    /// rescheduling.
    #[tracing::instrument(skip(self))]
    pub async fn load(&mut self) -> Result<usize, AlarmGroupsError> {
        let previous: Vec<AlarmId> = self.groups.iter().flat_map(AlarmGroup::alarm_ids).collect();
        let mut outcome = cancel_alarms(&self.scheduler, previous).await;

        self.groups = match self.store.load().await {
            Ok(groups) => groups,
            Err(err) => {
                tracing::warn!(error = %err, source = ?std::error::Error::source(&err), "failed to restore alarm groups, starting empty");
                Vec::new()
            }
        };

        for group in &self.groups {
            let result = schedule_alarms(&self.scheduler, group.active_alarms()).await;
            outcome = outcome.and(result);
        }
        tracing::info!(count = self.groups.len(), "alarm groups restored");
        outcome.map(|()| self.groups.len())
    }

    /// Ask the notification center for permission to alert.
    ///
    /// # Errors
    ///
    /// Returns a notification error propagated from the scheduler.
    #[tracing::instrument(skip(self))]
    pub async fn request_authorization(&self) -> Result<bool, AlarmGroupsError> {
        let granted = self.scheduler.request_authorization().await?;
        if !granted {
            tracing::warn!("notification permission denied, alarms will not alert");
        }
        Ok(granted)
    }

    /// Register the alarm category and its stop/snooze actions.
    ///
    /// # Errors
    ///
    /// Returns a notification error propagated from the scheduler.
    pub async fn register_categories(&self) -> Result<(), AlarmGroupsError> {
        self.scheduler
            .register_categories(vec![NotificationCategory::alarm()])
            .await
    }

    /// Schedule the one-shot test notification.
    ///
    /// # Errors
    ///
    /// Returns a notification error propagated from the scheduler.
    #[tracing::instrument(skip(self))]
    pub async fn schedule_test_alarm(&self) -> Result<(), AlarmGroupsError> {
        self.scheduler
            .schedule(NotificationRequest::test_alarm())
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "failed to schedule test alarm"))
    }

    /// Create a group, generate its alarms and schedule them.
    ///
    /// # Errors
    ///
    /// Returns [`AlarmGroupsError::Validation`] for an empty name (nothing is
    /// changed in that case), otherwise the first storage or notification error.
    #[tracing::instrument(skip(self, name, start, end), fields(group_name))]
    pub async fn create_group(
        &mut self,
        name: impl Into<String>,
        start: ClockTime,
        end: ClockTime,
        interval: Interval,
    ) -> Result<AlarmGroup, AlarmGroupsError> {
        let group = AlarmGroup::builder()
            .name(name)
            .start_time(start)
            .end_time(end)
            .interval(interval)
            .build()?;
        tracing::Span::current().record("group_name", group.name.as_str());

        self.groups.push(group.clone());
        let persisted = self.persist().await;
        let scheduled = schedule_alarms(&self.scheduler, group.active_alarms()).await;
        tracing::debug!(alarms = group.alarms.len(), "alarm group created");

        persisted.and(scheduled).map(|()| group)
    }

    /// Flip a group's enabled flag. Enabling schedules its individually
    /// enabled alarms, disabling cancels all of them. Alarm flags are kept.
    ///
    /// Returns the new enabled state.
    ///
    /// # Errors
    ///
    /// Returns [`AlarmGroupsError::NotFound`] for an unknown id, otherwise
    /// the first storage or notification error.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_group(&mut self, id: GroupId) -> Result<bool, AlarmGroupsError> {
        let index = self.position(id)?;
        self.groups[index].toggle();
        let group = self.groups[index].clone();

        let persisted = self.persist().await;
        let notified = if group.is_enabled {
            schedule_alarms(&self.scheduler, group.active_alarms()).await
        } else {
            cancel_alarms(&self.scheduler, group.alarm_ids()).await
        };

        persisted.and(notified).map(|()| group.is_enabled)
    }

    /// Delete the groups at `indices`, cancelling all of their notifications.
    ///
    /// Duplicate indices are ignored. Returns the removed groups in list order.
    ///
    /// # Errors
    ///
    /// Returns [`AlarmGroupsError::NotFound`] if any index is out of range
    /// (nothing is deleted in that case), otherwise the first notification or
    /// storage error.
    #[tracing::instrument(skip(self))]
    pub async fn delete_groups(
        &mut self,
        indices: &[usize],
    ) -> Result<Vec<AlarmGroup>, AlarmGroupsError> {
        let mut indices = indices.to_vec();
        indices.sort_unstable();
        indices.dedup();
        if let Some(&index) = indices.iter().find(|&&index| index >= self.groups.len()) {
            return Err(NotFoundError {
                entity: "AlarmGroup",
                id: format!("#{index}"),
            }
            .into());
        }

        let mut cancelled = Ok(());
        for &index in &indices {
            let result = cancel_alarms(&self.scheduler, self.groups[index].alarm_ids()).await;
            cancelled = cancelled.and(result);
        }

        let mut removed: Vec<AlarmGroup> = indices
            .iter()
            .rev()
            .map(|&index| self.groups.remove(index))
            .collect();
        removed.reverse();

        let persisted = self.persist().await;
        tracing::debug!(count = removed.len(), "alarm groups deleted");

        persisted.and(cancelled).map(|()| removed)
    }

    /// Delete one group by id.
    ///
    /// # Errors
    ///
    /// Same as [`delete_groups`](Self::delete_groups).
    pub async fn delete_group(&mut self, id: GroupId) -> Result<AlarmGroup, AlarmGroupsError> {
        let index = self.position(id)?;
        let mut removed = self.delete_groups(&[index]).await?;
        removed.pop().ok_or_else(|| Self::missing_group(id))
    }

    /// Replace the stored group with the same id.
    ///
    /// Every notification of the previous version is cancelled, then the new
    /// version's active alarms are scheduled if the group is enabled. Alarms
    /// are not diffed one by one.
    ///
    /// # Errors
    ///
    /// Returns [`AlarmGroupsError::Validation`] (empty name, or an alarm id
    /// repeated within the group or used by another group) or
    /// [`AlarmGroupsError::NotFound`] without side effects, otherwise the
    /// first storage or notification error.
    #[tracing::instrument(skip(self, group), fields(group_id = %group.id))]
    pub async fn update_group(&mut self, group: AlarmGroup) -> Result<(), AlarmGroupsError> {
        group.validate()?;
        let index = self.position(group.id)?;
        self.check_alarm_ids(index, &group)?;
        let previous = std::mem::replace(&mut self.groups[index], group.clone());

        let persisted = self.persist().await;
        let cancelled = cancel_alarms(&self.scheduler, previous.alarm_ids()).await;
        let scheduled = schedule_alarms(&self.scheduler, group.active_alarms()).await;

        persisted.and(cancelled).and(scheduled)
    }

    /// Flip one alarm's enabled flag and schedule or cancel exactly its
    /// notification. An alarm of a disabled group is never scheduled.
    ///
    /// Returns the alarm's new enabled state.
    ///
    /// # Errors
    ///
    /// Returns [`AlarmGroupsError::NotFound`] for an unknown group or index,
    /// otherwise the first storage or notification error.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_alarm(
        &mut self,
        group_id: GroupId,
        index: usize,
    ) -> Result<bool, AlarmGroupsError> {
        let group_index = self.position(group_id)?;
        let group = &mut self.groups[group_index];
        group.alarm_mut(index)?.toggle();
        let alarm = group.alarms[index].clone();
        let active = group.is_alarm_active(index);

        let persisted = self.persist().await;
        let notified = if active {
            schedule_alarms(&self.scheduler, [&alarm]).await
        } else {
            cancel_alarms(&self.scheduler, [alarm.id]).await
        };

        persisted.and(notified).map(|()| alarm.is_enabled)
    }

    /// Change one alarm's time and label. Its old notification is cancelled
    /// and a new one registered if the alarm is active.
    ///
    /// # Errors
    ///
    /// Returns [`AlarmGroupsError::NotFound`] for an unknown group or index,
    /// otherwise the first notification or storage error.
    #[tracing::instrument(skip(self, label))]
    pub async fn update_alarm(
        &mut self,
        group_id: GroupId,
        index: usize,
        time: ClockTime,
        label: impl Into<String>,
    ) -> Result<(), AlarmGroupsError> {
        let group_index = self.position(group_id)?;
        let alarm_id = self.groups[group_index].alarm(index)?.id;

        let cancelled = cancel_alarms(&self.scheduler, [alarm_id]).await;

        let group = &mut self.groups[group_index];
        let alarm = group.alarm_mut(index)?;
        alarm.update_time(time);
        alarm.update_label(label);
        let alarm = alarm.clone();
        let active = group.is_alarm_active(index);

        let persisted = self.persist().await;
        let scheduled = if active {
            schedule_alarms(&self.scheduler, [&alarm]).await
        } else {
            Ok(())
        };

        cancelled.and(persisted).and(scheduled)
    }

    /// Change one alarm's time, keeping its label.
    ///
    /// # Errors
    ///
    /// Same as [`update_alarm`](Self::update_alarm).
    pub async fn update_alarm_time(
        &mut self,
        group_id: GroupId,
        index: usize,
        time: ClockTime,
    ) -> Result<(), AlarmGroupsError> {
        let label = self.group(group_id)?.alarm(index)?.label.clone();
        self.update_alarm(group_id, index, time, label).await
    }

    /// Rename a group. Notifications are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AlarmGroupsError::Validation`] for an empty name or
    /// [`AlarmGroupsError::NotFound`] for an unknown id, otherwise a storage error.
    #[tracing::instrument(skip(self, new_name))]
    pub async fn rename_group(
        &mut self,
        id: GroupId,
        new_name: impl Into<String>,
    ) -> Result<(), AlarmGroupsError> {
        let new_name = new_name.into();
        if new_name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let index = self.position(id)?;
        self.groups[index].name = new_name;
        self.persist().await
    }

    async fn persist(&self) -> Result<(), AlarmGroupsError> {
        self.store
            .save(&self.groups)
            .await
            .inspect_err(|err| tracing::error!(error = %err, "failed to persist alarm groups"))
    }

    /// Alarm ids of `group` must be distinct and unused by every group other
    /// than the one at `index`.
    fn check_alarm_ids(&self, index: usize, group: &AlarmGroup) -> Result<(), AlarmGroupsError> {
        let taken: HashSet<AlarmId> = self
            .groups
            .iter()
            .enumerate()
            .filter(|(position, _)| *position != index)
            .flat_map(|(_, other)| other.alarm_ids())
            .collect();
        let mut seen = HashSet::with_capacity(group.alarms.len());
        for id in group.alarm_ids() {
            if taken.contains(&id) || !seen.insert(id) {
                return Err(ValidationError::DuplicateAlarmId(id).into());
            }
        }
        Ok(())
    }

    fn position(&self, id: GroupId) -> Result<usize, AlarmGroupsError> {
        self.groups
            .iter()
            .position(|group| group.id == id)
            .ok_or_else(|| Self::missing_group(id))
    }

    fn missing_group(id: GroupId) -> AlarmGroupsError {
        NotFoundError {
            entity: "AlarmGroup",
            id: id.to_string(),
        }
        .into()
    }
}

/// Schedule every alarm, continuing past failures. Returns the first error.
async fn schedule_alarms<'a, N>(
    scheduler: &N,
    alarms: impl IntoIterator<Item = &'a Alarm>,
) -> Result<(), AlarmGroupsError>
where
    N: NotificationScheduler,
{
    let mut outcome = Ok(());
    for alarm in alarms {
        if let Err(err) = scheduler.schedule(NotificationRequest::for_alarm(alarm)).await {
            tracing::warn!(alarm_id = %alarm.id, error = %err, "failed to schedule alarm notification");
            outcome = outcome.and(Err(err));
        }
    }
    outcome
}

/// Cancel every id, continuing past failures. Returns the first error.
async fn cancel_alarms<N>(
    scheduler: &N,
    ids: impl IntoIterator<Item = AlarmId>,
) -> Result<(), AlarmGroupsError>
where
    N: NotificationScheduler,
{
    let mut outcome = Ok(());
    for id in ids {
        if let Err(err) = scheduler.cancel(id.into()).await {
            tracing::warn!(alarm_id = %id, error = %err, "failed to cancel alarm notification");
            outcome = outcome.and(Err(err));
        }
    }
    outcome
}
