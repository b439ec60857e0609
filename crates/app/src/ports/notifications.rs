//! Notification port — registration and cancellation of scheduled notifications.

use std::future::Future;

use alarmgroups_domain::error::AlarmGroupsError;
use alarmgroups_domain::notification::{NotificationCategory, NotificationId, NotificationRequest};

/// A notification center able to fire [`NotificationRequest`]s later.
///
/// Implementations key pending requests by [`NotificationRequest::id`];
/// scheduling an id that is already pending replaces it.
pub trait NotificationScheduler {
    /// Ask for permission to show alerts and play sounds.
    ///
    /// Returns whether permission was granted.
    fn request_authorization(&self)
    -> impl Future<Output = Result<bool, AlarmGroupsError>> + Send;

    /// Replace the set of categories (and their actions) known to the center.
    fn register_categories(
        &self,
        categories: Vec<NotificationCategory>,
    ) -> impl Future<Output = Result<(), AlarmGroupsError>> + Send;

    /// Register one request.
    fn schedule(
        &self,
        request: NotificationRequest,
    ) -> impl Future<Output = Result<(), AlarmGroupsError>> + Send;

    /// Remove the pending request with `id`, if any.
    fn cancel(&self, id: NotificationId)
    -> impl Future<Output = Result<(), AlarmGroupsError>> + Send;

    /// Every request currently pending.
    fn pending(&self) -> impl Future<Output = Result<Vec<NotificationRequest>, AlarmGroupsError>> + Send;
}

impl<T: NotificationScheduler + Send + Sync> NotificationScheduler for std::sync::Arc<T> {
    fn request_authorization(
        &self,
    ) -> impl Future<Output = Result<bool, AlarmGroupsError>> + Send {
        (**self).request_authorization()
    }

    fn register_categories(
        &self,
        categories: Vec<NotificationCategory>,
    ) -> impl Future<Output = Result<(), AlarmGroupsError>> + Send {
        (**self).register_categories(categories)
    }

    fn schedule(
        &self,
        request: NotificationRequest,
    ) -> impl Future<Output = Result<(), AlarmGroupsError>> + Send {
        (**self).schedule(request)
    }

    fn cancel(
        &self,
        id: NotificationId,
    ) -> impl Future<Output = Result<(), AlarmGroupsError>> + Send {
        (**self).cancel(id)
    }

    fn pending(
        &self,
    ) -> impl Future<Output = Result<Vec<NotificationRequest>, AlarmGroupsError>> + Send {
        (**self).pending()
    }
}
