//! In-process notification center.
//!
//! Pending requests live in memory, keyed by [`NotificationId`]. A background
//! loop spawned with [`LocalNotificationCenter::spawn`] checks them against
//! the local wall clock on every tick and publishes the ones that fire on the
//! delivery channel. User responses are published on a second channel.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{Local, NaiveDateTime};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use alarmgroups_app::ports::NotificationScheduler;
use alarmgroups_domain::error::AlarmGroupsError;
use alarmgroups_domain::notification::{
    DeliveredNotification, NotificationCategory, NotificationId, NotificationRequest,
    NotificationResponse, ResponseAction,
};
use alarmgroups_domain::time::now;

use crate::config::LocalCenterConfig;
use crate::error::LocalNotificationError;
use crate::pending::{Firing, Pending};

/// Receiving ends of the channels fed by a [`LocalNotificationCenter`].
#[derive(Debug)]
pub struct CenterChannels {
    pub deliveries: mpsc::UnboundedReceiver<DeliveredNotification>,
    pub responses: mpsc::UnboundedReceiver<NotificationResponse>,
}

#[derive(Debug, Default)]
struct State {
    pending: BTreeMap<NotificationId, Pending>,
    categories: Vec<NotificationCategory>,
    authorized: Option<bool>,
}

/// Notification center that keeps everything in process memory.
#[derive(Debug)]
pub struct LocalNotificationCenter {
    config: LocalCenterConfig,
    state: Mutex<State>,
    deliveries: mpsc::UnboundedSender<DeliveredNotification>,
    responses: mpsc::UnboundedSender<NotificationResponse>,
}

impl LocalNotificationCenter {
    #[must_use]
    pub fn new(config: LocalCenterConfig) -> (Self, CenterChannels) {
        let (delivery_tx, delivery_rx) = mpsc::unbounded_channel();
        let (response_tx, response_rx) = mpsc::unbounded_channel();
        let center = Self {
            config,
            state: Mutex::new(State::default()),
            deliveries: delivery_tx,
            responses: response_tx,
        };
        let channels = CenterChannels {
            deliveries: delivery_rx,
            responses: response_rx,
        };
        (center, channels)
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Outcome of the last authorization request, `None` before any.
    #[must_use]
    pub fn is_authorized(&self) -> Option<bool> {
        self.state().authorized
    }

    /// Categories registered so far.
    #[must_use]
    pub fn categories(&self) -> Vec<NotificationCategory> {
        self.state().categories.clone()
    }

    /// Register `request` as if it had been scheduled at local time `at`.
    ///
    /// Replaces any pending request with the same id.
    pub fn register_at(&self, request: NotificationRequest, at: NaiveDateTime) {
        let id = request.id.clone();
        let replaced = self
            .state()
            .pending
            .insert(id.clone(), Pending::new(request, at))
            .is_some();
        tracing::debug!(%id, replaced, "notification registered");
    }

    /// Deliver every pending request that fires at local time `local_now`.
    ///
    /// One-shot requests are removed once delivered. While authorization is
    /// denied, firings are consumed but nothing is published.
    ///
    /// # Errors
    ///
    /// Returns [`LocalNotificationError::ChannelClosed`] when the delivery
    /// receiver has been dropped.
    pub fn deliver_due(&self, local_now: NaiveDateTime) -> Result<usize, LocalNotificationError> {
        let (due, authorized) = {
            let mut state = self.state();
            let mut due = Vec::new();
            state.pending.retain(|_, pending| match pending.poll(local_now) {
                Firing::NotYet => true,
                Firing::Fire { repeats } => {
                    due.push(pending.request.clone());
                    repeats
                }
            });
            (due, state.authorized != Some(false))
        };

        if !authorized {
            if !due.is_empty() {
                tracing::debug!(count = due.len(), "not authorized, dropping notifications");
            }
            return Ok(0);
        }

        let count = due.len();
        for request in due {
            tracing::info!(id = %request.id, title = %request.content.title, "notification delivered");
            self.deliveries
                .send(DeliveredNotification {
                    request,
                    delivered_at: now(),
                })
                .map_err(|_| LocalNotificationError::ChannelClosed)?;
        }
        Ok(count)
    }

    /// Publish the user's answer to the notification `id`.
    ///
    /// `action_identifier` is the id of the chosen action; unknown
    /// identifiers are reported as [`ResponseAction::Default`].
    ///
    /// # Errors
    ///
    /// Returns [`LocalNotificationError::ChannelClosed`] when the response
    /// receiver has been dropped.
    pub fn respond(
        &self,
        id: NotificationId,
        action_identifier: &str,
    ) -> Result<(), LocalNotificationError> {
        let action = ResponseAction::from_identifier(action_identifier);
        tracing::debug!(%id, ?action, "notification response");
        self.responses
            .send(NotificationResponse {
                notification_id: id,
                action,
            })
            .map_err(|_| LocalNotificationError::ChannelClosed)
    }

    /// Spawn the delivery loop. It stops when `shutdown` turns `true`, when
    /// its sender is dropped, or when the delivery receiver goes away.
    pub fn spawn(self: Arc<Self>, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    async fn run(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.config.tick());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tracing::info!(tick = ?self.config.tick(), "notification center started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(err) = self.deliver_due(Local::now().naive_local()) {
                        tracing::warn!(%err, "stopping notification center");
                        break;
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("notification center stopped");
    }
}

impl NotificationScheduler for LocalNotificationCenter {
    fn request_authorization(
        &self,
    ) -> impl Future<Output = Result<bool, AlarmGroupsError>> + Send {
        let granted = self.config.authorize;
        self.state().authorized = Some(granted);
        tracing::info!(granted, "notification authorization");
        async move { Ok(granted) }
    }

    fn register_categories(
        &self,
        categories: Vec<NotificationCategory>,
    ) -> impl Future<Output = Result<(), AlarmGroupsError>> + Send {
        tracing::debug!(count = categories.len(), "categories registered");
        self.state().categories = categories;
        async { Ok(()) }
    }

    fn schedule(
        &self,
        request: NotificationRequest,
    ) -> impl Future<Output = Result<(), AlarmGroupsError>> + Send {
        self.register_at(request, Local::now().naive_local());
        async { Ok(()) }
    }

    fn cancel(
        &self,
        id: NotificationId,
    ) -> impl Future<Output = Result<(), AlarmGroupsError>> + Send {
        let removed = self.state().pending.remove(&id).is_some();
        tracing::debug!(%id, removed, "notification cancelled");
        async { Ok(()) }
    }

    fn pending(
        &self,
    ) -> impl Future<Output = Result<Vec<NotificationRequest>, AlarmGroupsError>> + Send {
        let requests = self
            .state()
            .pending
            .values()
            .map(|pending| pending.request.clone())
            .collect();
        async { Ok(requests) }
    }
}
