//! # alarmgroups-adapter-local-notifications
//!
//! In-process implementation of the
//! [`NotificationScheduler`](alarmgroups_app::ports::NotificationScheduler) port.
//!
//! ## Responsibilities
//! - Keep pending notification requests keyed by id, replacing on re-schedule
//! - Fire calendar triggers (`hour:minute`, optionally daily) and interval
//!   triggers (after a delay, optionally repeating) on a background tick
//! - Publish delivered notifications and user responses on channels that the
//!   daemon forwards to the notification responder
//!
//! ## Dependency rule
//! Depends on `alarmgroups-domain` (for types) and `alarmgroups-app` (for the
//! port trait). Never leaks channel or lock details past this crate.

mod center;
mod config;
mod error;
mod pending;

pub use center::{CenterChannels, LocalNotificationCenter};
pub use config::LocalCenterConfig;
pub use error::LocalNotificationError;
