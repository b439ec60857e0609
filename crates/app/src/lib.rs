//! # alarmgroups-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `GroupStore` — save/load the whole alarm group list
//!   - `NotificationScheduler` — register and cancel scheduled notifications
//!   - `AlarmPlayer` — looping alarm tone playback
//! - Define **driving/inbound ports** as use-case structs:
//!   - `AlarmGroupService` — create, toggle, edit and delete alarm groups
//!   - `AlarmSoundService` — start/stop the alarm tone
//!   - `NotificationResponder` — react to deliveries and user actions
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `alarmgroups-domain` only (plus `tracing`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
