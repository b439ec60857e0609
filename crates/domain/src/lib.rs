//! # alarmgroups-domain
//!
//! Pure domain model for alarm groups.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, clock times
//! - Define **Alarms** (a time of day, an enabled flag, a label)
//! - Define **Alarm groups** (named, evenly spaced alarms between two times)
//! - The **group generator** that stamps out a group's alarms once
//! - Define **Notification requests** (content, trigger, category, responses)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod interval;
pub mod time;

pub mod alarm;
pub mod group;
pub mod notification;
