//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod alarm_group_service;
pub mod alarm_sound_service;
pub mod notification_responder;
