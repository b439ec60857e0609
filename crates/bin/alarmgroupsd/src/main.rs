//! # alarmgroupsd — alarm groups daemon
//!
//! Composition root that wires all adapters together and rings alarms.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the group store, the local notification center and the player
//! - Restore persisted groups and schedule their notifications
//! - Forward delivered notifications and user responses to the responder
//! - Read `stop` / `snooze` from stdin and answer the ringing notification
//! - Silence the alarm and stop the notification loop on Ctrl-C
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod console;

use std::sync::Arc;

use alarmgroups_adapter_local_notifications::LocalNotificationCenter;
use alarmgroups_adapter_sound::build_player;
use alarmgroups_adapter_storage_sqlite_sqlx::{Config as DatabaseConfig, SqliteGroupStore};
use alarmgroups_app::services::alarm_group_service::AlarmGroupService;
use alarmgroups_app::services::alarm_sound_service::AlarmSoundService;
use alarmgroups_app::services::notification_responder::NotificationResponder;
use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::console::Console;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    let filter = EnvFilter::try_new(&config.logging.filter)
        .with_context(|| format!("invalid log filter `{}`", config.logging.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Database
    let db = DatabaseConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await
    .context("failed to open database")?;
    let store = SqliteGroupStore::new(db.pool().clone());

    // Notifications
    let (center, mut channels) = LocalNotificationCenter::new(config.notifications.clone());
    let center = Arc::new(center);

    // Services
    let mut groups = AlarmGroupService::new(store, Arc::clone(&center));
    groups
        .request_authorization()
        .await
        .context("failed to request notification authorization")?;
    groups
        .register_categories()
        .await
        .context("failed to register notification categories")?;
    if let Err(err) = groups.load().await {
        tracing::warn!(error = %err, "some alarms could not be scheduled");
    }

    let mut responder = NotificationResponder::new(AlarmSoundService::new(build_player(&config.sound)));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let delivery = Arc::clone(&center).spawn(shutdown_rx);
    tracing::info!(groups = groups.groups().len(), "alarmgroupsd running");

    let mut console = Console::default();
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            Some(notification) = channels.deliveries.recv() => {
                console.delivered(notification.request.id.clone());
                if let Err(err) = responder.will_present(&notification) {
                    tracing::warn!(error = %err, "failed to ring alarm");
                }
            }
            Some(response) = channels.responses.recv() => {
                if let Err(err) = responder.did_receive(&response) {
                    tracing::warn!(error = %err, "failed to handle notification response");
                }
            }
            line = stdin.next_line(), if stdin_open => match line {
                Ok(Some(line)) => match console.answer(&line) {
                    Some((id, action)) => {
                        if let Err(err) = center.respond(id, action) {
                            tracing::warn!(error = %err, "failed to publish notification response");
                        }
                    }
                    None if console.ringing().is_some() => {
                        tracing::info!("type `stop` or `snooze` to answer the alarm");
                    }
                    None => tracing::debug!(line = %line, "no alarm is ringing"),
                },
                Ok(None) => stdin_open = false,
                Err(err) => {
                    tracing::warn!(error = %err, "stdin closed");
                    stdin_open = false;
                }
            },
            signal = tokio::signal::ctrl_c() => {
                signal.context("failed to listen for shutdown signal")?;
                tracing::info!("shutting down");
                break;
            }
        }
    }

    if let Err(err) = responder.silence() {
        tracing::warn!(error = %err, "failed to silence alarm");
    }
    shutdown_tx.send_replace(true);
    delivery
        .await
        .context("notification center task panicked")?;

    Ok(())
}
