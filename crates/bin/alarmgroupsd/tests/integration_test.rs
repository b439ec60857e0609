//! End-to-end tests for the full alarmgroupsd stack.
//!
//! Each test wires the real pieces together (in-memory `SQLite` store, local
//! notification center, alarm group service, notification responder with a
//! logging player) and drives them the way the daemon does, without ticking
//! on the wall clock.

use std::sync::Arc;

use alarmgroups_adapter_local_notifications::{
    CenterChannels, LocalCenterConfig, LocalNotificationCenter,
};
use alarmgroups_adapter_sound::LoggingPlayer;
use alarmgroups_adapter_storage_sqlite_sqlx::{Config, Database, SqliteGroupStore};
use alarmgroups_app::ports::{GroupStore, NotificationScheduler};
use alarmgroups_app::services::alarm_group_service::AlarmGroupService;
use alarmgroups_app::services::alarm_sound_service::AlarmSoundService;
use alarmgroups_app::services::notification_responder::NotificationResponder;
use alarmgroups_domain::interval::Interval;
use alarmgroups_domain::notification::{NotificationId, SNOOZE_ACTION_ID, STOP_ACTION_ID};
use alarmgroups_domain::time::clock_time;
use chrono::{NaiveDate, NaiveDateTime};

type Service = AlarmGroupService<SqliteGroupStore, Arc<LocalNotificationCenter>>;

async fn database() -> Database {
    Config {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .expect("in-memory database should initialise")
}

fn center() -> (Arc<LocalNotificationCenter>, CenterChannels) {
    let (center, channels) = LocalNotificationCenter::new(LocalCenterConfig::default());
    (Arc::new(center), channels)
}

fn service(db: &Database, center: &Arc<LocalNotificationCenter>) -> Service {
    AlarmGroupService::new(SqliteGroupStore::new(db.pool().clone()), Arc::clone(center))
}

fn morning_at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 11, 11)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

async fn create_morning(service: &mut Service) -> alarmgroups_domain::group::AlarmGroup {
    service
        .create_group(
            "Morning",
            clock_time(7, 0).unwrap(),
            clock_time(7, 30).unwrap(),
            Interval::from_minutes(10).unwrap(),
        )
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Group lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_schedule_persist_disable_and_delete_morning_group() {
    let db = database().await;
    let (center, _channels) = center();
    let mut service = service(&db, &center);

    let group = create_morning(&mut service).await;
    assert_eq!(group.alarms.len(), 4);
    assert_eq!(center.pending().await.unwrap().len(), 4);

    let stored = SqliteGroupStore::new(db.pool().clone()).load().await.unwrap();
    assert_eq!(stored, vec![group.clone()]);

    assert!(!service.toggle_group(group.id).await.unwrap());
    assert!(center.pending().await.unwrap().is_empty());

    service.delete_group(group.id).await.unwrap();
    assert!(service.groups().is_empty());
    let stored = SqliteGroupStore::new(db.pool().clone()).load().await.unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn should_restore_groups_and_reschedule_enabled_alarms() {
    let db = database().await;
    let (first_center, _first_channels) = center();
    let mut first = service(&db, &first_center);
    let group = create_morning(&mut first).await;
    first.toggle_alarm(group.id, 1).await.unwrap();

    let (center, _channels) = center();
    let mut restored = service(&db, &center);
    assert_eq!(restored.load().await.unwrap(), 1);

    assert_eq!(restored.groups()[0].id, group.id);
    let pending: Vec<NotificationId> = center
        .pending()
        .await
        .unwrap()
        .into_iter()
        .map(|request| request.id)
        .collect();
    assert_eq!(pending.len(), 3);
    assert!(!pending.contains(&group.alarms[1].id.into()));
}

#[tokio::test]
async fn should_start_empty_when_stored_list_is_corrupt() {
    let db = database().await;
    SqliteGroupStore::new(db.pool().clone())
        .write_raw(b"not json")
        .await
        .unwrap();

    let (center, _channels) = center();
    let mut service = service(&db, &center);
    assert_eq!(service.load().await.unwrap(), 0);
    assert!(center.pending().await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Delivery and responses
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_ring_on_delivery_and_stop_on_stop_action() {
    let db = database().await;
    let (center, mut channels) = center();
    let mut service = service(&db, &center);
    let group = create_morning(&mut service).await;
    let mut responder = NotificationResponder::new(AlarmSoundService::new(LoggingPlayer::new()));

    assert_eq!(center.deliver_due(morning_at(7, 10)).unwrap(), 1);
    let delivered = channels.deliveries.try_recv().unwrap();
    assert_eq!(delivered.request.id, NotificationId::from(group.alarms[1].id));
    assert_eq!(delivered.request.content.body, "7:10 AM");

    responder.will_present(&delivered).unwrap();
    assert!(responder.sound().is_playing());
    assert!(responder.sound().player().is_playing());

    center
        .respond(delivered.request.id.clone(), SNOOZE_ACTION_ID)
        .unwrap();
    responder
        .did_receive(&channels.responses.try_recv().unwrap())
        .unwrap();
    assert!(responder.sound().is_playing());

    center.respond(delivered.request.id, STOP_ACTION_ID).unwrap();
    responder
        .did_receive(&channels.responses.try_recv().unwrap())
        .unwrap();
    assert!(!responder.sound().is_playing());
    assert!(!responder.sound().player().is_playing());
}

#[tokio::test]
async fn should_not_deliver_alarms_of_disabled_group() {
    let db = database().await;
    let (center, mut channels) = center();
    let mut service = service(&db, &center);
    let group = create_morning(&mut service).await;
    service.toggle_group(group.id).await.unwrap();

    assert_eq!(center.deliver_due(morning_at(7, 0)).unwrap(), 0);
    assert!(channels.deliveries.try_recv().is_err());
}

#[tokio::test]
async fn should_deliver_test_alarm_once() {
    let db = database().await;
    let (center, mut channels) = center();
    let service = service(&db, &center);
    service.schedule_test_alarm().await.unwrap();

    let later = chrono::Local::now().naive_local() + chrono::TimeDelta::seconds(31);
    assert_eq!(center.deliver_due(later).unwrap(), 1);
    assert!(channels.deliveries.try_recv().is_ok());
    assert!(center.pending().await.unwrap().is_empty());
}
