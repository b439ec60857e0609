//! `SQLite` implementation of [`GroupStore`].
//!
//! The whole list is serialized to JSON and kept under [`GROUPS_KEY`] in the
//! `kv_store` table. Saving overwrites the previous blob.

use std::future::Future;

use sqlx::SqlitePool;

use alarmgroups_app::ports::GroupStore;
use alarmgroups_domain::error::AlarmGroupsError;
use alarmgroups_domain::group::AlarmGroup;

use crate::error::StorageError;

/// Key under which the alarm group list is stored.
pub const GROUPS_KEY: &str = "savedAlarmGroups";

const SELECT_BY_KEY: &str = "SELECT value FROM kv_store WHERE key = ?";
const UPSERT: &str = "INSERT INTO kv_store (key, value) VALUES (?, ?) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value";

/// `SQLite`-backed alarm group store.
pub struct SqliteGroupStore {
    pool: SqlitePool,
    key: String,
}

impl SqliteGroupStore {
    /// Create a store using the given connection pool and [`GROUPS_KEY`].
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_key(pool, GROUPS_KEY)
    }

    /// Create a store that keeps its blob under a custom key.
    #[must_use]
    pub fn with_key(pool: SqlitePool, key: impl Into<String>) -> Self {
        Self {
            pool,
            key: key.into(),
        }
    }

    /// Write raw bytes under the store's key, bypassing serialization.
    /// For diagnostics and tests, e.g. seeding a corrupt blob.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] if the query fails.
    #[doc(hidden)]
    pub async fn write_raw(&self, bytes: &[u8]) -> Result<(), StorageError> {
        sqlx::query(UPSERT)
            .bind(&self.key)
            .bind(bytes)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

impl GroupStore for SqliteGroupStore {
    fn load(&self) -> impl Future<Output = Result<Vec<AlarmGroup>, AlarmGroupsError>> + Send {
        let pool = self.pool.clone();
        let key = self.key.clone();
        async move {
            let row: Option<(Vec<u8>,)> = sqlx::query_as(SELECT_BY_KEY)
                .bind(&key)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            let Some((bytes,)) = row else {
                tracing::debug!(%key, "no stored alarm groups");
                return Ok(Vec::new());
            };

            let groups: Vec<AlarmGroup> =
                serde_json::from_slice(&bytes).map_err(StorageError::from)?;
            Ok(groups)
        }
    }

    fn save(
        &self,
        groups: &[AlarmGroup],
    ) -> impl Future<Output = Result<(), AlarmGroupsError>> + Send {
        let pool = self.pool.clone();
        let key = self.key.clone();
        let encoded = serde_json::to_vec(groups);
        async move {
            let bytes = encoded.map_err(StorageError::from)?;
            sqlx::query(UPSERT)
                .bind(&key)
                .bind(bytes)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use alarmgroups_domain::interval::Interval;
    use alarmgroups_domain::time::clock_time;

    async fn setup() -> SqliteGroupStore {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteGroupStore::new(db.pool().clone())
    }

    fn group(name: &str, start: (u32, u32), end: (u32, u32), every: u32) -> AlarmGroup {
        AlarmGroup::builder()
            .name(name)
            .start_time(clock_time(start.0, start.1).unwrap())
            .end_time(clock_time(end.0, end.1).unwrap())
            .interval(Interval::from_minutes(every).unwrap())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_return_empty_list_when_nothing_saved() {
        let store = setup().await;
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_roundtrip_full_list() {
        let store = setup().await;
        let mut morning = group("Morning", (7, 0), (7, 30), 10);
        morning.alarms[1].toggle();
        morning.alarms[2].update_label("Coffee");
        let mut evening = group("Evening", (21, 0), (21, 15), 5);
        evening.toggle();
        let groups = vec![morning, evening];

        store.save(&groups).await.unwrap();

        assert_eq!(store.load().await.unwrap(), groups);
    }

    #[tokio::test]
    async fn should_overwrite_previous_list_on_save() {
        let store = setup().await;
        store
            .save(&[group("First", (6, 0), (6, 10), 5)])
            .await
            .unwrap();
        let second = vec![group("Second", (8, 0), (8, 0), 5)];

        store.save(&second).await.unwrap();

        assert_eq!(store.load().await.unwrap(), second);
    }

    #[tokio::test]
    async fn should_save_empty_list() {
        let store = setup().await;
        store
            .save(&[group("Gone", (6, 0), (6, 10), 5)])
            .await
            .unwrap();

        store.save(&[]).await.unwrap();

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_return_storage_error_when_blob_is_corrupt() {
        let store = setup().await;
        store.write_raw(b"not json at all").await.unwrap();

        let result = store.load().await;

        assert!(matches!(result, Err(AlarmGroupsError::Storage(_))));
    }

    #[tokio::test]
    async fn should_keep_separate_lists_per_key() {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        let main = SqliteGroupStore::new(db.pool().clone());
        let other = SqliteGroupStore::with_key(db.pool().clone(), "otherGroups");

        main.save(&[group("Main", (7, 0), (7, 0), 5)]).await.unwrap();

        assert_eq!(main.load().await.unwrap().len(), 1);
        assert!(other.load().await.unwrap().is_empty());
    }
}
