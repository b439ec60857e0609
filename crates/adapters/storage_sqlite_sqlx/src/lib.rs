//! # alarmgroups-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `GroupStore` port defined in `alarmgroups-app::ports::storage`
//! - Manage the `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Keep the whole alarm group list as one JSON blob under a fixed key
//!
//! ## Dependency rule
//! Depends on `alarmgroups-app` (for port traits) and `alarmgroups-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod group_store;
mod pool;

pub use error::StorageError;
pub use group_store::{GROUPS_KEY, SqliteGroupStore};
pub use pool::{Config, Database};
