//! Task persistence contract and the SQLite key-value implementation.
//!
//! # Responsibility
//! - Provide the storage seam (`TaskStorage`) consumed by the task store.
//! - Encode the task list as one JSON array under one fixed key.
//!
//! # Invariants
//! - `load` never fails: a corrupt payload must not take the session down.
//! - A payload violating model invariants (empty text, duplicate ids) is
//!   treated as corrupt as a whole.
//! - `save` replaces the previous payload entirely; there is no delta path.

use crate::db::DbError;
use crate::model::task::{Task, TaskId};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key holding the serialized task list.
pub const TASKS_KEY: &str = "tasks";

const KV_TABLE: &str = "kv_store";

pub type StorageResult<T> = Result<T, StorageError>;

/// Errors surfaced by persistence adapters on construction and save paths.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Payload(serde_json::Error),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Payload(err) => write!(f, "task payload serialization failed: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open through db::open_db"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Payload(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Payload(value)
    }
}

/// Persistence adapter contract consumed by the task store.
pub trait TaskStorage {
    /// Loads the persisted task list.
    ///
    /// Never fails: a missing key, malformed payload or read error yields an
    /// empty list (with a warn-level log event) instead of an error.
    fn load(&self) -> Vec<Task>;

    /// Serializes the full task list and overwrites the previous payload.
    fn save(&self, tasks: &[Task]) -> StorageResult<()>;
}

/// SQLite-backed single-key storage for the task list.
pub struct SqliteKvStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStorage<'conn> {
    /// Wraps a connection after verifying it was bootstrapped through
    /// `db::open_db` / `db::open_db_in_memory`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version does not match.
    /// - `MissingRequiredTable` when the payload table is absent.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        let expected_version = crate::db::migrations::latest_version();
        let actual_version: u32 = conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .map_err(DbError::from)?;
        if actual_version != expected_version {
            return Err(StorageError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let table_exists: i64 = conn
            .query_row(
                "SELECT EXISTS(
                    SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
                );",
                params![KV_TABLE],
                |row| row.get(0),
            )
            .map_err(DbError::from)?;
        if table_exists == 0 {
            return Err(StorageError::MissingRequiredTable(KV_TABLE));
        }

        Ok(Self { conn })
    }
}

impl TaskStorage for SqliteKvStorage<'_> {
    fn load(&self) -> Vec<Task> {
        let payload = match self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                params![TASKS_KEY],
                |row| row.get::<_, String>(0),
            )
            .optional()
        {
            Ok(Some(payload)) => payload,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("event=tasks_load module=storage status=recovered reason=read_failed error={err}");
                return Vec::new();
            }
        };

        match decode_tasks(&payload) {
            Ok(tasks) => tasks,
            Err(reason) => {
                warn!("event=tasks_load module=storage status=recovered reason={reason}");
                Vec::new()
            }
        }
    }

    fn save(&self, tasks: &[Task]) -> StorageResult<()> {
        let payload = encode_tasks(tasks)?;
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![TASKS_KEY, payload],
        )?;
        Ok(())
    }
}

fn encode_tasks(tasks: &[Task]) -> StorageResult<String> {
    Ok(serde_json::to_string(tasks)?)
}

/// Decodes and validates a persisted payload.
///
/// Returns a stable reason code on failure so load recovery can be logged
/// without leaking task text.
fn decode_tasks(payload: &str) -> Result<Vec<Task>, &'static str> {
    let tasks: Vec<Task> = serde_json::from_str(payload).map_err(|_| "malformed_payload")?;

    let mut seen_ids: HashSet<TaskId> = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        if task.validate().is_err() {
            return Err("invalid_entry");
        }
        if !seen_ids.insert(task.id) {
            return Err("duplicate_id");
        }
    }

    Ok(tasks)
}
