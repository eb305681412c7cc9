use chrono::{TimeZone, Utc};
use rusqlite::params;
use taskdeck_core::db::open_db_in_memory;
use taskdeck_core::{Category, SqliteKvStorage, StorageError, Task, TaskStorage, TASKS_KEY};

fn sample_task(id: i64, text: &str, category: Category) -> Task {
    let created_at = Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0).unwrap();
    Task::new(id, text, category, created_at).unwrap()
}

fn put_raw_payload(conn: &rusqlite::Connection, payload: &str) {
    conn.execute(
        "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
        params![TASKS_KEY, payload],
    )
    .unwrap();
}

#[test]
fn save_then_load_roundtrip_is_lossless() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteKvStorage::try_new(&conn).unwrap();

    let mut tasks = vec![
        sample_task(1, "buy milk", Category::Personal),
        sample_task(2, "finish report", Category::Business),
        sample_task(3, "read chapter", Category::Class),
    ];
    tasks[1].completed = true;

    storage.save(&tasks).unwrap();
    let loaded = storage.load();

    assert_eq!(loaded, tasks);
}

#[test]
fn load_without_saved_payload_returns_empty() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteKvStorage::try_new(&conn).unwrap();

    assert!(storage.load().is_empty());
}

#[test]
fn save_overwrites_previous_payload() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteKvStorage::try_new(&conn).unwrap();

    storage
        .save(&[
            sample_task(1, "a", Category::Personal),
            sample_task(2, "b", Category::Personal),
        ])
        .unwrap();
    storage
        .save(&[sample_task(3, "c", Category::Business)])
        .unwrap();

    let loaded = storage.load();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, 3);
}

#[test]
fn persisted_payload_is_a_json_array_with_wire_fields() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteKvStorage::try_new(&conn).unwrap();

    storage
        .save(&[sample_task(9, "water plants", Category::Personal)])
        .unwrap();

    let raw: String = conn
        .query_row(
            "SELECT value FROM kv_store WHERE key = ?1;",
            params![TASKS_KEY],
            |row| row.get(0),
        )
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], 9);
    assert_eq!(entries[0]["text"], "water plants");
    assert_eq!(entries[0]["category"], "personal");
    assert_eq!(entries[0]["completed"], false);
    assert_eq!(entries[0]["createdAt"], "2026-02-01T08:00:00Z");
}

#[test]
fn load_recovers_from_malformed_payload() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteKvStorage::try_new(&conn).unwrap();

    put_raw_payload(&conn, "{{{ not json");
    assert!(storage.load().is_empty());
}

#[test]
fn load_recovers_from_non_array_payload() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteKvStorage::try_new(&conn).unwrap();

    put_raw_payload(&conn, r#"{"tasks": []}"#);
    assert!(storage.load().is_empty());
}

#[test]
fn load_recovers_from_entries_violating_model_invariants() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteKvStorage::try_new(&conn).unwrap();

    put_raw_payload(
        &conn,
        r#"[{
            "id": 1,
            "text": "   ",
            "category": "personal",
            "completed": false,
            "createdAt": "2026-02-01T08:00:00Z"
        }]"#,
    );
    assert!(storage.load().is_empty());

    put_raw_payload(
        &conn,
        r#"[
            {"id": 5, "text": "a", "category": "class", "completed": false,
             "createdAt": "2026-02-01T08:00:00Z"},
            {"id": 5, "text": "b", "category": "class", "completed": true,
             "createdAt": "2026-02-01T08:00:00Z"}
        ]"#,
    );
    assert!(storage.load().is_empty());
}

#[test]
fn load_recovers_from_unknown_category_label() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteKvStorage::try_new(&conn).unwrap();

    put_raw_payload(
        &conn,
        r#"[{
            "id": 1,
            "text": "mystery",
            "category": "chores",
            "completed": false,
            "createdAt": "2026-02-01T08:00:00Z"
        }]"#,
    );
    assert!(storage.load().is_empty());
}

#[test]
fn try_new_rejects_uninitialized_connection() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();

    match SqliteKvStorage::try_new(&conn) {
        Err(StorageError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn try_new_rejects_connection_without_kv_table() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "PRAGMA user_version = {};",
        taskdeck_core::db::migrations::latest_version()
    ))
    .unwrap();

    let result = SqliteKvStorage::try_new(&conn);
    assert!(matches!(
        result,
        Err(StorageError::MissingRequiredTable("kv_store"))
    ));
}
