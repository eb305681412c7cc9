//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `taskdeck_core` linkage with one full add/toggle/stats pass.
//! - Keep output deterministic for quick local sanity checks.

use taskdeck_core::db::open_db_in_memory;
use taskdeck_core::{Category, SqliteKvStorage, TaskStore};

fn main() {
    println!("taskdeck_core ping={}", taskdeck_core::ping());
    println!("taskdeck_core version={}", taskdeck_core::core_version());

    if let Err(err) = run_smoke() {
        eprintln!("taskdeck smoke failed: {err}");
        std::process::exit(1);
    }
}

fn run_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db_in_memory()?;
    let storage = SqliteKvStorage::try_new(&conn)?;
    let mut store = TaskStore::open(storage);

    let first = store.add("buy milk", Category::Personal)?;
    store.add("finish report", Category::Business)?;
    store
        .toggle(first.id)
        .ok_or("toggle missed the task that was just added")?;

    let stats = store.stats();
    println!(
        "taskdeck smoke total={} completed={} pending={}",
        stats.total, stats.completed, stats.pending
    );
    Ok(())
}
