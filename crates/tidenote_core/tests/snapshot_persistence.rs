use rusqlite::params;
use tidenote_core::store::open_store;
use tidenote_core::{Note, NotesManager, SqliteSnapshotRepository, SNAPSHOT_KEY};

#[test]
fn round_trip_across_reopen_preserves_order_and_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.sqlite3");

    let written: Vec<Note> = {
        let conn = open_store(&path).unwrap();
        let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
        let mut manager = NotesManager::load(repo);
        manager.add("older", "written first").unwrap();
        manager.add("newer", "written second").unwrap();
        manager.notes().to_vec()
    };

    let conn = open_store(&path).unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let manager = NotesManager::load(repo);

    assert_eq!(manager.notes(), written.as_slice());
    assert_eq!(manager.notes()[0].title, "newer");
    assert_eq!(manager.notes()[1].title, "older");
}

#[test]
fn absent_snapshot_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_store(dir.path().join("fresh.sqlite3")).unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let manager = NotesManager::load(repo);
    assert!(manager.is_empty());
}

#[test]
fn corrupt_snapshot_fails_closed_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.sqlite3");
    let conn = open_store(&path).unwrap();

    conn.execute(
        "INSERT INTO kv_snapshots (key, value) VALUES (?1, ?2);",
        params![SNAPSHOT_KEY, "{ not a note array"],
    )
    .unwrap();

    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let manager = NotesManager::load(repo);
    assert!(manager.is_empty());
}

#[test]
fn duplicate_ids_in_stored_snapshot_fail_closed_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_store(dir.path().join("dup.sqlite3")).unwrap();

    let twin = r#"[
        {"id":"1700000000000","title":"a","content":"x","createdAt":"2024-05-01T12:00:00Z"},
        {"id":"1700000000000","title":"b","content":"y","createdAt":"2024-05-01T12:00:01Z"}
    ]"#;
    conn.execute(
        "INSERT INTO kv_snapshots (key, value) VALUES (?1, ?2);",
        params![SNAPSHOT_KEY, twin],
    )
    .unwrap();

    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let manager = NotesManager::load(repo);
    assert!(manager.is_empty());
}

#[test]
fn loads_snapshot_written_in_wire_shape() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_store(dir.path().join("wire.sqlite3")).unwrap();

    let raw = r#"[{"id":"1714565096000","title":"Imported","content":"from a previous session","createdAt":"2024-05-01T12:04:56Z"}]"#;
    conn.execute(
        "INSERT INTO kv_snapshots (key, value) VALUES (?1, ?2);",
        params![SNAPSHOT_KEY, raw],
    )
    .unwrap();

    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let manager = NotesManager::load(repo);
    assert_eq!(manager.len(), 1);
    assert_eq!(manager.notes()[0].id, "1714565096000");
    assert_eq!(manager.notes()[0].title, "Imported");
}
