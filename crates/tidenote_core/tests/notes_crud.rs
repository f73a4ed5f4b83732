use tidenote_core::store::open_store_in_memory;
use tidenote_core::{
    decode_snapshot, NoteField, NotesManager, RepoError, RepoResult, SnapshotRepository,
    SqliteSnapshotRepository, SNAPSHOT_KEY,
};

/// Test double standing in for unreachable storage.
struct UnavailableRepository;

impl SnapshotRepository for UnavailableRepository {
    fn read_snapshot(&self, _key: &str) -> RepoResult<Option<String>> {
        Err(RepoError::Unavailable("storage offline".to_string()))
    }

    fn write_snapshot(&mut self, _key: &str, _value: &str) -> RepoResult<()> {
        Err(RepoError::Unavailable("storage offline".to_string()))
    }
}

#[test]
fn add_valid_note_prepends_and_trims() {
    let conn = open_store_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let mut manager = NotesManager::load(repo);

    manager.add("first", "first body").unwrap();
    let second = manager.add("  second  ", "  second body  ").unwrap();

    assert_eq!(manager.len(), 2);
    assert_eq!(manager.notes()[0], second);
    assert_eq!(manager.notes()[0].title, "second");
    assert_eq!(manager.notes()[0].content, "second body");
    assert_eq!(manager.notes()[1].title, "first");
}

#[test]
fn add_blank_title_is_rejected_without_mutation() {
    let conn = open_store_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let mut manager = NotesManager::load(repo);

    let errors = manager
        .add("   ", "body text")
        .expect_err("blank title must be rejected");
    assert_eq!(errors.get(NoteField::Title), Some("Title is required"));
    assert!(manager.is_empty());

    let reader = SqliteSnapshotRepository::try_new(&conn).unwrap();
    assert_eq!(
        reader.read_snapshot(SNAPSHOT_KEY).unwrap(),
        None,
        "rejected input must not persist"
    );
}

#[test]
fn add_mints_distinct_ids_for_rapid_inserts() {
    let conn = open_store_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let mut manager = NotesManager::load(repo);

    for n in 0..5 {
        manager.add(format!("note {n}").as_str(), "body").unwrap();
    }

    let mut ids: Vec<_> = manager.notes().iter().map(|note| note.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 5, "every note keeps a unique id");
}

#[test]
fn remove_deletes_matching_note_and_persists() {
    let conn = open_store_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let mut manager = NotesManager::load(repo);

    let keep = manager.add("keep", "keep body").unwrap();
    let doomed = manager.add("drop", "drop body").unwrap();

    assert!(manager.remove(&doomed.id));
    assert_eq!(manager.len(), 1);
    assert_eq!(manager.notes()[0].id, keep.id);

    let reader = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let raw = reader.read_snapshot(SNAPSHOT_KEY).unwrap().unwrap();
    let persisted = decode_snapshot(&raw).unwrap();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].id, keep.id);
}

#[test]
fn remove_nonexistent_id_is_a_noop() {
    let conn = open_store_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let mut manager = NotesManager::load(repo);

    let note = manager.add("only", "body").unwrap();
    assert!(!manager.remove("1234567890123"));
    assert_eq!(manager.len(), 1);
    assert_eq!(manager.notes()[0], note);
}

#[test]
fn persistence_failures_are_swallowed_and_memory_stays_authoritative() {
    let mut manager = NotesManager::load(UnavailableRepository);
    assert!(manager.is_empty(), "failed read degrades to empty");

    let note = manager.add("offline", "still works").unwrap();
    assert_eq!(manager.len(), 1);
    assert_eq!(manager.notes()[0], note);

    assert!(manager.remove(&note.id));
    assert!(manager.is_empty());
}
