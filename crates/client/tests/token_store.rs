use talentdesk_client::{FileTokenStore, MemoryTokenStore, TokenStore};

#[test]
fn file_store_round_trips_a_token() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let store = FileTokenStore::at(dir.path().join("token"));

    assert_eq!(store.load(), None);

    store.save("opaque-credential-123");
    assert_eq!(store.load().as_deref(), Some("opaque-credential-123"));

    // A fresh handle over the same path sees the persisted value.
    let reopened = FileTokenStore::at(dir.path().join("token"));
    assert_eq!(reopened.load().as_deref(), Some("opaque-credential-123"));
}

#[test]
fn file_store_clear_is_durable_and_idempotent() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let store = FileTokenStore::at(dir.path().join("token"));

    store.save("to-be-cleared");
    store.clear();
    assert_eq!(store.load(), None);

    // Clearing an already-absent token is a no-op.
    store.clear();
    assert_eq!(store.load(), None);
}

#[test]
fn whitespace_only_content_counts_as_absent() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("token");
    std::fs::write(&path, "  \n").expect("failed to seed token file");

    let store = FileTokenStore::at(path);
    assert_eq!(store.load(), None);
}

#[test]
fn memory_store_behaves_like_the_file_store() {
    let store = MemoryTokenStore::new();
    assert_eq!(store.load(), None);

    store.save("tok");
    assert_eq!(store.load().as_deref(), Some("tok"));

    store.clear();
    assert_eq!(store.load(), None);

    let seeded = MemoryTokenStore::seeded("prior");
    assert_eq!(seeded.load().as_deref(), Some("prior"));
}
