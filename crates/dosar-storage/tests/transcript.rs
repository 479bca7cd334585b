use dosar_core::models::{ChatRole, SessionId};
use dosar_storage::TranscriptStore;

fn store() -> (tempfile::TempDir, TranscriptStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = TranscriptStore::open(dir.path().join("transcript.db")).expect("open store");
    (dir, store)
}

#[test]
fn load_unknown_session_is_empty() {
    let (_dir, store) = store();
    let messages = store.load(SessionId::new()).unwrap();
    assert!(messages.is_empty());
}

/// Appends come back in exactly the order they were made, even when
/// several land in the same timestamp granule.
#[test]
fn appends_preserve_order() {
    let (_dir, store) = store();
    let session = SessionId::new();

    for i in 0..20 {
        let role = if i % 2 == 0 {
            ChatRole::User
        } else {
            ChatRole::Assistant
        };
        store.append(session, role, &format!("mesaj {i}")).unwrap();
    }

    let messages = store.load(session).unwrap();
    assert_eq!(messages.len(), 20);
    for (i, msg) in messages.iter().enumerate() {
        assert_eq!(msg.content, format!("mesaj {i}"));
    }
    assert!(messages.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[test]
fn sessions_are_isolated() {
    let (_dir, store) = store();
    let a = SessionId::new();
    let b = SessionId::new();

    store.append(a, ChatRole::User, "pentru a").unwrap();
    store.append(b, ChatRole::User, "pentru b").unwrap();

    let loaded = store.load(a).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].content, "pentru a");
}

#[test]
fn clear_empties_and_is_idempotent() {
    let (_dir, store) = store();
    let session = SessionId::new();

    store.append(session, ChatRole::User, "întrebare").unwrap();
    store.append(session, ChatRole::Assistant, "răspuns").unwrap();

    store.clear(session).unwrap();
    assert!(store.load(session).unwrap().is_empty());

    // Clearing again (and clearing a session that never existed) succeeds.
    store.clear(session).unwrap();
    store.clear(SessionId::new()).unwrap();
    assert!(store.load(session).unwrap().is_empty());
}

#[test]
fn clear_leaves_other_sessions_alone() {
    let (_dir, store) = store();
    let a = SessionId::new();
    let b = SessionId::new();

    store.append(a, ChatRole::User, "pentru a").unwrap();
    store.append(b, ChatRole::User, "pentru b").unwrap();

    store.clear(a).unwrap();
    assert!(store.load(a).unwrap().is_empty());
    assert_eq!(store.load(b).unwrap().len(), 1);
}

#[test]
fn message_count_tracks_appends() {
    let (_dir, store) = store();
    let session = SessionId::new();
    assert_eq!(store.message_count(session).unwrap(), 0);

    store.append(session, ChatRole::User, "unu").unwrap();
    store.append(session, ChatRole::Assistant, "doi").unwrap();
    assert_eq!(store.message_count(session).unwrap(), 2);
}

/// Messages survive reopening the store at the same path.
#[test]
fn transcript_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transcript.db");
    let session = SessionId::new();

    {
        let store = TranscriptStore::open(&path).unwrap();
        store.append(session, ChatRole::User, "persistat").unwrap();
    }

    let store = TranscriptStore::open(&path).unwrap();
    let messages = store.load(session).unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "persistat");
    assert_eq!(messages[0].role, ChatRole::User);
}
