//! Session save/load behaviour against the real backends.

use std::sync::Arc;

use cgpa_core::error::StoreError;
use cgpa_core::persist::{self, CGPA_KEY, COURSE_LIST_KEY, GPA_KEY};
use cgpa_core::traits::KeyValueStore;
use cgpa_core::{Phase, Session};
use cgpa_store::{FaultyStore, FileStore, MemoryStore};

async fn populated(store: Arc<dyn KeyValueStore>) -> Session {
    let mut session = Session::open(store).await;
    session.add_course("CSE220", "A-", "3", "NSU").unwrap();
    session.add_course("CSE221", "B+", "3", "NSU").unwrap();
    session.add_semester("3.8").unwrap();
    session
}

#[tokio::test]
async fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()));

    let session = populated(store.clone()).await;
    let before = session.state().clone();
    assert!(session.close().await.is_empty());

    let reopened = Session::open(Arc::new(FileStore::new(dir.path()))).await;
    let after = reopened.state();
    assert_eq!(after.courses(), before.courses());
    assert_eq!(after.gpa(), before.gpa());
    assert_eq!(after.cgpa(), before.cgpa());
    assert!(after.semesters().is_empty());
}

#[tokio::test]
async fn clear_then_load_is_empty() {
    let store = Arc::new(MemoryStore::new());
    let mut session = populated(store.clone()).await;
    session.clear().unwrap();
    assert!(session.state().is_empty());
    assert!(session.flush().await.is_empty());

    for key in [COURSE_LIST_KEY, GPA_KEY, CGPA_KEY] {
        assert_eq!(store.get(key).await.unwrap(), None);
    }

    let reloaded = Session::open(store).await;
    assert!(reloaded.state().courses().is_empty());
    assert_eq!(reloaded.state().gpa(), None);
    assert_eq!(reloaded.state().cgpa(), None);
}

#[tokio::test]
async fn malformed_course_list_loads_as_empty() {
    let store = Arc::new(MemoryStore::with_entries([
        (COURSE_LIST_KEY, "{not json"),
        (GPA_KEY, "3.1"),
        (CGPA_KEY, "0"),
    ]));
    let session = Session::open(store).await;
    assert_eq!(session.phase(), Phase::Ready);
    assert!(session.state().courses().is_empty());
    assert_eq!(session.state().gpa(), Some(3.1));
    assert_eq!(session.state().cgpa(), None);
}

#[tokio::test]
async fn later_saves_win() {
    let store = Arc::new(MemoryStore::new());
    let mut session = Session::open(store.clone()).await;
    for i in 0..25 {
        session.add_course(&format!("C{i}"), "B", "3", "NSU").unwrap();
    }
    assert!(session.flush().await.is_empty());

    let raw = store.get(COURSE_LIST_KEY).await.unwrap();
    let courses = persist::decode_course_list(raw.as_deref());
    assert_eq!(courses.len(), 25);
    assert_eq!(courses.last().map(|c| c.course_name.as_str()), Some("C24"));
}

#[tokio::test]
async fn failed_writes_keep_memory_and_surface_on_flush() {
    let inner = Arc::new(MemoryStore::new());
    let faulty = Arc::new(FaultyStore::new(inner.clone()));
    let mut session = Session::open(faulty.clone()).await;

    faulty.set_fail_all_writes(true);
    let gpa = session.add_course("CSE220", "A", "3", "NSU").unwrap();
    assert_eq!(gpa, 4.0);

    let failures = session.flush().await;
    assert_eq!(failures.len(), 3);
    assert!(failures.iter().all(|e| matches!(e, StoreError::Unavailable(_))));
    assert_eq!(session.state().courses().len(), 1);
    assert!(inner.is_empty().await);

    // The next save is a full overwrite, so the earlier loss is repaired.
    faulty.heal();
    session.add_course("CSE221", "B", "3", "NSU").unwrap();
    assert!(session.flush().await.is_empty());
    let raw = inner.get(COURSE_LIST_KEY).await.unwrap();
    assert_eq!(persist::decode_course_list(raw.as_deref()).len(), 2);
}

#[tokio::test]
async fn partial_clear_removes_what_it_can() {
    let inner = Arc::new(MemoryStore::new());
    let faulty = Arc::new(FaultyStore::new(inner.clone()));
    let mut session = populated(faulty.clone()).await;
    assert!(session.flush().await.is_empty());

    faulty.fail_key(GPA_KEY);
    session.clear().unwrap();
    assert!(session.state().is_empty());

    let failures = session.flush().await;
    assert!(matches!(
        failures.as_slice(),
        [StoreError::PartialRemoval { failed }] if failed == &vec![GPA_KEY.to_string()]
    ));
    assert_eq!(inner.get(COURSE_LIST_KEY).await.unwrap(), None);
    assert_eq!(inner.get(CGPA_KEY).await.unwrap(), None);
    assert!(inner.get(GPA_KEY).await.unwrap().is_some());
}

#[tokio::test]
async fn unreadable_store_loads_empty() {
    let faulty = Arc::new(FaultyStore::new(Arc::new(MemoryStore::with_entries([(
        GPA_KEY, "3.9",
    )]))));
    faulty.set_fail_reads(true);

    let session = Session::open(faulty.clone()).await;
    assert_eq!(session.phase(), Phase::Ready);
    assert!(session.state().is_empty());
    assert_eq!(faulty.get_count(), 3);
}

#[tokio::test]
async fn validation_failure_writes_nothing() {
    let faulty = Arc::new(FaultyStore::new(Arc::new(MemoryStore::new())));
    let mut session = Session::open(faulty.clone()).await;

    assert!(session.add_course("", "A", "3", "NSU").is_err());
    assert!(session.add_course("CSE220", "Z", "3", "NSU").is_err());
    assert!(session.add_course("CSE220", "A", "0", "NSU").is_err());
    assert!(session.add_semester("3.5").is_err());
    session.flush().await;

    assert_eq!(faulty.set_count(), 0);
    assert!(session.state().is_empty());
}
