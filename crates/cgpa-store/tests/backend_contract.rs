//! Behaviour every `KeyValueStore` backend must share.

use std::sync::Arc;

use cgpa_core::traits::KeyValueStore;
use cgpa_store::{FileStore, MemoryStore};

fn backends() -> (tempfile::TempDir, Vec<Arc<dyn KeyValueStore>>) {
    let dir = tempfile::tempdir().unwrap();
    let backends: Vec<Arc<dyn KeyValueStore>> = vec![
        Arc::new(MemoryStore::new()),
        Arc::new(FileStore::new(dir.path().join("store"))),
    ];
    (dir, backends)
}

#[tokio::test]
async fn absent_key_reads_as_none() {
    let (_dir, backends) = backends();
    for store in backends {
        assert_eq!(store.get("courseList").await.unwrap(), None, "{}", store.name());
    }
}

#[tokio::test]
async fn set_overwrites_previous_value() {
    let (_dir, backends) = backends();
    for store in backends {
        store.set("gpa", "3.2").await.unwrap();
        store.set("gpa", "3.75").await.unwrap();
        assert_eq!(
            store.get("gpa").await.unwrap().as_deref(),
            Some("3.75"),
            "{}",
            store.name()
        );
    }
}

#[tokio::test]
async fn values_are_stored_verbatim() {
    let (_dir, backends) = backends();
    let json = r#"[{"course":"CSE220","grade":"A-","credit":3.0,"point":3.7}]"#;
    for store in backends {
        store.set("courseList", json).await.unwrap();
        store.set("empty", "").await.unwrap();
        assert_eq!(store.get("courseList").await.unwrap().as_deref(), Some(json));
        assert_eq!(store.get("empty").await.unwrap().as_deref(), Some(""));
    }
}

#[tokio::test]
async fn removing_absent_key_succeeds() {
    let (_dir, backends) = backends();
    for store in backends {
        store.remove("cgpa").await.unwrap();
        store.remove_many(&["courseList", "gpa", "cgpa"]).await.unwrap();
    }
}

#[tokio::test]
async fn remove_many_only_touches_named_keys() {
    let (_dir, backends) = backends();
    for store in backends {
        for key in ["courseList", "gpa", "cgpa", "theme"] {
            store.set(key, "x").await.unwrap();
        }
        store.remove_many(&["courseList", "gpa", "cgpa"]).await.unwrap();

        for key in ["courseList", "gpa", "cgpa"] {
            assert_eq!(store.get(key).await.unwrap(), None, "{}: {key}", store.name());
        }
        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("x"));
    }
}

#[tokio::test]
async fn clear_wipes_every_key() {
    let (_dir, backends) = backends();
    for store in backends {
        store.set("gpa", "1").await.unwrap();
        store.set("theme", "dark").await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.get("gpa").await.unwrap(), None);
        assert_eq!(store.get("theme").await.unwrap(), None);
    }
}

#[tokio::test]
async fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    FileStore::new(dir.path()).set("cgpa", "3.65").await.unwrap();

    let reopened = FileStore::new(dir.path());
    assert_eq!(reopened.get("cgpa").await.unwrap().as_deref(), Some("3.65"));
}
