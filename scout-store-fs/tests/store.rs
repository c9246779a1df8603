use scout_proto::store::KeyValueStore;
use scout_store_fs::FsStore;
use std::sync::Arc;

#[tokio::test]
async fn set_then_get() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());

    store.set("lastSearch", "octocat").await.unwrap();
    assert_eq!(store.get("lastSearch").await.unwrap().as_deref(), Some("octocat"));
}

#[tokio::test]
async fn overwrite_replaces_value() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());

    store.set("lastSearch", "alice").await.unwrap();
    store.set("lastSearch", "bob").await.unwrap();
    assert_eq!(store.get("lastSearch").await.unwrap().as_deref(), Some("bob"));
}

#[tokio::test]
async fn remove_deletes_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());

    store.set("lastSearch", "alice").await.unwrap();
    store.remove("lastSearch").await.unwrap();
    assert_eq!(store.get("lastSearch").await.unwrap(), None);
}

#[tokio::test]
async fn remove_nonexistent_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());

    assert!(store.remove("missing").await.is_ok());
}

#[tokio::test]
async fn values_survive_a_new_store_instance() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = FsStore::new(dir.path());
        store.set("lastSearch", "torvalds").await.unwrap();
    }

    let reopened = FsStore::new(dir.path());
    assert_eq!(
        reopened.get("lastSearch").await.unwrap().as_deref(),
        Some("torvalds")
    );
}

#[tokio::test]
async fn keys_with_separators_are_distinct() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());

    store.set("a/b", "slash").await.unwrap();
    store.set("a:b", "colon").await.unwrap();

    assert_eq!(store.get("a/b").await.unwrap().as_deref(), Some("slash"));
    assert_eq!(store.get("a:b").await.unwrap().as_deref(), Some("colon"));
}

#[tokio::test]
async fn usable_as_arc_dyn_key_value_store() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn KeyValueStore> = Arc::new(FsStore::new(dir.path()));

    store.set("key", "val").await.unwrap();
    assert_eq!(store.get("key").await.unwrap().as_deref(), Some("val"));
}

#[test]
fn root_is_exposed() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsStore::new(dir.path());
    assert_eq!(store.root(), dir.path());
}
