use super::*;

#[test]
fn memory_store_round_trips_value() {
    let store = MemoryStore::new();
    store.set_item("k", "v");
    assert_eq!(store.get_item("k").as_deref(), Some("v"));
}

#[test]
fn memory_store_clones_share_items() {
    let a = MemoryStore::new();
    let b = a.clone();
    a.set_item("access_token", "t1");
    assert_eq!(b.get_item("access_token").as_deref(), Some("t1"));
    b.remove_item("access_token");
    assert!(a.is_empty());
}

#[test]
fn memory_store_remove_absent_key_is_noop() {
    let store = MemoryStore::new();
    store.remove_item("missing");
    store.remove_item("missing");
    assert_eq!(store.len(), 0);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn local_storage_is_inert_without_browser() {
    let store = LocalStorage;
    store.set_item("k", "v");
    assert_eq!(store.get_item("k"), None);
    store.remove_item("k");
}
