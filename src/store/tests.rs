use super::*;
use std::collections::HashMap;

#[tokio::test]
async fn test_put_and_get() {
    let store: Store<u32, String> = Store::new();

    store.put(1, "Bulbasaur".to_string());
    store.put(2, "Ivysaur".to_string());

    assert_eq!(store.get(&1), Some("Bulbasaur".to_string()));
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(&3), None);
}

#[tokio::test]
async fn test_put_last_writer_wins() {
    let store: Store<u32, String> = Store::new();

    store.put(1, "first".to_string());
    store.put(1, "second".to_string());

    assert_eq!(store.get(&1), Some("second".to_string()));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_observer_sees_current_snapshot_immediately() {
    let store: Store<u32, String> = Store::new();
    store.put(7, "Squirtle".to_string());

    // Subscribing after the put still replays the current contents
    let rx = store.observe();
    assert_eq!(rx.borrow().get(&7), Some(&"Squirtle".to_string()));
}

#[tokio::test]
async fn test_observer_notified_per_commit() {
    let store: Store<u32, u32> = Store::new();
    let mut rx = store.observe();

    store.put(1, 10);
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().get(&1), Some(&10));

    store.put(1, 20);
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().get(&1), Some(&20));
}

#[tokio::test]
async fn test_replace_all_is_atomic() {
    let store: Store<u32, String> = Store::new();
    store.put(99, "stale".to_string());

    let mut fresh = HashMap::new();
    fresh.insert(1, "Bulbasaur".to_string());
    fresh.insert(2, "Ivysaur".to_string());
    store.replace_all(fresh);

    let snapshot = store.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert!(!snapshot.contains_key(&99));
}

#[tokio::test]
async fn test_update_mutates_in_place() {
    let store: Store<u32, Vec<u32>> = Store::new();
    store.put(1, vec![]);

    let updated = store.update(&1, |refs| refs.extend([65, 34]));
    assert_eq!(updated, Some(vec![65, 34]));
    assert_eq!(store.get(&1), Some(vec![65, 34]));
}

#[tokio::test]
async fn test_update_missing_key_does_not_notify() {
    let store: Store<u32, u32> = Store::new();
    let rx = store.observe();

    assert_eq!(store.update(&1, |v| *v += 1), None);

    // No commit happened, so no wakeup is pending
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test]
async fn test_update_reads_freshest_commit() {
    let store: Store<u32, (bool, Vec<u32>)> = Store::new();
    store.put(1, (false, vec![]));

    // Hydration-style commit, then a flag-style read-modify-write: the
    // second update must observe the first one's write.
    store.update(&1, |entry| entry.1 = vec![65]);
    store.update(&1, |entry| entry.0 = true);

    assert_eq!(store.get(&1), Some((true, vec![65])));
}
