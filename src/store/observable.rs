use std::collections::HashMap;
use std::hash::Hash;

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// Observable key-value store.
///
/// The whole map lives as the value of a `watch` channel, so every commit is
/// an atomic swap: observers only ever see complete snapshots, never a map
/// mid-update. A new observer receives the current snapshot immediately
/// (`watch` replays the latest value), then one notification per commit.
///
/// Entries only accumulate or get upgraded in place; this domain needs no
/// deletion or eviction.
pub struct Store<K, V> {
    tx: watch::Sender<HashMap<K, V>>,
}

impl<K, V> Store<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        let (tx, _) = watch::channel(HashMap::new());
        Self { tx }
    }

    /// Clone of the current contents
    pub fn snapshot(&self) -> HashMap<K, V> {
        self.tx.borrow().clone()
    }

    /// Current value for a single key
    pub fn get(&self, key: &K) -> Option<V> {
        self.tx.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }

    /// Subscribe to snapshot changes.
    ///
    /// `Receiver::borrow` holds the current snapshot right away; each commit
    /// after that wakes `changed()`. Commits notify even when the resulting
    /// map is value-equal to the previous one.
    pub fn observe(&self) -> watch::Receiver<HashMap<K, V>> {
        self.tx.subscribe()
    }

    /// Subscription as a `Stream`; yields the current snapshot first
    pub fn stream(&self) -> WatchStream<HashMap<K, V>>
    where
        K: Send + Sync + 'static,
        V: Send + Sync + 'static,
    {
        WatchStream::new(self.tx.subscribe())
    }

    /// Upsert one entry as a single atomic commit. Last writer wins per key.
    pub fn put(&self, key: K, value: V) {
        self.tx.send_modify(|map| {
            map.insert(key, value);
        });
    }

    /// Atomically replace the entire contents
    pub fn replace_all(&self, contents: HashMap<K, V>) {
        self.tx.send_modify(|map| *map = contents);
    }

    /// Read-modify-write one entry against the freshest committed snapshot.
    ///
    /// The closure runs under the channel lock, so no commit can interleave
    /// between the read and the write: a flag toggle applied here can never
    /// clobber a hydration that landed a moment earlier, and vice versa.
    /// Returns the updated value, or `None` (without notifying) when the key
    /// is absent.
    pub fn update<F>(&self, key: &K, mutate: F) -> Option<V>
    where
        F: FnOnce(&mut V),
    {
        let mut updated = None;
        self.tx.send_if_modified(|map| match map.get_mut(key) {
            Some(value) => {
                mutate(value);
                updated = Some(value.clone());
                true
            }
            None => false,
        });
        updated
    }
}

impl<K, V> Default for Store<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
