//! Wishlist with change notifications
//!
//! Membership is a set keyed by `(id, media type)`, persisted as a JSON array
//! in the store with an in-memory index mirroring it for O(1) queries. A
//! keyed listener registry lets independent UI surfaces (detail page, list
//! cards) react to mutations made elsewhere without sharing an object graph.
//!
//! Listener invocation is synchronous and holds no lock, so a callback may
//! query the wishlist it was notified by.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::models::{MediaEntry, MediaType};
use crate::services::storage::{get_json, keys, set_json, PersistenceStore};

/// Handle identifying a registered listener, returned by [`Wishlist::on`]
pub type ListenerId = u64;

type Key = (String, MediaType);
type Callback = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Registry {
    listeners: HashMap<Key, Vec<(ListenerId, Callback)>>,
    next_id: ListenerId,
}

/// Persisted wishlist set plus its change-notification registry
pub struct Wishlist {
    store: Arc<dyn PersistenceStore>,
    index: Mutex<HashSet<Key>>,
    registry: Mutex<Registry>,
}

impl Wishlist {
    /// Build the wishlist over the injected store, indexing any persisted
    /// entries
    pub fn new(store: Arc<dyn PersistenceStore>) -> Self {
        let index = persisted_entries(store.as_ref())
            .iter()
            .map(MediaEntry::key)
            .collect();

        Self {
            store,
            index: Mutex::new(index),
            registry: Mutex::new(Registry::default()),
        }
    }

    /// Entries in stable (insertion) order for display
    pub fn entries(&self) -> Vec<MediaEntry> {
        persisted_entries(self.store.as_ref())
    }

    /// O(1) membership query
    pub fn has(&self, id: &str, media_type: MediaType) -> bool {
        self.index
            .lock()
            .map(|index| index.contains(&(id.to_string(), media_type)))
            .unwrap_or(false)
    }

    /// Insert an entry; a no-op when already present. Listeners for the
    /// entry's key are notified either way.
    pub fn add(&self, entry: MediaEntry) {
        let key = entry.key();

        if let Ok(mut index) = self.index.lock() {
            if index.insert(key.clone()) {
                let mut entries = persisted_entries(self.store.as_ref());
                entries.push(entry);
                set_json(self.store.as_ref(), keys::WISHLIST, &entries);
            } else {
                debug!("wishlist add for already-present {}/{}", key.1, key.0);
            }
        }

        self.notify(&key);
    }

    /// Remove an entry if present. Listeners are notified regardless of
    /// whether anything changed — callers rely on the refresh signal.
    pub fn remove(&self, id: &str, media_type: MediaType) {
        let key = (id.to_string(), media_type);

        if let Ok(mut index) = self.index.lock() {
            if index.remove(&key) {
                let mut entries = persisted_entries(self.store.as_ref());
                entries.retain(|e| !(e.id == id && e.media_type == media_type));
                set_json(self.store.as_ref(), keys::WISHLIST, &entries);
            }
        }

        self.notify(&key);
    }

    /// Subscribe to changes of one `(id, type)` key; multiple independent
    /// subscribers per key are supported
    pub fn on<F>(&self, id: &str, media_type: MediaType, callback: F) -> ListenerId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let Ok(mut registry) = self.registry.lock() else {
            return 0;
        };

        registry.next_id += 1;
        let listener_id = registry.next_id;
        registry
            .listeners
            .entry((id.to_string(), media_type))
            .or_default()
            .push((listener_id, Arc::new(callback)));

        listener_id
    }

    /// Unsubscribe; unknown ids are a silent no-op
    pub fn off(&self, id: &str, media_type: MediaType, listener_id: ListenerId) {
        let Ok(mut registry) = self.registry.lock() else {
            return;
        };

        let key = (id.to_string(), media_type);
        if let Some(listeners) = registry.listeners.get_mut(&key) {
            listeners.retain(|(registered, _)| *registered != listener_id);
            if listeners.is_empty() {
                registry.listeners.remove(&key);
            }
        }
    }

    fn notify(&self, key: &Key) {
        // Snapshot callbacks, then invoke with no lock held so listeners can
        // re-enter `has()`
        let callbacks: Vec<Callback> = match self.registry.lock() {
            Ok(registry) => registry
                .listeners
                .get(key)
                .map(|listeners| listeners.iter().map(|(_, cb)| Arc::clone(cb)).collect())
                .unwrap_or_default(),
            Err(_) => return,
        };

        for callback in callbacks {
            callback();
        }
    }
}

fn persisted_entries(store: &dyn PersistenceStore) -> Vec<MediaEntry> {
    get_json(store, keys::WISHLIST).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn entry(id: &str, media_type: MediaType) -> MediaEntry {
        MediaEntry {
            id: id.to_string(),
            poster: None,
            title: format!("Title {}", id),
            media_type,
        }
    }

    #[test]
    fn test_add_has_remove_roundtrip() {
        let wishlist = Wishlist::new(MemoryStore::shared());

        assert!(!wishlist.has("42", MediaType::Movie));
        wishlist.add(entry("42", MediaType::Movie));
        assert!(wishlist.has("42", MediaType::Movie));
        // Membership is keyed by (id, type)
        assert!(!wishlist.has("42", MediaType::Series));

        wishlist.remove("42", MediaType::Movie);
        assert!(!wishlist.has("42", MediaType::Movie));
    }

    #[test]
    fn test_duplicate_add_keeps_one_entry() {
        let wishlist = Wishlist::new(MemoryStore::shared());
        wishlist.add(entry("42", MediaType::Movie));
        wishlist.add(entry("42", MediaType::Movie));
        assert_eq!(wishlist.entries().len(), 1);
    }

    #[test]
    fn test_membership_survives_reload() {
        let store = MemoryStore::shared();

        let wishlist = Wishlist::new(Arc::clone(&store));
        wishlist.add(entry("42", MediaType::Series));
        wishlist.add(entry("7", MediaType::Movie));
        drop(wishlist);

        // A fresh instance over the same store rebuilds the index
        let wishlist = Wishlist::new(store);
        assert!(wishlist.has("42", MediaType::Series));
        assert!(wishlist.has("7", MediaType::Movie));
        let ids: Vec<_> = wishlist.entries().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["42", "7"]);
    }

    #[test]
    fn test_listeners_fire_per_key() {
        let wishlist = Wishlist::new(MemoryStore::shared());
        let hits = Arc::new(AtomicUsize::new(0));
        let other_hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        wishlist.on("42", MediaType::Movie, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = Arc::clone(&other_hits);
        wishlist.on("99", MediaType::Movie, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        wishlist.add(entry("42", MediaType::Movie));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(other_hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_remove_of_non_member_still_notifies() {
        let wishlist = Wishlist::new(MemoryStore::shared());
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        wishlist.on("42", MediaType::Series, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        wishlist.remove("42", MediaType::Series);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_multiple_subscribers_and_off() {
        let wishlist = Wishlist::new(MemoryStore::shared());
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&first);
        let first_id = wishlist.on("1", MediaType::Movie, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = Arc::clone(&second);
        wishlist.on("1", MediaType::Movie, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        wishlist.add(entry("1", MediaType::Movie));
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);

        wishlist.off("1", MediaType::Movie, first_id);
        // Unsubscribing an id that is no longer registered is a no-op
        wishlist.off("1", MediaType::Movie, first_id);
        wishlist.off("1", MediaType::Movie, 9999);

        wishlist.remove("1", MediaType::Movie);
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_listener_may_query_membership() {
        let store = MemoryStore::shared();
        let wishlist = Arc::new(Wishlist::new(store));
        let observed = Arc::new(AtomicUsize::new(0));

        let inner = Arc::clone(&wishlist);
        let seen = Arc::clone(&observed);
        wishlist.on("42", MediaType::Movie, move || {
            if inner.has("42", MediaType::Movie) {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        });

        wishlist.add(entry("42", MediaType::Movie));
        assert_eq!(observed.load(Ordering::SeqCst), 1);
    }
}
