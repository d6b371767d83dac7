//! Viewing history
//!
//! Recently-viewed titles (a bounded most-recently-used list) and the
//! per-series continue-watching cursor. Both live in the persistence store,
//! so history survives reloads and accumulates regardless of whether playback
//! itself ever succeeds.

use std::sync::Arc;

use crate::models::{EpisodeCursor, MediaEntry};
use crate::services::storage::{get_json, keys, set_json, PersistenceStore};

/// Capacity of the recently-viewed list; eviction beyond this is strict FIFO
pub const VIEWED_CAPACITY: usize = 15;

/// History operations over the injected persistence store
#[derive(Clone)]
pub struct HistoryService {
    store: Arc<dyn PersistenceStore>,
}

impl HistoryService {
    pub fn new(store: Arc<dyn PersistenceStore>) -> Self {
        Self { store }
    }

    /// Recently-viewed titles, newest first; empty on absent or corrupt data
    pub fn viewed(&self) -> Vec<MediaEntry> {
        get_json(self.store.as_ref(), keys::VIEWED).unwrap_or_default()
    }

    /// Record a viewed title: de-duplicate by `(id, type)`, prepend, truncate
    /// to capacity
    pub fn record_viewed(&self, entry: MediaEntry) {
        let mut list = self.viewed();
        list.retain(|e| !(e.id == entry.id && e.media_type == entry.media_type));
        list.insert(0, entry);
        list.truncate(VIEWED_CAPACITY);
        set_json(self.store.as_ref(), keys::VIEWED, &list);
    }

    /// Continue-watching cursor for a series, if one was ever written
    pub fn cursor(&self, id: &str) -> Option<EpisodeCursor> {
        get_json(self.store.as_ref(), &cursor_key(id))
    }

    /// Overwrite the continue-watching cursor for a series
    pub fn save_cursor(&self, id: &str, cursor: &EpisodeCursor) {
        set_json(self.store.as_ref(), &cursor_key(id), cursor);
    }
}

fn cursor_key(id: &str) -> String {
    format!("{}{}", keys::CONTINUE_PREFIX, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaType;
    use crate::services::storage::MemoryStore;

    fn entry(id: &str, media_type: MediaType) -> MediaEntry {
        MediaEntry {
            id: id.to_string(),
            poster: Some(format!("/{}.jpg", id)),
            title: format!("Title {}", id),
            media_type,
        }
    }

    fn service() -> HistoryService {
        HistoryService::new(MemoryStore::shared())
    }

    #[test]
    fn test_viewed_insertion_is_newest_first() {
        let history = service();
        history.record_viewed(entry("1", MediaType::Movie));
        history.record_viewed(entry("2", MediaType::Series));

        let ids: Vec<_> = history.viewed().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn test_duplicate_insertion_moves_to_front() {
        let history = service();
        history.record_viewed(entry("1", MediaType::Movie));
        history.record_viewed(entry("2", MediaType::Movie));
        history.record_viewed(entry("1", MediaType::Movie));

        let list = history.viewed();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, "1");
        assert_eq!(list[1].id, "2");
    }

    #[test]
    fn test_same_id_different_type_are_distinct() {
        let history = service();
        history.record_viewed(entry("7", MediaType::Movie));
        history.record_viewed(entry("7", MediaType::Series));
        assert_eq!(history.viewed().len(), 2);
    }

    #[test]
    fn test_capacity_is_bounded() {
        let history = service();
        for i in 0..40 {
            history.record_viewed(entry(&i.to_string(), MediaType::Movie));
        }

        let list = history.viewed();
        assert_eq!(list.len(), VIEWED_CAPACITY);
        // Strict FIFO eviction: only the newest 15 remain
        assert_eq!(list[0].id, "39");
        assert_eq!(list.last().unwrap().id, "25");
    }

    #[test]
    fn test_corrupt_viewed_reads_empty() {
        let store = MemoryStore::shared();
        store.set(keys::VIEWED, "not an array");
        let history = HistoryService::new(store);
        assert!(history.viewed().is_empty());
    }

    #[test]
    fn test_cursor_roundtrip_is_namespaced() {
        let history = service();
        assert!(history.cursor("42").is_none());

        history.save_cursor("42", &EpisodeCursor::new(2, 5));
        history.save_cursor("43", &EpisodeCursor::new(1, 1));

        let cursor = history.cursor("42").unwrap();
        assert_eq!((cursor.season, cursor.episode), (2, 5));
        assert!(cursor.watched_at > 0);

        // Overwritten on every change
        history.save_cursor("42", &EpisodeCursor::new(2, 6));
        assert_eq!(history.cursor("42").unwrap().episode, 6);
    }
}
