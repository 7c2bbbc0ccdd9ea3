//! Query cache with tag-based invalidation.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde_json::Value;

use super::tags::Tag;

/// Invalidations remembered for requests still in flight.
const HISTORY_LEN: usize = 256;

#[derive(Clone, Debug)]
struct Entry {
    value: Value,
    tags: Vec<Tag>,
    stored_at: Instant,
}

#[derive(Debug, Default)]
struct State {
    entries: HashMap<String, Entry>,
    epoch: u64,
    history: VecDeque<(u64, Vec<Tag>)>,
}

impl State {
    /// Whether an invalidation after `epoch` matched any of `tags`.
    fn invalidated_since(&self, epoch: u64, tags: &[Tag]) -> bool {
        if epoch == self.epoch {
            return false;
        }
        match self.history.front() {
            Some((oldest, _)) if *oldest <= epoch + 1 => {}
            _ => return true,
        }
        self.history
            .iter()
            .filter(|(at, _)| *at > epoch)
            .any(|(_, invalidated)| tags.iter().any(|provided| invalidated.iter().any(|t| t.matches(provided))))
    }
}

/// Decoded responses keyed by request, each remembering the tags it provides.
#[derive(Debug)]
pub struct QueryCache {
    state: RwLock<State>,
    keep_for: Duration,
}

impl QueryCache {
    pub fn new(keep_for: Duration) -> Self {
        Self { state: RwLock::new(State::default()), keep_for }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        let now = Instant::now();
        {
            let state = self.state.read();
            match state.entries.get(key) {
                None => return None,
                Some(entry) if now.duration_since(entry.stored_at) < self.keep_for => {
                    return Some(entry.value.clone());
                }
                Some(_) => {}
            }
        }
        let mut state = self.state.write();
        if state.entries.get(key).is_some_and(|e| now.duration_since(e.stored_at) >= self.keep_for) {
            state.entries.remove(key);
            tracing::trace!(key, "cache entry expired");
        }
        None
    }

    /// Current invalidation epoch. Read it before sending a query and pass it to
    /// [`insert_since`](Self::insert_since) with the response.
    pub fn epoch(&self) -> u64 {
        self.state.read().epoch
    }

    /// Stores a response. A concurrent insert for the same key simply wins or loses.
    pub fn insert(&self, key: impl Into<String>, value: Value, tags: Vec<Tag>) {
        let entry = Entry { value, tags, stored_at: Instant::now() };
        self.state.write().entries.insert(key.into(), entry);
    }

    /// Stores a response fetched at `epoch` unless a matching invalidation landed
    /// while it was in flight. Returns whether it was stored.
    pub fn insert_since(&self, key: impl Into<String>, value: Value, tags: Vec<Tag>, epoch: u64) -> bool {
        let key = key.into();
        let mut state = self.state.write();
        if state.invalidated_since(epoch, &tags) {
            tracing::debug!(key, "dropping response invalidated in flight");
            return false;
        }
        state.entries.insert(key, Entry { value, tags, stored_at: Instant::now() });
        true
    }

    /// Evicts every entry that provided a tag matched by `tags`. Returns the eviction count.
    pub fn invalidate(&self, tags: &[Tag]) -> usize {
        if tags.is_empty() {
            return 0;
        }
        let mut state = self.state.write();
        state.epoch += 1;
        let epoch = state.epoch;
        state.history.push_back((epoch, tags.to_vec()));
        if state.history.len() > HISTORY_LEN {
            state.history.pop_front();
        }

        let before = state.entries.len();
        state.entries.retain(|_, entry| !entry.tags.iter().any(|provided| tags.iter().any(|t| t.matches(provided))));
        let evicted = before - state.entries.len();
        if evicted > 0 {
            tracing::debug!(evicted, tags = ?tags.iter().map(Tag::to_string).collect::<Vec<_>>(), "invalidated cache entries");
        }
        evicted
    }

    pub fn contains(&self, key: &str) -> bool {
        self.state.read().entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.state.write().entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tags::TagKind;
    use serde_json::json;

    #[test]
    fn test_invalidate_by_id_keeps_unrelated() {
        let cache = QueryCache::new(Duration::from_secs(60));
        cache.insert("GET /products", json!([1, 2]), vec![Tag::list(TagKind::Product), Tag::id(TagKind::Product, 1), Tag::id(TagKind::Product, 2)]);
        cache.insert("GET /products/1", json!({"id": 1}), vec![Tag::id(TagKind::Product, 1)]);
        cache.insert("GET /products/2", json!({"id": 2}), vec![Tag::id(TagKind::Product, 2)]);
        cache.insert("GET /categories", json!([]), vec![Tag::list(TagKind::Category)]);

        assert_eq!(cache.invalidate(&[Tag::id(TagKind::Product, 1)]), 2);
        assert!(!cache.contains("GET /products"));
        assert!(!cache.contains("GET /products/1"));
        assert!(cache.contains("GET /products/2"));
        assert!(cache.contains("GET /categories"));
    }

    #[test]
    fn test_invalidate_whole_kind() {
        let cache = QueryCache::new(Duration::from_secs(60));
        cache.insert("a", json!(1), vec![Tag::list(TagKind::Publication)]);
        cache.insert("b", json!(2), vec![Tag::id(TagKind::Publication, "x")]);
        cache.insert("c", json!(3), vec![Tag::list(TagKind::Preorder)]);
        assert_eq!(cache.invalidate(&[Tag::all(TagKind::Publication)]), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.invalidate(&[]), 0);
    }

    #[test]
    fn test_expired_entries_are_dropped() {
        let cache = QueryCache::new(Duration::ZERO);
        cache.insert("GET /faq", json!([]), vec![Tag::list(TagKind::Faq)]);
        assert!(cache.get("GET /faq").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_in_flight_response_dropped_after_matching_invalidation() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let started = cache.epoch();
        cache.invalidate(&[Tag::list(TagKind::Category)]);

        let stale = cache.insert_since("GET /categories", json!(["Old"]), vec![Tag::list(TagKind::Category)], started);
        assert!(!stale);
        assert!(!cache.contains("GET /categories"));

        let unrelated = cache.insert_since("GET /faq", json!([]), vec![Tag::list(TagKind::Faq)], started);
        assert!(unrelated);

        let fresh = cache.insert_since("GET /categories", json!(["New"]), vec![Tag::list(TagKind::Category)], cache.epoch());
        assert!(fresh);
        assert_eq!(cache.get("GET /categories"), Some(json!(["New"])));
    }

    #[test]
    fn test_in_flight_response_dropped_when_history_overflows() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let started = cache.epoch();
        for _ in 0..=HISTORY_LEN {
            cache.invalidate(&[Tag::list(TagKind::Faq)]);
        }
        assert!(!cache.insert_since("GET /users", json!([]), vec![Tag::list(TagKind::User)], started));
    }

    #[test]
    fn test_last_write_wins() {
        let cache = QueryCache::new(Duration::from_secs(60));
        cache.insert("k", json!(1), vec![]);
        cache.insert("k", json!(2), vec![]);
        assert_eq!(cache.get("k"), Some(json!(2)));
    }
}
