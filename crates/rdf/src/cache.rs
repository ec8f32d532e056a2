// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The bounded graph cache (C6): a fixed-capacity, linear-scan cache of
//! recently fetched models keyed by URI, used to avoid re-fetching the same
//! external graph repeatedly within one ingest run (§4.6).

use std::collections::VecDeque;
use std::rc::Rc;

/// Number of entries the cache holds before it starts evicting the oldest
/// one. Matches the original's fixed 16-slot table (§4.6); not configurable.
pub const CAPACITY: usize = 16;

/// A small LRU-ish cache of `Rc<M>` models keyed by the URI they were
/// fetched from. Eviction is oldest-first, not least-recently-used: a hit
/// doesn't move its slot, matching the original's plain ring behaviour.
#[derive(Debug)]
pub struct GraphCache<M> {
    entries: VecDeque<(String, Rc<M>)>,
}

impl<M> Default for GraphCache<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> GraphCache<M> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(CAPACITY),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the cached model for `uri`, calling `fetch` and inserting its
    /// result into the cache on a miss. On a miss with a full cache, the
    /// oldest entry (slot 0) is evicted first (§4.6).
    pub fn fetch_with(&mut self, uri: &str, fetch: impl FnOnce() -> M) -> Rc<M> {
        if let Some((_, model)) = self.entries.iter().find(|(cached_uri, _)| cached_uri == uri) {
            return Rc::clone(model);
        }
        if self.entries.len() >= CAPACITY {
            self.entries.pop_front();
        }
        let model = Rc::new(fetch());
        self.entries.push_back((uri.to_owned(), Rc::clone(&model)));
        model
    }

    /// Remove `uri` from the cache, if present. A no-op otherwise.
    pub fn discard(&mut self, uri: &str) {
        self.entries.retain(|(cached_uri, _)| cached_uri != uri);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn a_hit_returns_the_same_model_without_calling_fetch_again() {
        let mut cache = GraphCache::new();
        let fetches = Cell::new(0);
        let first = cache.fetch_with("http://a.example/g", || {
            fetches.set(fetches.get() + 1);
            42
        });
        let second = cache.fetch_with("http://a.example/g", || {
            fetches.set(fetches.get() + 1);
            99
        });
        assert_eq!(fetches.get(), 1);
        assert_eq!(*first, 42);
        assert_eq!(*second, 42);
    }

    #[test]
    fn a_full_cache_evicts_the_oldest_entry_first() {
        let mut cache = GraphCache::new();
        for i in 0..CAPACITY {
            cache.fetch_with(&format!("http://a.example/{i}"), || i);
        }
        assert_eq!(cache.len(), CAPACITY);

        // One more insert should evict slot 0 ("http://a.example/0").
        cache.fetch_with("http://a.example/overflow", || CAPACITY);
        assert_eq!(cache.len(), CAPACITY);

        let mut refetched = false;
        cache.fetch_with("http://a.example/0", || {
            refetched = true;
            0
        });
        assert!(refetched, "evicted entry should have been refetched");
    }

    #[test]
    fn discard_removes_an_entry_so_it_is_refetched() {
        let mut cache = GraphCache::new();
        cache.fetch_with("http://a.example/g", || 1);
        cache.discard("http://a.example/g");
        assert!(cache.is_empty());

        let mut refetched = false;
        cache.fetch_with("http://a.example/g", || {
            refetched = true;
            1
        });
        assert!(refetched);
    }

    #[test]
    fn discarding_an_unknown_uri_is_a_no_op() {
        let mut cache: GraphCache<i32> = GraphCache::new();
        cache.fetch_with("http://a.example/g", || 1);
        cache.discard("http://a.example/nope");
        assert_eq!(cache.len(), 1);
    }
}
