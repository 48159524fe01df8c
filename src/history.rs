//! In-memory chat history and saved queries for the local service.
//!
//! Both maps are LRU-bounded by user, and each user's queue is bounded by
//! `per_user`, so total memory is capped at `max_users * per_user` entries
//! per map whatever user ids clients send.

use std::collections::{BTreeMap, VecDeque};
use std::num::NonZeroUsize;

use chrono::{DateTime, Utc};
use lru::LruCache;

use crate::engine::intent::Intent;
use crate::schemas::{HistoryEntry, SavedQuery};

/// Most saved queries returned for one user
pub const SAVED_QUERY_PAGE: usize = 50;

pub struct HistoryStore {
    entries: LruCache<String, VecDeque<HistoryEntry>>,
    saved: LruCache<String, VecDeque<SavedQuery>>,
    per_user: usize,
}

impl HistoryStore {
    pub fn new(per_user: usize, max_users: usize) -> Self {
        let cap = NonZeroUsize::new(max_users).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(cap),
            saved: LruCache::new(cap),
            per_user: per_user.max(1),
        }
    }

    pub fn record(&mut self, entry: HistoryEntry) {
        push_bounded(&mut self.entries, entry.user_id.clone(), entry, self.per_user);
    }

    /// Entries for `user_id`, oldest first.
    pub fn entries(&self, user_id: &str) -> Vec<HistoryEntry> {
        self.entries
            .peek(user_id)
            .map(|q| q.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn tracked_users(&self) -> usize {
        self.entries.len()
    }

    pub fn user_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries.iter().map(|(k, _)| k.clone()).collect();
        ids.sort();
        ids
    }

    fn all(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().flat_map(|(_, q)| q.iter())
    }

    pub fn total(&self) -> usize {
        self.all().count()
    }

    pub fn count_since(&self, since: DateTime<Utc>) -> usize {
        self.all().filter(|e| e.timestamp >= since).count()
    }

    /// Newest `n` entries across all users.
    pub fn recent(&self, n: usize) -> Vec<HistoryEntry> {
        let mut all: Vec<&HistoryEntry> = self.all().collect();
        all.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        all.into_iter().take(n).cloned().collect()
    }

    /// Query counts per intent, in [`Intent::ALL`] order, zero counts omitted.
    pub fn intent_counts(&self) -> Vec<(Intent, usize)> {
        Intent::ALL
            .iter()
            .map(|intent| (*intent, self.all().filter(|e| e.intent == *intent).count()))
            .filter(|(_, n)| *n > 0)
            .collect()
    }

    /// Daily query counts from `since` onward, keyed `YYYY-MM-DD`.
    pub fn timeline(&self, since: DateTime<Utc>) -> BTreeMap<String, usize> {
        let mut days = BTreeMap::new();
        for entry in self.all().filter(|e| e.timestamp >= since) {
            *days
                .entry(entry.timestamp.format("%Y-%m-%d").to_string())
                .or_insert(0) += 1;
        }
        days
    }

    pub fn save_query(&mut self, user_id: String, query: String) -> SavedQuery {
        let saved = SavedQuery {
            id: uuid::Uuid::new_v4(),
            query,
            timestamp: Utc::now(),
        };
        let cap = self.per_user.min(SAVED_QUERY_PAGE);
        push_bounded(&mut self.saved, user_id, saved.clone(), cap);
        saved
    }

    /// Saved queries for `user_id`, newest first.
    pub fn saved_queries(&self, user_id: &str) -> Vec<SavedQuery> {
        self.saved
            .peek(user_id)
            .map(|q| q.iter().rev().cloned().collect())
            .unwrap_or_default()
    }
}

fn push_bounded<T>(
    cache: &mut LruCache<String, VecDeque<T>>,
    user_id: String,
    item: T,
    cap: usize,
) {
    if let Some(queue) = cache.get_mut(&user_id) {
        queue.push_back(item);
        while queue.len() > cap {
            queue.pop_front();
        }
    } else if let Some((evicted, _)) = cache.push(user_id, VecDeque::from([item])) {
        tracing::debug!(user_id = %evicted, "Evicted least recently active user");
    }
}
