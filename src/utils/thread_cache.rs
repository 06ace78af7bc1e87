use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::{entities::content_kind::ContentKind, models::view::comment::CommentView};

pub const DEFAULT_THREAD_CACHE_CAPACITY: usize = 1000;

/// Identifies the comment thread of one content item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThreadKey {
    pub kind: ContentKind,
    pub content_id: String,
}

impl ThreadKey {
    pub fn new(kind: ContentKind, content_id: impl Into<String>) -> Self {
        Self {
            kind,
            content_id: content_id.into(),
        }
    }
}

type EntryKey = (ThreadKey, Option<String>);

struct Entry {
    generation: u64,
    last_used: AtomicU64,
    comments: Vec<CommentView>,
}

/// Assembled trees per thread and viewer, holding at most `capacity` of them
/// with the least recently used evicted first. Every write bumps the cache
/// generation; a tree fetched under an older generation is never stored.
pub struct ThreadCache {
    entries: DashMap<EntryKey, Entry>,
    generation: AtomicU64,
    ticks: AtomicU64,
    capacity: usize,
}

impl Default for ThreadCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_THREAD_CACHE_CAPACITY)
    }
}

impl ThreadCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            generation: AtomicU64::new(0),
            ticks: AtomicU64::new(0),
            capacity: capacity.max(1),
        }
    }

    fn tick(&self) -> u64 {
        self.ticks.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Read before fetching a thread and handed back to `store`.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn get(&self, key: &ThreadKey, viewer_id: Option<&str>) -> Option<Vec<CommentView>> {
        let entry_key = (key.clone(), viewer_id.map(str::to_string));
        let entry = self.entries.get(&entry_key)?;
        entry.last_used.store(self.tick(), Ordering::Relaxed);
        Some(entry.comments.clone())
    }

    /// Returns false and keeps nothing when a write happened after `generation` was read.
    pub fn store(
        &self,
        key: &ThreadKey,
        viewer_id: Option<&str>,
        generation: u64,
        comments: Vec<CommentView>,
    ) -> bool {
        if self.generation() != generation {
            tracing::debug!("discarding stale thread {key:?} at generation {generation}");
            return false;
        }

        let entry_key = (key.clone(), viewer_id.map(str::to_string));
        if !self.entries.contains_key(&entry_key) {
            self.make_room();
        }
        self.entries.insert(
            entry_key.clone(),
            Entry {
                generation,
                last_used: AtomicU64::new(self.tick()),
                comments,
            },
        );

        // a write may have landed between the check and the insert
        if self.generation() != generation {
            self.entries
                .remove_if(&entry_key, |_, entry| entry.generation == generation);
            return false;
        }
        true
    }

    fn make_room(&self) {
        while self.entries.len() >= self.capacity {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|entry| entry.last_used.load(Ordering::Relaxed))
                .map(|entry| entry.key().clone());
            match oldest {
                Some(oldest) => {
                    tracing::debug!("evicting cached thread {oldest:?}");
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    pub fn invalidate(&self, key: &ThreadKey) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.entries.retain(|(k, _), _| k != key);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
