//! In-process query cache for lead lists and activity timelines.
//!
//! Entries are filled on read and dropped after a write succeeds. A failed
//! write leaves the cache untouched. Each cache holds at most `capacity`
//! entries (least recently used evicted first) and an entry expires `ttl`
//! after it was stored.
//!
//! A read that misses captures [`KeyedCache::generation`] before querying
//! and hands it back to [`KeyedCache::insert`]. If an invalidation ran in
//! between, the result is returned to the caller but not stored.

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use leadtrack_core::lead::LeadScope;
use leadtrack_core::types::DbId;
use leadtrack_db::models::activity::LeadActivityWithCreator;
use leadtrack_db::models::lead::Lead;
use lru::LruCache;
use tokio::sync::Mutex;

struct CachedEntry<V> {
    value: Arc<V>,
    stored_at: Instant,
}

/// A bounded, expiring map of shared query results.
pub struct KeyedCache<K: Hash + Eq, V> {
    entries: Mutex<LruCache<K, CachedEntry<V>>>,
    /// Bumped by every invalidation, always under the `entries` lock.
    generation: AtomicU64,
    ttl: Duration,
}

impl<K: Hash + Eq, V> KeyedCache<K, V> {
    pub fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            generation: AtomicU64::new(0),
            ttl,
        }
    }

    /// Current invalidation generation; capture it before a fill query.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Fresh entry for `key`, if any. Expired entries are dropped.
    pub async fn get(&self, key: &K) -> Option<Arc<V>> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                return Some(Arc::clone(&entry.value));
            }
            Some(_) => {}
            None => return None,
        }
        entries.pop(key);
        None
    }

    /// Store a result read at `generation` and return the shared handle.
    ///
    /// Nothing is stored when the cache was invalidated after `generation`
    /// was captured, since the value may predate that write.
    pub async fn insert(&self, generation: u64, key: K, value: V) -> Arc<V> {
        let value = Arc::new(value);
        let mut entries = self.entries.lock().await;
        if self.generation.load(Ordering::Acquire) == generation {
            entries.put(
                key,
                CachedEntry {
                    value: Arc::clone(&value),
                    stored_at: Instant::now(),
                },
            );
        }
        value
    }

    pub async fn invalidate(&self, key: &K) {
        let mut entries = self.entries.lock().await;
        self.generation.fetch_add(1, Ordering::AcqRel);
        entries.pop(key);
    }

    pub async fn clear(&self) {
        let mut entries = self.entries.lock().await;
        self.generation.fetch_add(1, Ordering::AcqRel);
        entries.clear();
    }
}

/// Cached reads shared across requests.
pub struct QueryCache {
    /// Lead lists keyed by visibility scope.
    pub leads: KeyedCache<LeadScope, Vec<Lead>>,
    /// Activity timelines keyed by lead id.
    pub activities: KeyedCache<DbId, Vec<LeadActivityWithCreator>>,
}

impl QueryCache {
    pub fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self {
            leads: KeyedCache::new(capacity, ttl),
            activities: KeyedCache::new(capacity, ttl),
        }
    }

    /// Drop every cached lead list. Called after any lead write.
    pub async fn invalidate_leads(&self) {
        self.leads.clear().await;
    }

    /// Drop the timeline of one lead. Called after an activity write.
    pub async fn invalidate_activities(&self, lead_id: DbId) {
        self.activities.invalidate(&lead_id).await;
    }
}
