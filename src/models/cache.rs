use dashmap::DashMap;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::debug;

/// A payload together with the instant it was fetched. The two fields are
/// only ever written together; a reader never sees a value paired with a
/// timestamp from a different write.
#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub value: Value,
    pub fetched_at: Instant,
}

/// Keyed freshness cache shared by all upstream fetchers.
///
/// Each resource name (e.g. "twitter-trends") maps to the most recently
/// fetched payload and its timestamp. The cache never expires entries on its
/// own; freshness is recomputed on each read against a TTL supplied by the
/// caller. Entries live for the process lifetime and are only mutated by a
/// successful refresh.
pub struct FreshnessCache {
    entries: DashMap<String, CacheEntry>,
    default_ttl: Duration,
}

impl FreshnessCache {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// True iff `resource` holds a value and less than `ttl` has elapsed
    /// between its fetch and `now`. A resource that has never been stored is
    /// never fresh. No side effects.
    pub fn is_fresh(&self, resource: &str, now: Instant, ttl: Duration) -> bool {
        match self.entries.get(resource) {
            Some(entry) => now.saturating_duration_since(entry.fetched_at) < ttl,
            None => false,
        }
    }

    /// The stored entry for `resource`, or `None` if it has never been
    /// populated. Callers that need a freshness guarantee check `is_fresh`
    /// first; `get` itself will happily return a stale value.
    pub fn get(&self, resource: &str) -> Option<CacheEntry> {
        self.entries.get(resource).map(|e| e.clone())
    }

    /// Overwrites the entry for `resource` with `value` fetched at `now`.
    /// The (value, timestamp) pair is replaced as a unit under the shard
    /// lock. If the stored timestamp is already later than `now` the stored
    /// pair wins whole: a refresh never back-dates `fetched_at`, and losing a
    /// race drops the older write entirely rather than mixing pairs.
    pub fn put(&self, resource: &str, value: Value, now: Instant) {
        match self.entries.entry(resource.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(mut occupied) => {
                if occupied.get().fetched_at <= now {
                    occupied.insert(CacheEntry {
                        value,
                        fetched_at: now,
                    });
                } else {
                    debug!("dropping out-of-order cache write for {}", resource);
                }
            }
            dashmap::mapref::entry::Entry::Vacant(vacant) => {
                vacant.insert(CacheEntry {
                    value,
                    fetched_at: now,
                });
            }
        }
    }
}
