use dashmap::DashMap;
use ferrous_lookup_application::ports::ResponseCache;
use ferrous_lookup_domain::Response;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

struct CacheEntry {
    response: Response,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Entry count at which `set` first sweeps expired entries.
pub const DEFAULT_PURGE_THRESHOLD: usize = 1024;

/// Concurrent response cache with a deadline per entry.
///
/// Expired entries are dropped lazily when read. Writes sweep the whole map
/// once it grows past the purge threshold; the threshold then moves to twice
/// the surviving size so a cache full of live entries is not swept on every
/// write.
pub struct ExpiringCache {
    entries: DashMap<String, CacheEntry>,
    purge_threshold: usize,
    next_purge: AtomicUsize,
}

impl Default for ExpiringCache {
    fn default() -> Self {
        Self::with_purge_threshold(DEFAULT_PURGE_THRESHOLD)
    }
}

impl ExpiringCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_purge_threshold(threshold: usize) -> Self {
        let threshold = threshold.max(1);
        Self {
            entries: DashMap::new(),
            purge_threshold: threshold,
            next_purge: AtomicUsize::new(threshold),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every expired entry and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!(removed = removed, "Purged expired cache entries");
        }
        removed
    }
}

impl ResponseCache for ExpiringCache {
    fn get(&self, key: &str) -> Option<Response> {
        let now = Instant::now();
        {
            let entry = self.entries.get(key)?;
            if !entry.is_expired(now) {
                return Some(entry.response.clone());
            }
        }
        self.entries
            .remove_if(key, |_, entry| entry.is_expired(now));
        None
    }

    fn set(&self, key: String, value: Response, ttl: Duration) {
        let expires_at = Instant::now() + ttl;
        self.entries.insert(
            key,
            CacheEntry {
                response: value,
                expires_at,
            },
        );

        if self.entries.len() >= self.next_purge.load(Ordering::Relaxed) {
            self.purge_expired();
            let next = (self.entries.len() * 2).max(self.purge_threshold);
            self.next_purge.store(next, Ordering::Relaxed);
        }
    }
}
